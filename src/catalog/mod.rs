// SPDX-License-Identifier: MIT

//! Course records and catalog-level dependency queries

mod course;
pub mod index;
pub mod loader;

pub use course::{Course, RequirementKind};
pub use index::DependencyIndex;
pub use loader::CourseLoader;
