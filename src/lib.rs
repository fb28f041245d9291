// SPDX-License-Identifier: MIT

//! Course requirement trees
//!
//! Decode a course's prerequisite/corequisite tree, validate it, check it
//! against a set of completed courses and project it into a dependency
//! graph for display.

pub mod catalog;
pub mod config;
pub mod error;
pub mod requirement;
pub mod server;

pub use error::AppError;
pub use requirement::{ReqNode, RequirementError};
