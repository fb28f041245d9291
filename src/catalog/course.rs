// SPDX-License-Identifier: MIT

//! Course records as supplied by the course-data service
//!
//! Only the fields the requirement tooling reads are modelled; unknown
//! fields in incoming records are ignored.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::requirement::{Projector, ReqNode, RequirementGraph, Validator};

/// Which requirement tree of a course to work on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementKind {
    #[default]
    Prerequisites,
    Corequisites,
}

impl std::fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequirementKind::Prerequisites => write!(f, "prerequisites"),
            RequirementKind::Corequisites => write!(f, "corequisites"),
        }
    }
}

impl FromStr for RequirementKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prerequisites" | "prereqs" | "pre" => Ok(Self::Prerequisites),
            "corequisites" | "coreqs" | "co" => Ok(Self::Corequisites),
            other => Err(format!("unknown requirement kind: {}", other)),
        }
    }
}

/// A course record
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Catalog id, e.g. `COMP251`
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub prerequisites_text: Option<String>,
    pub corequisites_text: Option<String>,
    /// Flat list of prerequisite codes
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub corequisites: Vec<String>,
    /// Courses that list this one as a prerequisite
    #[serde(default)]
    pub leading_to: Vec<String>,
    pub logical_prerequisites: Option<ReqNode>,
    pub logical_corequisites: Option<ReqNode>,
    pub restrictions: Option<String>,
}

impl Course {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn requirements(&self, kind: RequirementKind) -> Option<&ReqNode> {
        match kind {
            RequirementKind::Prerequisites => self.logical_prerequisites.as_ref(),
            RequirementKind::Corequisites => self.logical_corequisites.as_ref(),
        }
    }

    /// Raw requirement text shown when the tree is unusable
    pub fn requirements_text(&self, kind: RequirementKind) -> Option<&str> {
        match kind {
            RequirementKind::Prerequisites => self.prerequisites_text.as_deref(),
            RequirementKind::Corequisites => self.corequisites_text.as_deref(),
        }
    }

    /// Requirement tree of `kind`, validated with this course as its owner
    pub fn validated_requirements(
        &self,
        kind: RequirementKind,
        validator: &Validator,
    ) -> Result<&ReqNode> {
        let tree = self
            .requirements(kind)
            .ok_or_else(|| AppError::MissingRequirements {
                code: self.id.clone(),
                kind: kind.to_string(),
            })?;
        validator.clone().with_owner(&self.id).validate(tree)?;
        Ok(tree)
    }

    /// Validate and project a requirement tree, titled with the description
    pub fn requirement_graph(
        &self,
        kind: RequirementKind,
        validator: &Validator,
    ) -> Result<RequirementGraph> {
        let tree = self.validated_requirements(kind, validator)?;
        let mut projector = Projector::new(self.id.clone());
        if !self.description.is_empty() {
            projector = projector.with_title(self.description.clone());
        }
        Ok(projector.project(tree))
    }

    /// Codes this course depends on: the logical tree when present,
    /// otherwise the flat list
    pub fn prerequisite_codes(&self) -> Vec<String> {
        match &self.logical_prerequisites {
            Some(tree) => tree.courses().into_iter().map(str::to_string).collect(),
            None => self.prerequisites.clone(),
        }
    }

    /// Merge a newer scrape of the same course into this one.
    ///
    /// Fields come from `other`, except that requirement trees keep the
    /// existing value when `other` has none.
    pub fn merge(self, other: Course) -> Course {
        Course {
            logical_prerequisites: other.logical_prerequisites.or(self.logical_prerequisites),
            logical_corequisites: other.logical_corequisites.or(self.logical_corequisites),
            ..other
        }
    }
}
