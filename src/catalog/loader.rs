//! Course record loader - JSON/YAML file loading and parsing

use std::fs;
use std::path::Path;

use super::course::Course;
use crate::error::Result;

/// Loads course records from JSON or YAML files.
///
/// Files ending in `.json` are read as JSON, anything else as YAML.
pub struct CourseLoader;

impl CourseLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a single course record
    pub fn load_course<P: AsRef<Path>>(&self, path: P) -> Result<Course> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        log::debug!("Loading course record from {}", path.display());
        if is_json(path) {
            Self::parse_json(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }

    /// Load a list of course records
    pub fn load_catalog<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Course>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let courses: Vec<Course> = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        log::info!("Loaded {} courses from {}", courses.len(), path.display());
        Ok(courses)
    }

    pub fn parse_json(content: &str) -> Result<Course> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn parse_yaml(content: &str) -> Result<Course> {
        Ok(serde_yaml::from_str(content)?)
    }
}

impl Default for CourseLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
