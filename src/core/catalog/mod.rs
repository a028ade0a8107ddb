//! Course catalog: the immutable set of courses a plan is built from
//!
//! A [`Catalog`] is produced once by the loader and handed read-only to the
//! planner. Required courses (core, math and other categories) seed the
//! outstanding-requirement pool; electives are only referenced by prerequisites.

pub mod certificate;
pub mod loader;
pub mod markup;

pub use certificate::{Certificate, CertificateCatalog, DEFAULT_CERTIFICATE_COURSES};
pub use loader::{load_catalog, load_certificates, CatalogLoader};
pub use markup::{PrerequisiteMarkup, RESTRICTED_SUBJECTS};

use crate::core::models::{Course, CourseKey, InvalidCourseKey, UnknownTerm};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Errors raised while loading a catalog or certificate file
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// TOML syntax error or a field of the wrong shape (including unknown categories)
    #[error("invalid catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),
    /// A course key could not be parsed
    #[error(transparent)]
    InvalidKey(#[from] InvalidCourseKey),
    /// A course lists a term that does not exist
    #[error("course {course}: {source}")]
    UnknownTerm {
        /// Offending course
        course: CourseKey,
        /// Parse error for the term name
        source: UnknownTerm,
    },
    /// The same course key appears twice
    #[error("duplicate course {0}")]
    DuplicateCourse(CourseKey),
    /// The same certificate id appears twice
    #[error("duplicate certificate id '{0}'")]
    DuplicateCertificate(String),
}

/// Catalog category of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Major core course
    Core,
    /// Required mathematics course
    Math,
    /// Other required course (writing, science, ...)
    Other,
    /// Elective, not part of the required pool
    Elective,
}

impl Category {
    /// Whether courses of this category must be completed for the degree
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Elective)
    }
}

/// A degree program's course catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Program name (e.g. "BS Computer Science")
    pub program: String,
    required: BTreeMap<CourseKey, Course>,
    electives: BTreeMap<CourseKey, Course>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Parse a catalog from TOML text using the default restricted subjects
    ///
    /// # Errors
    /// Returns a [`CatalogError`] if the text is malformed or inconsistent.
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        CatalogLoader::default().parse_catalog(toml_str)
    }

    /// Add a course under `category`
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateCourse`] if the key is already present.
    pub fn insert(&mut self, course: Course, category: Category) -> Result<(), CatalogError> {
        if self.contains(&course.key) {
            return Err(CatalogError::DuplicateCourse(course.key));
        }
        let map = if category.is_required() {
            &mut self.required
        } else {
            &mut self.electives
        };
        map.insert(course.key.clone(), course);
        Ok(())
    }

    /// Look up a course by key
    #[must_use]
    pub fn get(&self, key: &CourseKey) -> Option<&Course> {
        self.required.get(key).or_else(|| self.electives.get(key))
    }

    /// Whether the key names a catalog course
    #[must_use]
    pub fn contains(&self, key: &CourseKey) -> bool {
        self.required.contains_key(key) || self.electives.contains_key(key)
    }

    /// Whether the key names a required course
    #[must_use]
    pub fn is_required(&self, key: &CourseKey) -> bool {
        self.required.contains_key(key)
    }

    /// Required courses in key order
    pub fn required(&self) -> impl Iterator<Item = &Course> {
        self.required.values()
    }

    /// Elective courses in key order
    pub fn electives(&self) -> impl Iterator<Item = &Course> {
        self.electives.values()
    }

    /// Every course key in the catalog
    pub fn keys(&self) -> impl Iterator<Item = &CourseKey> {
        self.required.keys().chain(self.electives.keys())
    }

    /// Total number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.required.len() + self.electives.len()
    }

    /// Whether the catalog has no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(key: &str) -> Course {
        Course::new(key.parse().unwrap(), key, 3)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut catalog = Catalog::new("BS Computer Science");
        catalog.insert(course("CMP SCI 1250"), Category::Core).unwrap();
        catalog.insert(course("MATH 1320"), Category::Math).unwrap();
        catalog.insert(course("CMP SCI 4200"), Category::Elective).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.required().count(), 2);
        assert_eq!(catalog.electives().count(), 1);
        assert!(catalog.contains(&"cmp sci 4200".parse().unwrap()));
        assert!(!catalog.is_required(&"CMP SCI 4200".parse().unwrap()));
    }

    #[test]
    fn test_duplicate_across_categories_rejected() {
        let mut catalog = Catalog::default();
        catalog.insert(course("MATH 1320"), Category::Math).unwrap();
        let err = catalog
            .insert(course("MATH  1320"), Category::Elective)
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourse(_)));
    }

    #[test]
    fn test_category_required() {
        assert!(Category::Core.is_required());
        assert!(Category::Other.is_required());
        assert!(!Category::Elective.is_required());
    }
}
