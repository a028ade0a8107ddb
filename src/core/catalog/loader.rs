//! TOML catalog and certificate loader
//!
//! Expected catalog layout:
//!
//! ```toml
//! program = "BS Computer Science"
//!
//! [[course]]
//! subject = "CMP SCI"
//! number = "2250"
//! name = "Program Design, Logic and Programming II"
//! credits = 3
//! category = "core"
//! terms = ["Fall", "Spring"]
//! prerequisite = { one_of = [ { all_of = ["CMP SCI 1250", "MATH 1320"] }, "CMP SCI 1500" ] }
//! ```
//!
//! Certificates use the same course fields under `[[certificate.core]]` and
//! `[[certificate.electives]]`.

use super::certificate::{Certificate, CertificateCatalog, DEFAULT_CERTIFICATE_COURSES};
use super::markup::{PrerequisiteMarkup, RESTRICTED_SUBJECTS};
use super::{Catalog, CatalogError, Category};
use crate::core::models::{Course, CourseKey, PrerequisiteExpr, Term, DEFAULT_CREDIT_HOURS};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const fn default_credits() -> u32 {
    DEFAULT_CREDIT_HOURS
}

const fn default_category() -> Category {
    Category::Core
}

const fn default_total_courses() -> u32 {
    DEFAULT_CERTIFICATE_COURSES
}

/// One `[[course]]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CourseRecord {
    subject: String,
    number: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_credits")]
    credits: u32,
    #[serde(default = "default_category")]
    category: Category,
    #[serde(default)]
    terms: Vec<String>,
    #[serde(default)]
    concurrent: Option<String>,
    #[serde(default)]
    prerequisite: Option<PrerequisiteMarkup>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    program: String,
    #[serde(default, rename = "course")]
    courses: Vec<CourseRecord>,
}

#[derive(Debug, Deserialize)]
struct CertificateRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default = "default_total_courses")]
    total_courses: u32,
    #[serde(default)]
    core: Vec<CourseRecord>,
    #[serde(default)]
    electives: Vec<CourseRecord>,
}

#[derive(Debug, Deserialize)]
struct CertificateFile {
    #[serde(default, rename = "certificate")]
    certificates: Vec<CertificateRecord>,
}

/// Reads catalog and certificate files into their in-memory form
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    restricted_subjects: Vec<String>,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self {
            restricted_subjects: RESTRICTED_SUBJECTS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl CatalogLoader {
    /// Replace the subjects whose bare names may stand alone inside a `one_of` group
    #[must_use]
    pub fn with_restricted_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restricted_subjects = subjects
            .into_iter()
            .map(|s| s.into().to_uppercase())
            .collect();
        self
    }

    /// Parse catalog TOML text
    ///
    /// # Errors
    /// Returns a [`CatalogError`] for malformed TOML, bad keys or terms, or duplicate courses.
    pub fn parse_catalog(&self, toml_str: &str) -> Result<Catalog, CatalogError> {
        let file: CatalogFile = toml::from_str(toml_str)?;
        let mut catalog = Catalog::new(file.program);
        for record in file.courses {
            let category = record.category;
            let course = self.build_course(record)?;
            catalog.insert(course, category)?;
        }
        Ok(catalog)
    }

    /// Parse certificate TOML text
    ///
    /// # Errors
    /// Returns a [`CatalogError`] for malformed TOML, bad keys or terms, a course
    /// listed twice inside one certificate, or a repeated certificate id.
    pub fn parse_certificates(&self, toml_str: &str) -> Result<CertificateCatalog, CatalogError> {
        let file: CertificateFile = toml::from_str(toml_str)?;
        let mut catalog = CertificateCatalog::default();
        for record in file.certificates {
            let core = self.build_courses(record.core)?;
            let electives = self.build_courses(record.electives)?;
            let mut seen = HashSet::new();
            for course in core.iter().chain(&electives) {
                if !seen.insert(&course.key) {
                    return Err(CatalogError::DuplicateCourse(course.key.clone()));
                }
            }
            catalog.insert(Certificate {
                id: record.id,
                name: record.name,
                total_courses: record.total_courses,
                core,
                electives,
            })?;
        }
        Ok(catalog)
    }

    /// Read and parse a catalog file
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] if the file cannot be read, or any parse error.
    pub fn load_catalog(&self, path: &Path) -> Result<Catalog, CatalogError> {
        self.parse_catalog(&read(path)?)
    }

    /// Read and parse a certificate file
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] if the file cannot be read, or any parse error.
    pub fn load_certificates(&self, path: &Path) -> Result<CertificateCatalog, CatalogError> {
        self.parse_certificates(&read(path)?)
    }

    fn build_courses(&self, records: Vec<CourseRecord>) -> Result<Vec<Course>, CatalogError> {
        records
            .into_iter()
            .map(|record| self.build_course(record))
            .collect()
    }

    fn build_course(&self, record: CourseRecord) -> Result<Course, CatalogError> {
        let key = CourseKey::new(&record.subject, &record.number)?;

        let mut offered = Vec::with_capacity(record.terms.len());
        for term in &record.terms {
            let term = term
                .parse::<Term>()
                .map_err(|source| CatalogError::UnknownTerm {
                    course: key.clone(),
                    source,
                })?;
            offered.push(term);
        }

        let prerequisite = match &record.prerequisite {
            Some(markup) => markup.resolve(self.restricted_subjects.as_slice())?,
            None => PrerequisiteExpr::default(),
        };

        let concurrent = record
            .concurrent
            .as_deref()
            .map(str::parse::<CourseKey>)
            .transpose()?;

        let name = if record.name.is_empty() {
            key.to_string()
        } else {
            record.name
        };

        let mut course = Course::new(key, name, record.credits)
            .offered_in(offered)
            .with_prerequisite(prerequisite)
            .with_description(record.description);
        course.concurrent = concurrent;
        Ok(course)
    }
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a catalog file with the default restricted subjects
///
/// # Errors
/// Returns a [`CatalogError`] if the file cannot be read or is invalid.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    CatalogLoader::default().load_catalog(path.as_ref())
}

/// Load a certificate file with the default restricted subjects
///
/// # Errors
/// Returns a [`CatalogError`] if the file cannot be read or is invalid.
pub fn load_certificates<P: AsRef<Path>>(path: P) -> Result<CertificateCatalog, CatalogError> {
    CatalogLoader::default().load_certificates(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Requirement;

    const SAMPLE: &str = r#"
program = "BS Computer Science"

[[course]]
subject = "CMP SCI"
number = "1250"
name = "Introduction to Computing"
category = "core"
terms = ["Fall", "Spring", "Summer"]

[[course]]
subject = "cmp sci"
number = "2250"
name = "Program Design II"
credits = 4
category = "core"
terms = ["Fall", "Spring"]
prerequisite = { one_of = [ { all_of = ["CMP SCI 1250", "MATH 1320"] }, "CMP SCI 1500" ] }

[[course]]
subject = "MATH"
number = "1320"
name = "Applied Statistics I"
category = "math"
terms = ["Fall"]

[[course]]
subject = "CMP SCI"
number = "1500"
category = "elective"
terms = ["Spring"]
concurrent = "CMP SCI 1250"
"#;

    #[test]
    fn test_parse_sample_catalog() {
        let catalog = Catalog::from_toml(SAMPLE).unwrap();
        assert_eq!(catalog.program, "BS Computer Science");
        assert_eq!(catalog.required().count(), 3);
        assert_eq!(catalog.electives().count(), 1);

        let cs2250 = catalog.get(&"CMP SCI 2250".parse().unwrap()).unwrap();
        assert_eq!(cs2250.credits, 4);
        assert!(cs2250.is_offered_in(Term::Spring));
        assert!(!cs2250.is_offered_in(Term::Summer));
        assert_eq!(cs2250.prerequisite.alternatives().len(), 2);
        assert_eq!(
            cs2250.prerequisite.alternatives()[1],
            Requirement::Single("CMP SCI 1500".parse().unwrap())
        );
    }

    #[test]
    fn test_defaults_applied() {
        let catalog = Catalog::from_toml(SAMPLE).unwrap();
        let elective = catalog.get(&"CMP SCI 1500".parse().unwrap()).unwrap();
        assert_eq!(elective.credits, DEFAULT_CREDIT_HOURS);
        assert_eq!(elective.name, "CMP SCI 1500");
        assert_eq!(elective.concurrent, Some("CMP SCI 1250".parse().unwrap()));
        assert!(elective.prerequisite.is_empty());
    }

    #[test]
    fn test_unknown_term_is_an_error() {
        let src = r#"
[[course]]
subject = "MATH"
number = "1030"
terms = ["Winter"]
"#;
        assert!(matches!(
            Catalog::from_toml(src),
            Err(CatalogError::UnknownTerm { .. })
        ));
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let src = r#"
[[course]]
subject = "MATH"
number = "1030"
category = "minor"
"#;
        assert!(matches!(Catalog::from_toml(src), Err(CatalogError::Toml(_))));
    }

    #[test]
    fn test_duplicate_course_is_an_error() {
        let src = r#"
[[course]]
subject = "MATH"
number = "1030"

[[course]]
subject = "math"
number = "1030"
category = "elective"
"#;
        assert!(matches!(
            Catalog::from_toml(src),
            Err(CatalogError::DuplicateCourse(_))
        ));
    }

    #[test]
    fn test_restricted_subjects_are_configurable() {
        let src = r#"
[[course]]
subject = "PHYSICS"
number = "2112"
prerequisite = { one_of = ["PHYSICS 2111", "Consent of instructor"] }
"#;
        let default = Catalog::from_toml(src).unwrap();
        let key: CourseKey = "PHYSICS 2112".parse().unwrap();
        assert!(default.get(&key).unwrap().prerequisite.is_empty());

        let loader = CatalogLoader::default().with_restricted_subjects(["physics"]);
        let custom = loader.parse_catalog(src).unwrap();
        assert_eq!(custom.get(&key).unwrap().prerequisite.alternatives().len(), 1);
    }

    #[test]
    fn test_parse_certificates() {
        let src = r#"
[[certificate]]
id = "AICERTReq"
name = "Artificial Intelligence"

  [[certificate.core]]
  subject = "CMP SCI"
  number = "4300"
  terms = ["Fall"]

  [[certificate.core]]
  subject = "CMP SCI"
  number = "4340"
  terms = ["Spring"]
  prerequisite = "CMP SCI 4300"

  [[certificate.electives]]
  subject = "CMP SCI"
  number = "4390"
  terms = ["Fall", "Spring"]
"#;
        let certs = CatalogLoader::default().parse_certificates(src).unwrap();
        let cert = certs.get("AICERTReq").unwrap();
        assert_eq!(cert.total_courses, DEFAULT_CERTIFICATE_COURSES);
        assert_eq!(cert.core.len(), 2);
        assert_eq!(cert.electives.len(), 1);
        assert_eq!(cert.elective_slots(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalog(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
