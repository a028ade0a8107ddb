//! Certificate programs that can be layered on top of a degree

use super::CatalogError;
use crate::core::models::{Course, CourseKey};
use std::collections::BTreeMap;

/// Number of courses a certificate requires when the file does not say
pub const DEFAULT_CERTIFICATE_COURSES: u32 = 5;

/// An optional credential with its own core and elective courses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// Identifier used to select the certificate (e.g. `AICERTReq`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Courses needed to earn the certificate, core and electives together
    pub total_courses: u32,
    /// Courses every certificate student must take
    pub core: Vec<Course>,
    /// Courses that may fill the certificate's elective slots
    pub electives: Vec<Course>,
}

impl Certificate {
    /// Elective slots left once the core courses are counted
    #[must_use]
    pub fn elective_slots(&self) -> u32 {
        let core = u32::try_from(self.core.len()).unwrap_or(u32::MAX);
        self.total_courses.saturating_sub(core)
    }

    /// Core and elective courses
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.core.iter().chain(&self.electives)
    }

    /// Whether `key` is one of the certificate's courses
    #[must_use]
    pub fn contains(&self, key: &CourseKey) -> bool {
        self.courses().any(|c| &c.key == key)
    }
}

/// All certificates known to the planner, indexed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateCatalog {
    certificates: BTreeMap<String, Certificate>,
}

impl CertificateCatalog {
    /// Add a certificate
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateCertificate`] if the id is already present.
    pub fn insert(&mut self, certificate: Certificate) -> Result<(), CatalogError> {
        if self.certificates.contains_key(&certificate.id) {
            return Err(CatalogError::DuplicateCertificate(certificate.id));
        }
        self.certificates
            .insert(certificate.id.clone(), certificate);
        Ok(())
    }

    /// Look up a certificate by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Certificate> {
        self.certificates.get(id)
    }

    /// Known certificate ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.certificates.keys().map(String::as_str)
    }

    /// Certificates in id order
    pub fn iter(&self) -> impl Iterator<Item = &Certificate> {
        self.certificates.values()
    }

    /// Number of certificates
    #[must_use]
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Whether no certificates are loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(key: &str) -> Course {
        Course::new(key.parse().unwrap(), key, 3)
    }

    fn certificate(core: &[&str], total: u32) -> Certificate {
        Certificate {
            id: "AICERTReq".to_string(),
            name: "Artificial Intelligence".to_string(),
            total_courses: total,
            core: core.iter().map(|k| course(k)).collect(),
            electives: vec![course("CMP SCI 4390")],
        }
    }

    #[test]
    fn test_elective_slots() {
        assert_eq!(certificate(&["CMP SCI 4300", "CMP SCI 4340"], 5).elective_slots(), 3);
        assert_eq!(certificate(&["A 1", "B 2", "C 3"], 2).elective_slots(), 0);
    }

    #[test]
    fn test_contains_core_and_electives() {
        let cert = certificate(&["CMP SCI 4300"], 5);
        assert!(cert.contains(&"CMP SCI 4300".parse().unwrap()));
        assert!(cert.contains(&"CMP SCI 4390".parse().unwrap()));
        assert!(!cert.contains(&"CMP SCI 1250".parse().unwrap()));
    }

    #[test]
    fn test_duplicate_certificate_rejected() {
        let mut catalog = CertificateCatalog::default();
        catalog.insert(certificate(&[], 5)).unwrap();
        assert!(matches!(
            catalog.insert(certificate(&[], 5)),
            Err(CatalogError::DuplicateCertificate(id)) if id == "AICERTReq"
        ));
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["AICERTReq"]);
    }
}
