//! Schedule output model: semester records and the items placed in them

use super::{Course, CourseKey, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a generic filler course inserted when no required course can be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillerKind {
    /// General education or free elective
    GenEdOrElective,
    /// 3000+-level CMP SCI elective
    UpperDivisionElective,
    /// Elective slot belonging to the selected certificate
    CertificateElective,
}

impl FillerKind {
    /// Label shown in schedules
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GenEdOrElective => "Gen Ed or Elective",
            Self::UpperDivisionElective => "CMP SCI 3000+ level elective",
            Self::CertificateElective => "CMP SCI CERTIFICATE elective",
        }
    }

    /// Whether this filler counts toward the term's combined CS+Math credits
    #[must_use]
    pub const fn is_cs_math(self) -> bool {
        matches!(self, Self::UpperDivisionElective | Self::CertificateElective)
    }
}

impl fmt::Display for FillerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of a semester's course list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduledItem {
    /// A catalog course
    Course {
        /// Course key
        key: CourseKey,
        /// Display name
        name: String,
        /// Catalog description
        #[serde(default)]
        description: String,
        /// Credit hours
        credits: u32,
    },
    /// A generic filler slot
    Filler {
        /// Filler category
        filler: FillerKind,
        /// Credit hours
        credits: u32,
    },
}

impl ScheduledItem {
    /// Entry for a catalog course
    #[must_use]
    pub fn course(course: &Course) -> Self {
        Self::Course {
            key: course.key.clone(),
            name: course.name.clone(),
            description: course.description.clone(),
            credits: course.credits,
        }
    }

    /// Credit hours of this entry
    #[must_use]
    pub const fn credits(&self) -> u32 {
        match self {
            Self::Course { credits, .. } | Self::Filler { credits, .. } => *credits,
        }
    }

    /// Course key, if this entry is a catalog course
    #[must_use]
    pub const fn key(&self) -> Option<&CourseKey> {
        match self {
            Self::Course { key, .. } => Some(key),
            Self::Filler { .. } => None,
        }
    }

    /// Filler category, if this entry is a filler
    #[must_use]
    pub const fn filler(&self) -> Option<FillerKind> {
        match self {
            Self::Course { .. } => None,
            Self::Filler { filler, .. } => Some(*filler),
        }
    }

    /// Short code: the course key or the filler label
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Course { key, .. } => key.as_str(),
            Self::Filler { filler, .. } => filler.label(),
        }
    }

    /// Title shown next to the code (empty for fillers)
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Course { name, .. } => name,
            Self::Filler { .. } => "",
        }
    }
}

/// A closed semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterRecord {
    /// Term of the semester
    pub term: Term,
    /// Zero-based position in the plan
    pub semester_index: u32,
    /// Total credit hours placed
    pub credit_total: u32,
    /// Courses and fillers in placement order
    pub course_list: Vec<ScheduledItem>,
}

impl SemesterRecord {
    /// Number of filler entries of `kind`
    #[must_use]
    pub fn filler_count(&self, kind: FillerKind) -> usize {
        self.course_list
            .iter()
            .filter(|item| item.filler() == Some(kind))
            .count()
    }

    /// Keys of the catalog courses in this semester
    pub fn course_keys(&self) -> impl Iterator<Item = &CourseKey> {
        self.course_list.iter().filter_map(ScheduledItem::key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filler_labels() {
        assert_eq!(FillerKind::GenEdOrElective.to_string(), "Gen Ed or Elective");
        assert_eq!(
            FillerKind::UpperDivisionElective.label(),
            "CMP SCI 3000+ level elective"
        );
        assert!(FillerKind::CertificateElective.is_cs_math());
        assert!(!FillerKind::GenEdOrElective.is_cs_math());
    }

    #[test]
    fn test_item_accessors() {
        let course = Course::new("CMP SCI 1250".parse().unwrap(), "Intro to Computing", 3);
        let item = ScheduledItem::course(&course);
        assert_eq!(item.credits(), 3);
        assert_eq!(item.code(), "CMP SCI 1250");
        assert_eq!(item.title(), "Intro to Computing");
        assert!(item.filler().is_none());

        let filler = ScheduledItem::Filler {
            filler: FillerKind::GenEdOrElective,
            credits: 3,
        };
        assert!(filler.key().is_none());
        assert_eq!(filler.code(), "Gen Ed or Elective");
        assert_eq!(filler.title(), "");
    }

    #[test]
    fn test_semester_record_counts() {
        let course = Course::new("MATH 1320".parse().unwrap(), "Statistics", 3);
        let record = SemesterRecord {
            term: Term::Fall,
            semester_index: 0,
            credit_total: 9,
            course_list: vec![
                ScheduledItem::course(&course),
                ScheduledItem::Filler {
                    filler: FillerKind::GenEdOrElective,
                    credits: 3,
                },
                ScheduledItem::Filler {
                    filler: FillerKind::GenEdOrElective,
                    credits: 3,
                },
            ],
        };
        assert_eq!(record.filler_count(FillerKind::GenEdOrElective), 2);
        assert_eq!(record.filler_count(FillerKind::UpperDivisionElective), 0);
        assert_eq!(record.course_keys().count(), 1);
    }
}
