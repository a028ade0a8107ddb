//! Certificate augmentation of the requirement pool

use super::state::ElectiveQuotas;
use crate::core::catalog::Certificate;
use crate::core::models::Course;
use logger::debug;

/// Merge a certificate's core courses into `pool` and rebalance elective quotas
///
/// Core courses not already required are appended and each one counts as a
/// major elective fulfilled by the certificate. The certificate's remaining
/// elective slots are reserved, and the 3000+ elective quota shrinks by both
/// amounts so certificate courses are not counted twice.
pub fn augment(pool: &mut Vec<Course>, quotas: &mut ElectiveQuotas, certificate: &Certificate) {
    let mut fulfilled = 0_u32;
    for course in &certificate.core {
        if pool.iter().any(|c| c.key == course.key) {
            continue;
        }
        pool.push(course.clone());
        fulfilled += 1;
    }

    let slots = certificate.elective_slots();
    quotas.fulfilled_by_certificate = fulfilled;
    quotas.certificate_slots = slots;
    quotas.upper_division = quotas.upper_division.saturating_sub(fulfilled + slots);

    debug!(
        "Certificate {} merged: {fulfilled} core courses added, {slots} elective slots, {} upper-division electives left",
        certificate.id, quotas.upper_division
    );
}
