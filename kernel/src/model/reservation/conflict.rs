use crate::model::id::ReservationId;
use crate::model::reservation::Reservation;
use chrono::NaiveDate;
use shared::error::AppError;
use thiserror::Error;

/// A would-be reservation that collides with an existing one on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("Parking spot is already reserved for this date")]
    SpotTaken,
    #[error("This license plate already has a reservation for this date")]
    PlateTaken,
}

impl From<Conflict> for AppError {
    fn from(value: Conflict) -> Self {
        AppError::ResourceConflict(value.to_string())
    }
}

/// Decides whether a candidate reservation collides with the existing set.
///
/// The spot check runs over the whole set before the plate check, so when both
/// invariants are violated the spot conflict is the one reported. Records whose
/// id equals `excluded` are skipped, which lets an update re-submit the
/// record's own values without self-conflicting.
pub fn find_conflict(
    existing: &[Reservation],
    spot_number: i32,
    license_plate: &str,
    date: NaiveDate,
    excluded: Option<ReservationId>,
) -> Option<Conflict> {
    let same_day = || {
        existing
            .iter()
            .filter(|r| r.date == date && Some(r.id) != excluded)
    };

    if same_day().any(|r| r.spot_number == spot_number) {
        return Some(Conflict::SpotTaken);
    }
    if same_day().any(|r| r.license_plate == license_plate) {
        return Some(Conflict::PlateTaken);
    }
    None
}
