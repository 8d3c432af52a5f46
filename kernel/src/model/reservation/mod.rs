use crate::model::id::ReservationId;
use chrono::NaiveDate;

pub mod conflict;
pub mod event;

#[derive(Debug)]
pub struct Reservation {
    pub id: ReservationId,
    pub name: String,
    pub license_plate: String,
    pub spot_number: i32,
    pub date: NaiveDate,
}
