use crate::model::id::ReservationId;
use chrono::NaiveDate;
use derive_new::new;

#[derive(new)]
pub struct CreateReservation {
    pub name: String,
    pub license_plate: String,
    pub spot_number: i32,
    pub date: NaiveDate,
}

// Updates replace the whole record, so the event carries every field.
#[derive(new)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub name: String,
    pub license_plate: String,
    pub spot_number: i32,
    pub date: NaiveDate,
}

#[derive(Debug)]
pub struct DeleteReservation {
    pub reservation_id: ReservationId,
}
