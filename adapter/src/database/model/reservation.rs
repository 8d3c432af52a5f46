use chrono::NaiveDate;
use kernel::model::{id::ReservationId, reservation::Reservation};

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub id: ReservationId,
    pub name: String,
    pub license_plate: String,
    pub spot_number: i32,
    pub date: NaiveDate,
}

impl From<ReservationRow> for Reservation {
    fn from(value: ReservationRow) -> Self {
        let ReservationRow {
            id,
            name,
            license_plate,
            spot_number,
            date,
        } = value;
        Reservation {
            id,
            name,
            license_plate,
            spot_number,
            date,
        }
    }
}
