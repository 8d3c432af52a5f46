use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::ReservationId,
    reservation::{
        event::{CreateReservation, UpdateReservation},
        Reservation,
    },
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: name, licensePlate, spotNumber, date";

// The lot has 20 numbered spots; the store itself does not bound the column,
// so the bound lives here at the boundary.
pub const MAX_SPOT_NUMBER: i32 = 20;

// Fields arrive as Option so that an absent field is reported as a 400 with
// a message, not as a body-deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(required, length(min = 1))]
    pub name: Option<String>,
    #[garde(required, length(min = 2, max = 8))]
    pub license_plate: Option<String>,
    #[garde(required, range(min = 1, max = MAX_SPOT_NUMBER))]
    pub spot_number: Option<i32>,
    #[garde(required)]
    pub date: Option<NaiveDate>,
}

impl TryFrom<CreateReservationRequest> for CreateReservation {
    type Error = AppError;

    fn try_from(value: CreateReservationRequest) -> Result<Self, Self::Error> {
        let CreateReservationRequest {
            name: Some(name),
            license_plate: Some(license_plate),
            spot_number: Some(spot_number),
            date: Some(date),
        } = value
        else {
            return Err(AppError::InvalidRequest(MISSING_FIELDS_MESSAGE.into()));
        };
        Ok(CreateReservation::new(name, license_plate, spot_number, date))
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    #[garde(required, length(min = 1))]
    pub name: Option<String>,
    #[garde(required, length(min = 2, max = 8))]
    pub license_plate: Option<String>,
    #[garde(required, range(min = 1, max = MAX_SPOT_NUMBER))]
    pub spot_number: Option<i32>,
    #[garde(required)]
    pub date: Option<NaiveDate>,
}

#[derive(new)]
pub struct UpdateReservationRequestWithId(ReservationId, UpdateReservationRequest);

impl TryFrom<UpdateReservationRequestWithId> for UpdateReservation {
    type Error = AppError;

    fn try_from(value: UpdateReservationRequestWithId) -> Result<Self, Self::Error> {
        let UpdateReservationRequestWithId(reservation_id, request) = value;
        let UpdateReservationRequest {
            name: Some(name),
            license_plate: Some(license_plate),
            spot_number: Some(spot_number),
            date: Some(date),
        } = request
        else {
            return Err(AppError::InvalidRequest(MISSING_FIELDS_MESSAGE.into()));
        };
        Ok(UpdateReservation::new(
            reservation_id,
            name,
            license_plate,
            spot_number,
            date,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub name: String,
    pub license_plate: String,
    pub spot_number: i32,
    pub date: NaiveDate,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            id,
            name,
            license_plate,
            spot_number,
            date,
        } = value;
        Self {
            id,
            name,
            license_plate,
            spot_number,
            date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReservationResponse {
    pub message: &'static str,
    pub reservation_id: ReservationId,
}

impl CreatedReservationResponse {
    pub fn new(reservation_id: ReservationId) -> Self {
        Self {
            message: "Reservation created successfully",
            reservation_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn updated() -> Self {
        Self {
            message: "Reservation updated successfully",
        }
    }

    pub fn deleted() -> Self {
        Self {
            message: "Reservation deleted successfully",
        }
    }
}
