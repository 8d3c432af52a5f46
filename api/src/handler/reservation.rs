use crate::model::reservation::{
    CreateReservationRequest, CreatedReservationResponse, MessageResponse, ReservationResponse,
    UpdateReservationRequest, UpdateReservationRequestWithId,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::ReservationId,
    reservation::event::{CreateReservation, DeleteReservation, UpdateReservation},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_reservation_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    registry
        .reservation_repository()
        .find_all()
        .await
        .map(|reservations| {
            reservations
                .into_iter()
                .map(ReservationResponse::from)
                .collect()
        })
        .map(Json)
}

pub async fn show_reservation(
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .and_then(|reservation| match reservation {
            Some(r) => Ok(Json(r.into())),
            None => Err(AppError::EntityNotFound("Reservation not found".into())),
        })
}

pub async fn register_reservation(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<CreatedReservationResponse>)> {
    req.validate()?;
    let event: CreateReservation = req.try_into()?;

    registry
        .reservation_repository()
        .create(event)
        .await
        .map(|id| (StatusCode::CREATED, Json(CreatedReservationResponse::new(id))))
}

pub async fn update_reservation(
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationRequest>,
) -> AppResult<Json<MessageResponse>> {
    req.validate()?;
    let event: UpdateReservation = UpdateReservationRequestWithId::new(reservation_id, req)
        .try_into()?;

    registry
        .reservation_repository()
        .update(event)
        .await
        .map(|_| Json(MessageResponse::updated()))
}

pub async fn delete_reservation(
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    registry
        .reservation_repository()
        .delete(DeleteReservation { reservation_id })
        .await
        .map(|_| Json(MessageResponse::deleted()))
}
