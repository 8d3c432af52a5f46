use crate::model::{
    id::ReservationId,
    reservation::{
        event::{CreateReservation, DeleteReservation, UpdateReservation},
        Reservation,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Validates the candidate against the active set and inserts it,
    /// returning the store-assigned id.
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    /// Returns all records in the store's natural order.
    async fn find_all(&self) -> AppResult<Vec<Reservation>>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    /// Replaces the whole record after re-running the conflict checks,
    /// excluding the record itself from the comparison set.
    async fn update(&self, event: UpdateReservation) -> AppResult<()>;
    async fn delete(&self, event: DeleteReservation) -> AppResult<()>;
}
