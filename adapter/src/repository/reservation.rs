use crate::database::{model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::ReservationId,
    reservation::{
        conflict::{find_conflict, Conflict},
        event::{CreateReservation, DeleteReservation, UpdateReservation},
        Reservation,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // Pre-check against the same-date snapshot so conflicts come back
        // with a descriptive, precedence-ordered message. The unique indexes
        // remain the backstop for writers racing past this check.
        let same_day = fetch_same_date(&mut tx, event.date).await?;
        if let Some(conflict) = find_conflict(
            &same_day,
            event.spot_number,
            &event.license_plate,
            event.date,
            None,
        ) {
            return Err(conflict.into());
        }

        let res = sqlx::query(
            r#"
            INSERT INTO reservations (name, license_plate, spot_number, date)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&event.name)
        .bind(&event.license_plate)
        .bind(event.spot_number)
        .bind(event.date)
        .execute(&mut *tx)
        .await
        .map_err(conflict_or_operation_error)?;

        let reservation_id = ReservationId::new(res.last_insert_rowid());

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id, name, license_plate, spot_number, date
            FROM reservations
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id, name, license_plate, spot_number, date
            FROM reservations
            WHERE id = ?
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Reservation::from))
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let existing: Option<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id, name, license_plate, spot_number, date
            FROM reservations
            WHERE id = ?
            "#,
        )
        .bind(event.reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if existing.is_none() {
            return Err(AppError::EntityNotFound("Reservation not found".into()));
        }

        // The record under update is excluded from the comparison set, so
        // re-submitting its own values never self-conflicts.
        let same_day = fetch_same_date(&mut tx, event.date).await?;
        if let Some(conflict) = find_conflict(
            &same_day,
            event.spot_number,
            &event.license_plate,
            event.date,
            Some(event.reservation_id),
        ) {
            return Err(conflict.into());
        }

        let res = sqlx::query(
            r#"
            UPDATE reservations
            SET name = ?, license_plate = ?, spot_number = ?, date = ?
            WHERE id = ?
            "#,
        )
        .bind(&event.name)
        .bind(&event.license_plate)
        .bind(event.spot_number)
        .bind(event.date)
        .bind(event.reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(conflict_or_operation_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteReservation) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            DELETE FROM reservations
            WHERE id = ?
            "#,
        )
        .bind(event.reservation_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Reservation not found".into()));
        }

        Ok(())
    }
}

async fn fetch_same_date(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    date: chrono::NaiveDate,
) -> AppResult<Vec<Reservation>> {
    let rows: Vec<ReservationRow> = sqlx::query_as(
        r#"
        SELECT id, name, license_plate, spot_number, date
        FROM reservations
        WHERE date = ?
        "#,
    )
    .bind(date)
    .fetch_all(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    Ok(rows.into_iter().map(Reservation::from).collect())
}

// A unique-index violation means a concurrent writer won the race between the
// pre-check and the write. Surface it as the same conflict the pre-check
// would have reported.
fn conflict_or_operation_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(e) if e.is_unique_violation() => {
            if e.message().contains("spot_number") {
                Conflict::SpotTaken.into()
            } else {
                Conflict::PlateTaken.into()
            }
        }
        _ => AppError::SpecificOperationError(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;

    async fn setup(pool: SqlitePool) -> ReservationRepositoryImpl {
        let db = ConnectionPool::new(pool);
        db.setup_schema().await.unwrap();
        ReservationRepositoryImpl::new(db)
    }

    fn create_event(name: &str, plate: &str, spot: i32, date: &str) -> CreateReservation {
        CreateReservation::new(name.into(), plate.into(), spot, date.parse().unwrap())
    }

    #[sqlx::test]
    async fn test_register_and_fetch_reservation(pool: SqlitePool) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        let reservation_id = repo
            .create(create_event("Doe", "ABC1234", 2, "2025-09-25"))
            .await?;

        let res = repo.find_all().await?;
        assert_eq!(res.len(), 1);

        let res = repo.find_by_id(reservation_id).await?;
        assert!(res.is_some());

        let Reservation {
            id,
            name,
            license_plate,
            spot_number,
            date,
        } = res.unwrap();
        assert_eq!(id, reservation_id);
        assert_eq!(name, "Doe");
        assert_eq!(license_plate, "ABC1234");
        assert_eq!(spot_number, 2);
        assert_eq!(date, "2025-09-25".parse::<chrono::NaiveDate>()?);

        Ok(())
    }

    #[sqlx::test]
    async fn test_distinct_reservations_get_unique_ids(pool: SqlitePool) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        let first = repo
            .create(create_event("Doe", "ABC1234", 2, "2025-09-25"))
            .await?;
        let second = repo
            .create(create_event("Bob", "XYZ789", 3, "2025-09-25"))
            .await?;
        let third = repo
            .create(create_event("Eve", "ABC1234", 2, "2025-09-26"))
            .await?;

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);

        Ok(())
    }

    #[sqlx::test]
    async fn test_duplicate_spot_on_same_date_conflicts(pool: SqlitePool) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        repo.create(create_event("Doe", "ABC1234", 2, "2025-09-25"))
            .await?;

        let err = repo
            .create(create_event("Bob", "XYZ789", 2, "2025-09-25"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceConflict(_)));
        assert_eq!(
            err.to_string(),
            "Parking spot is already reserved for this date"
        );

        Ok(())
    }

    #[sqlx::test]
    async fn test_duplicate_plate_on_same_date_conflicts(pool: SqlitePool) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        repo.create(create_event("Doe", "ABC1234", 2, "2025-09-25"))
            .await?;

        let err = repo
            .create(create_event("Bob", "ABC1234", 7, "2025-09-25"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceConflict(_)));
        assert_eq!(
            err.to_string(),
            "This license plate already has a reservation for this date"
        );

        Ok(())
    }

    #[sqlx::test]
    async fn test_update_to_own_values_does_not_self_conflict(
        pool: SqlitePool,
    ) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        let reservation_id = repo
            .create(create_event("Doe", "ABC1234", 2, "2025-09-25"))
            .await?;

        repo.update(UpdateReservation::new(
            reservation_id,
            "Doe".into(),
            "ABC1234".into(),
            2,
            "2025-09-25".parse()?,
        ))
        .await?;

        Ok(())
    }

    #[sqlx::test]
    async fn test_update_replaces_the_whole_record(pool: SqlitePool) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        let reservation_id = repo
            .create(create_event("Doe", "ABC1234", 2, "2025-09-25"))
            .await?;

        repo.update(UpdateReservation::new(
            reservation_id,
            "Doe Updated".into(),
            "NEW42".into(),
            5,
            "2025-09-25".parse()?,
        ))
        .await?;

        let updated = repo.find_by_id(reservation_id).await?.unwrap();
        assert_eq!(updated.name, "Doe Updated");
        assert_eq!(updated.license_plate, "NEW42");
        assert_eq!(updated.spot_number, 5);

        Ok(())
    }

    #[sqlx::test]
    async fn test_update_into_taken_spot_conflicts(pool: SqlitePool) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        repo.create(create_event("Doe", "ABC1234", 2, "2025-09-25"))
            .await?;
        let other = repo
            .create(create_event("Bob", "XYZ789", 3, "2025-09-25"))
            .await?;

        let err = repo
            .update(UpdateReservation::new(
                other,
                "Bob".into(),
                "XYZ789".into(),
                2,
                "2025-09-25".parse()?,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceConflict(_)));

        Ok(())
    }

    #[sqlx::test]
    async fn test_update_unknown_id_is_not_found(pool: SqlitePool) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        let err = repo
            .update(UpdateReservation::new(
                ReservationId::new(9999),
                "Ghost".into(),
                "GHOST1".into(),
                4,
                "2025-09-25".parse()?,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_twice_is_not_found_the_second_time(
        pool: SqlitePool,
    ) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        let reservation_id = repo
            .create(create_event("Eve", "DEL999", 6, "2025-09-28"))
            .await?;

        repo.delete(DeleteReservation { reservation_id }).await?;

        let err = repo
            .delete(DeleteReservation { reservation_id })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));

        assert!(repo.find_by_id(reservation_id).await?.is_none());

        Ok(())
    }

    #[sqlx::test]
    async fn test_unique_index_backstops_the_spot_invariant(
        pool: SqlitePool,
    ) -> anyhow::Result<()> {
        let repo = setup(pool).await;

        repo.create(create_event("Doe", "ABC1234", 2, "2025-09-25"))
            .await?;

        // Insert behind the repository's back, as a racing writer would.
        let err = sqlx::query(
            r#"
            INSERT INTO reservations (name, license_plate, spot_number, date)
            VALUES ('Bob', 'XYZ789', 2, '2025-09-25')
            "#,
        )
        .execute(repo.db.inner_ref())
        .await
        .map_err(conflict_or_operation_error)
        .unwrap_err();

        assert!(matches!(err, AppError::ResourceConflict(_)));

        Ok(())
    }
}
