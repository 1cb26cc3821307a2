//! Repository for the `appointment_visits` and `sync_blocks` tables.

use fieldbook_core::gateways::VisitRecord;
use sqlx::PgPool;

use crate::models::visit::{AppointmentVisit, SyncBlock, SYNC_BLOCK_APPOINTMENT_BOOKED};

/// Column list for `appointment_visits` queries.
const COLUMNS: &str = "\
    id, work_order_reference, begin_at, end_at, scheduler_order_id, \
    scheduler_booking_id, slot_label, created_at";

/// Provides query operations for booked visits.
pub struct VisitRepo;

impl VisitRepo {
    /// Record a confirmed visit and block duplicate sync triggers for the
    /// work order, in a single transaction.
    pub async fn record(pool: &PgPool, visit: &VisitRecord) -> Result<AppointmentVisit, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO appointment_visits \
                (work_order_reference, begin_at, end_at, scheduler_order_id, \
                 scheduler_booking_id, slot_label) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AppointmentVisit>(&insert_query)
            .bind(&visit.reference)
            .bind(visit.begin)
            .bind(visit.end)
            .bind(&visit.order_id)
            .bind(&visit.booking_id)
            .bind(&visit.label)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO sync_blocks (work_order_reference, reason) VALUES ($1, $2)")
            .bind(&visit.reference)
            .bind(SYNC_BLOCK_APPOINTMENT_BOOKED)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// List visits for a work order, oldest first.
    pub async fn list_for_work_order(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Vec<AppointmentVisit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointment_visits \
             WHERE work_order_reference = $1 ORDER BY id"
        );
        sqlx::query_as::<_, AppointmentVisit>(&query)
            .bind(reference)
            .fetch_all(pool)
            .await
    }

    /// List sync blocks for a work order, oldest first.
    pub async fn list_sync_blocks(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Vec<SyncBlock>, sqlx::Error> {
        sqlx::query_as::<_, SyncBlock>(
            "SELECT id, work_order_reference, reason, created_at FROM sync_blocks \
             WHERE work_order_reference = $1 ORDER BY id",
        )
        .bind(reference)
        .fetch_all(pool)
        .await
    }
}
