//! Repository for the `work_orders` table.

use sqlx::PgPool;

use crate::models::work_order::{
    CreateWorkOrder, WorkOrderRow, STATUS_CANCELLED, STATUS_ISSUED,
};

/// Column list for `work_orders` queries.
const COLUMNS: &str = "\
    id, reference, priority, property_reference, contact_name, contact_phone, \
    trade_tasks, status, issued_at, created_at, updated_at";

/// Provides query operations for work orders.
pub struct WorkOrderRepo;

impl WorkOrderRepo {
    /// Insert a new work order, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWorkOrder) -> Result<WorkOrderRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_orders \
                (reference, priority, property_reference, contact_name, contact_phone, trade_tasks) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkOrderRow>(&query)
            .bind(&input.reference)
            .bind(&input.priority)
            .bind(&input.property_reference)
            .bind(&input.contact_name)
            .bind(&input.contact_phone)
            .bind(&input.trade_tasks)
            .fetch_one(pool)
            .await
    }

    /// Find a work order by its external reference.
    pub async fn find_by_reference(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Option<WorkOrderRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_orders WHERE reference = $1");
        sqlx::query_as::<_, WorkOrderRow>(&query)
            .bind(reference)
            .fetch_optional(pool)
            .await
    }

    /// Mark a work order as issued. Returns `false` if the work order does
    /// not exist or has been cancelled.
    pub async fn issue(pool: &PgPool, reference: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE work_orders \
             SET status = $2, issued_at = NOW(), updated_at = NOW() \
             WHERE reference = $1 AND status <> $3",
        )
        .bind(reference)
        .bind(STATUS_ISSUED)
        .bind(STATUS_CANCELLED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Set a work order's status directly.
    pub async fn set_status(pool: &PgPool, reference: &str, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE work_orders SET status = $2, updated_at = NOW() WHERE reference = $1",
        )
        .bind(reference)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
