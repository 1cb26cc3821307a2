//! Repository for the `process_documents` table.

use fieldbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::document::ProcessDocument;

const COLUMNS: &str = "id, doc_type, work_order_reference, visit_id, note, created_at";

pub struct DocumentRepo;

impl DocumentRepo {
    /// Attach a document to a work order, returning the created row.
    pub async fn attach(
        pool: &PgPool,
        doc_type: &str,
        reference: &str,
        visit_id: DbId,
        note: &str,
    ) -> Result<ProcessDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO process_documents (doc_type, work_order_reference, visit_id, note) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcessDocument>(&query)
            .bind(doc_type)
            .bind(reference)
            .bind(visit_id)
            .bind(note)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_work_order(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Vec<ProcessDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM process_documents \
             WHERE work_order_reference = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ProcessDocument>(&query)
            .bind(reference)
            .fetch_all(pool)
            .await
    }
}
