//! PostgreSQL implementation of the booking orchestrator's gateways.

use async_trait::async_trait;
use fieldbook_core::error::CoreError;
use fieldbook_core::gateways::{SystemOfRecordGateway, VisitRecord, WorkOrderGateway};
use fieldbook_core::types::DbId;
use fieldbook_core::work_order::WorkOrder;

use crate::repositories::{DocumentRepo, VisitRepo, WorkOrderRepo};
use crate::DbPool;

/// Work-order lookup and compensating writes backed by the database pool.
#[derive(Clone)]
pub struct PgSystemOfRecord {
    pool: DbPool,
}

impl PgSystemOfRecord {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn gateway_error(operation: &'static str, err: sqlx::Error) -> CoreError {
    tracing::error!(operation, error = %err, "System of record query failed");
    CoreError::Gateway(format!("{operation}: {err}"))
}

#[async_trait]
impl WorkOrderGateway for PgSystemOfRecord {
    async fn resolve(&self, reference: &str) -> Result<Option<WorkOrder>, CoreError> {
        let row = WorkOrderRepo::find_by_reference(&self.pool, reference)
            .await
            .map_err(|e| gateway_error("resolve work order", e))?;
        Ok(row.map(WorkOrder::from))
    }
}

#[async_trait]
impl SystemOfRecordGateway for PgSystemOfRecord {
    async fn record_visit(&self, visit: &VisitRecord) -> Result<Option<DbId>, CoreError> {
        let row = VisitRepo::record(&self.pool, visit)
            .await
            .map_err(|e| gateway_error("record visit", e))?;
        Ok(Some(row.id))
    }

    async fn attach_document(
        &self,
        doc_type: &str,
        reference: &str,
        internal_id: DbId,
        note: &str,
    ) -> Result<(), CoreError> {
        DocumentRepo::attach(&self.pool, doc_type, reference, internal_id, note)
            .await
            .map_err(|e| gateway_error("attach document", e))?;
        Ok(())
    }

    async fn issue_work_order(&self, reference: &str) -> Result<bool, CoreError> {
        WorkOrderRepo::issue(&self.pool, reference)
            .await
            .map_err(|e| gateway_error("issue work order", e))
    }
}
