#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with reference {reference}")]
    NotFound {
        entity: &'static str,
        reference: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
