use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaginationError {
    /// Construction-time misuse, never retried.
    #[error("invalid pagination configuration: {0}")]
    InvalidConfiguration(String),

    /// A caller asked for a page that does not exist.
    #[error("page {requested} is out of range (1..={page_count})")]
    OutOfRange { requested: usize, page_count: usize },

    /// The display backend refused the update (message deleted, missing permissions, ...).
    #[error("failed to display page: {0}")]
    Display(#[from] serenity::Error),
}
