use thiserror::Error;

use crate::http::HttpError;

/// Errors raised while loading or rendering an explorer view.
///
/// Views that stitch several requests together (home, wallet detail, the
/// histories on the transaction page) log their partial failures instead of
/// returning them, so an `ExplorerError` means the view as a whole failed.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Invalid page {page} with {per_page} per page: both must be at least 1")]
    InvalidPage { page: u32, per_page: u32 },

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
