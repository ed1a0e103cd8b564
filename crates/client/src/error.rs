use thiserror::Error;

/// Failures talking to the page-content endpoints.
///
/// A missing page on load is not represented here — it is a normal outcome
/// that yields a fresh default page. Save failures leave the in-memory tree
/// untouched; the operator retries manually.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("could not load the page: {0}")]
    LoadFailed(String),
    #[error("could not save the page: {0}")]
    SaveFailed(String),
    #[error("could not delete the page: {0}")]
    DeleteFailed(String),
}
