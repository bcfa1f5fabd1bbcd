use form_spec::{Form, FormDraft, Response};
use thiserror::Error;
use uuid::Uuid;

use crate::paging::Page;

/// Failures surfaced by a persistence backend. None are fatal: callers report
/// once and abandon the operation; writes are whole-record replacements, so
/// there is no partial state to roll back.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("form {id} not found; list available forms to recover")]
    NotFound { id: Uuid },
    #[error("page size must be at least 1")]
    BadPageSize,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Key-value persistence consumed by the builder and fill flows. Injected as a
/// capability so tests can substitute an in-memory backend.
pub trait FormStore {
    /// Paginated listing, newest first. Pages are 1-based.
    fn list(&mut self, page: usize, page_size: usize) -> Result<Page<Form>, StoreError>;

    /// Every stored form, newest first.
    fn get_all(&mut self) -> Result<Vec<Form>, StoreError>;

    fn get_by_id(&mut self, id: Uuid) -> Result<Form, StoreError>;

    /// Persists a draft; the store assigns the id and creation timestamp.
    fn create(&mut self, draft: FormDraft) -> Result<Form, StoreError>;

    /// Fire-and-forget: deleting an unknown id is not an error.
    fn delete(&mut self, id: Uuid) -> Result<(), StoreError>;

    /// Append-only; responses are never read back or updated by this system.
    fn save_response(&mut self, response: Response) -> Result<(), StoreError>;
}
