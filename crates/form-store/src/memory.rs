use chrono::Utc;
use form_spec::{Form, FormDraft, Response};
use tracing::debug;
use uuid::Uuid;

use crate::paging::{Page, paginate};
use crate::store::{FormStore, StoreError};

/// Volatile backend used under test and for dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    forms: Vec<Form>,
    responses: Vec<Response>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Responses captured so far, oldest first.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }
}

impl FormStore for MemoryStore {
    fn list(&mut self, page: usize, page_size: usize) -> Result<Page<Form>, StoreError> {
        paginate(&self.forms, page, page_size)
    }

    fn get_all(&mut self) -> Result<Vec<Form>, StoreError> {
        Ok(self.forms.clone())
    }

    fn get_by_id(&mut self, id: Uuid) -> Result<Form, StoreError> {
        self.forms
            .iter()
            .find(|form| form.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    fn create(&mut self, draft: FormDraft) -> Result<Form, StoreError> {
        let form = Form {
            id: Uuid::new_v4(),
            title: draft.title,
            questions: draft.questions,
            created_at: Utc::now(),
        };
        debug!(id = %form.id, title = %form.title, "created form in memory");
        self.forms.insert(0, form.clone());
        Ok(form)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.forms.retain(|form| form.id != id);
        Ok(())
    }

    fn save_response(&mut self, response: Response) -> Result<(), StoreError> {
        debug!(form_id = %response.form_id, "captured response in memory");
        self.responses.push(response);
        Ok(())
    }
}
