use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use form_spec::{Form, FormDraft, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use crate::paging::{Page, paginate};
use crate::store::{FormStore, StoreError};

const FORMS_FILE: &str = "forms.json";
const RESPONSES_FILE: &str = "responses.json";

/// JSON-file-backed store: the local-storage analog. Forms and responses each
/// live in a single whole-record file under the data directory, so every write
/// replaces the full record and a missing file reads as empty.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        debug!(dir = %data_dir.display(), "opened form store");
        Ok(Self { data_dir })
    }

    fn forms_path(&self) -> PathBuf {
        self.data_dir.join(FORMS_FILE)
    }

    fn responses_path(&self) -> PathBuf {
        self.data_dir.join(RESPONSES_FILE)
    }

    fn load_forms(&self) -> Result<Vec<Form>, StoreError> {
        read_records(&self.forms_path())
    }

    fn save_forms(&self, forms: &[Form]) -> Result<(), StoreError> {
        write_records(&self.forms_path(), forms)
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let contents = serde_json::to_string_pretty(records)?;
    fs::write(path, contents)?;
    Ok(())
}

impl FormStore for JsonFileStore {
    fn list(&mut self, page: usize, page_size: usize) -> Result<Page<Form>, StoreError> {
        let forms = self.load_forms()?;
        paginate(&forms, page, page_size)
    }

    fn get_all(&mut self) -> Result<Vec<Form>, StoreError> {
        self.load_forms()
    }

    fn get_by_id(&mut self, id: Uuid) -> Result<Form, StoreError> {
        self.load_forms()?
            .into_iter()
            .find(|form| form.id == id)
            .ok_or(StoreError::NotFound { id })
    }

    fn create(&mut self, draft: FormDraft) -> Result<Form, StoreError> {
        let mut forms = self.load_forms()?;
        let form = Form {
            id: Uuid::new_v4(),
            title: draft.title,
            questions: draft.questions,
            created_at: Utc::now(),
        };
        // Newest first, so listings read in reverse creation order.
        forms.insert(0, form.clone());
        self.save_forms(&forms)?;
        info!(id = %form.id, title = %form.title, "created form");
        Ok(form)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        let mut forms = self.load_forms()?;
        forms.retain(|form| form.id != id);
        self.save_forms(&forms)?;
        info!(%id, "deleted form");
        Ok(())
    }

    fn save_response(&mut self, response: Response) -> Result<(), StoreError> {
        let mut responses: Vec<Response> = read_records(&self.responses_path())?;
        responses.push(response);
        write_records(&self.responses_path(), &responses)?;
        debug!(count = responses.len(), "saved response");
        Ok(())
    }
}
