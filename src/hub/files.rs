//! Hub files: fetch a file, stage edits, sign and upload them.

use super::HubSession;
use crate::error::{ConnectorError, ConnectorResult};
use serde_json::{json, Value};

pub struct HubFiles<'a> {
    session: &'a HubSession,
}

impl<'a> HubFiles<'a> {
    pub(super) fn new(session: &'a HubSession) -> Self {
        Self { session }
    }

    /// GET `{endpoint}/{id}`. A missing file for the session's own address is
    /// a fresh, empty file rather than an error.
    pub async fn get(&self, id: &str) -> ConnectorResult<Value> {
        let url = format!("{}/{}", self.session.endpoint(), id);
        let response = self.session.http().get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND && self.is_own(id) {
            tracing::debug!(id, "no hub file yet, starting a new one");
            return Ok(new_file(id));
        }
        if !status.is_success() {
            return Err(ConnectorError::Http { status: status.as_u16() });
        }
        Ok(response.json().await?)
    }

    /// Stage a changed file for the next [`sync`](Self::sync). A staged file
    /// with the same `id` is replaced.
    pub fn set(&self, file: Value) -> ConnectorResult<()> {
        let id = file_id(&file)?.to_string();
        let mut staged = self.session.staged().borrow_mut();
        match staged.iter_mut().find(|f| f["id"].as_str() == Some(id.as_str())) {
            Some(existing) => *existing = file,
            None => staged.push(file),
        }
        Ok(())
    }

    pub fn staged(&self) -> Vec<Value> {
        self.session.staged().borrow().clone()
    }

    /// Sign every staged file and PUT them to the hub. Uploaded files leave
    /// staging only after the hub accepts them; files staged while a
    /// signature is pending stay for the next sync.
    pub async fn sync(&self) -> ConnectorResult<()> {
        let snapshot = self.staged();
        if snapshot.is_empty() {
            return Ok(());
        }
        let mut contents = snapshot.clone();

        let now = chrono::Utc::now().to_rfc3339();
        for file in contents.iter_mut() {
            if let Some(obj) = file.as_object_mut() {
                obj.remove("signature");
                obj.insert("date_updated".into(), Value::String(now.clone()));
            }
            let message = format!(
                "[RSS3] I am confirming the results of changes to my file {}: {}",
                file_id(file)?,
                serde_json::to_string(file)?
            );
            let signature = self.session.sign(&message).await?;
            if let Some(obj) = file.as_object_mut() {
                obj.insert("signature".into(), Value::String(signature));
            }
        }

        let response = self
            .session
            .http()
            .put(self.session.endpoint())
            .json(&json!({ "contents": contents }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ConnectorError::Http { status: response.status().as_u16() });
        }

        tracing::info!(files = contents.len(), "hub files synced");
        self.session.staged().borrow_mut().retain(|file| !snapshot.contains(file));
        Ok(())
    }

    fn is_own(&self, id: &str) -> bool {
        self.session
            .address()
            .is_some_and(|a| a.as_str().eq_ignore_ascii_case(id))
    }
}

fn file_id(file: &Value) -> ConnectorResult<&str> {
    file.get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| ConnectorError::Decode("hub file has no 'id'".into()))
}

fn new_file(id: &str) -> Value {
    let now = chrono::Utc::now().to_rfc3339();
    json!({
        "id": id,
        "version": "v0.1.0",
        "date_created": now,
        "date_updated": now,
    })
}
