use crate::{StorageError, StorageResult};
use jsonseed_types::{DocumentId, SeedValue};

/// A document ready to be written: its `_id` and its JSON body.
#[derive(Debug, Clone)]
pub(crate) struct PreparedDocument {
    pub id: String,
    pub body: serde_json::Value,
}

/// Checks that `document` is an object and gives it an `_id` if it lacks
/// one. A generated `_id` is placed first, where document stores put it.
pub(crate) fn prepare(document: &SeedValue) -> StorageResult<PreparedDocument> {
    let Some(members) = document.as_object() else {
        return Err(StorageError::InvalidDocument(format!(
            "expected an object, got {}",
            document.kind()
        )));
    };

    let mut body = serde_json::Map::with_capacity(members.len() + 1);
    let id = match members.get("_id") {
        Some(SeedValue::String(id)) => id.clone(),
        Some(other) => id_text(other),
        None => {
            let id = DocumentId::new().to_string();
            body.insert("_id".to_string(), serde_json::Value::String(id.clone()));
            id
        }
    };
    body.extend(members.iter().map(|(key, value)| (key.clone(), value.to_json())));

    Ok(PreparedDocument {
        id,
        body: serde_json::Value::Object(body),
    })
}

/// Key text of a non-string `_id`, matching how the body stores it:
/// timestamps as their ISO string, other values as JSON text.
fn id_text(id: &SeedValue) -> String {
    match id.to_json() {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}
