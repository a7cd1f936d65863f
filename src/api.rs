use serde::{Deserialize, Serialize};

/// One entry of an inbound batch-delete body: either a bare id string or
/// an object with at least an `id` field. Only the id is used; any other
/// field is ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DeleteItem {
    Id(String),
    Link { id: String },
}

impl DeleteItem {
    pub fn into_id(self) -> String {
        match self {
            DeleteItem::Id(id) => id,
            DeleteItem::Link { id } => id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccessTokenParams {
    pub request_token: Option<String>,
}

/// Acknowledgement for a delete. A dry run answers with the same shape
/// as a live delete.
#[derive(Debug, Serialize)]
pub struct DoneResponse {
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
