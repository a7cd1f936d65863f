use serde::Serialize;

/// Credentials carried by every provider envelope. Both fields are always
/// present, even when the caller supplied no token; the provider decides
/// what an empty token means.
#[derive(Debug, Serialize)]
pub struct Auth {
    pub consumer_key: String,
    pub access_token: String,
}

/// Envelope for the provider's retrieve endpoint.
#[derive(Debug, Serialize)]
pub struct GetRequest {
    #[serde(flatten)]
    pub auth: Auth,
    pub state: String,
    #[serde(rename = "detailType")]
    pub detail_type: String,
    pub count: u32,
    pub offset: u32,
}

/// One unit of work for the provider's batch modify endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Action {
    pub item_id: String,
    pub action: String,
}

/// Envelope for the provider's batch modify endpoint.
#[derive(Debug, Serialize)]
pub struct SendRequest {
    #[serde(flatten)]
    pub auth: Auth,
    pub actions: Vec<Action>,
}
