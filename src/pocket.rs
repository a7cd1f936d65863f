use crate::config::Config;
use crate::error::PocketError;
use crate::model::{Action, Auth, GetRequest, SendRequest};
use std::time::Duration;

/// Timeout applied to every outbound provider call. A stalled provider
/// must not hold its inbound request open forever.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// How much of a provider error body is kept for diagnostics.
const ERROR_BODY_LIMIT: usize = 256;

const REQUEST_TOKEN_PATH: &str = "/v3/oauth/request.php";
const AUTHORIZE_PATH: &str = "/v3/oauth/authorize";
const GET_PATH: &str = "/v3/get";
const SEND_PATH: &str = "/v3/send";
const CONSENT_PATH: &str = "/auth/authorize";

const LIST_STATE: &str = "unread";
const LIST_DETAIL_TYPE: &str = "complete";
const LIST_COUNT: u32 = 5000;
const LIST_OFFSET: u32 = 0;

/// Client for the provider's v3 API. Built once at startup and shared;
/// it owns the consumer key so every envelope carries it.
pub struct Pocket {
    http: reqwest::Client,
    base_url: String,
    consumer_key: String,
}

impl Pocket {
    pub fn new(cfg: &Config) -> Result<Self, PocketError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Pocket {
            http,
            base_url: cfg.provider.api_url.trim_end_matches('/').to_string(),
            consumer_key: cfg.provider.consumer_key.clone(),
        })
    }

    /// First OAuth leg: trade the consumer key for a request token.
    ///
    /// The provider answers with `code=<token>` as the entire body, which
    /// is not guaranteed to be valid query encoding, so the token is taken
    /// by a literal prefix match.
    pub async fn request_token(&self, redirect_uri: &str) -> Result<String, PocketError> {
        let url = format!("{}{}", self.base_url, REQUEST_TOKEN_PATH);
        let params = [
            ("consumer_key", self.consumer_key.as_str()),
            ("redirect_uri", redirect_uri),
        ];

        let resp = self.http.post(&url).form(&params).send().await?;
        let body = Self::success_body(resp).await?;

        match body.strip_prefix("code=") {
            Some(code) => Ok(code.to_string()),
            None => Err(PocketError::MalformedBody(format!(
                "no code= prefix in request token reply: {}",
                truncate(&body)
            ))),
        }
    }

    /// Second OAuth leg: trade the request token for an access token. The
    /// token goes back to the caller, never into this process.
    pub async fn authorize(&self, code: &str) -> Result<String, PocketError> {
        let url = format!("{}{}", self.base_url, AUTHORIZE_PATH);
        let params = [
            ("consumer_key", self.consumer_key.as_str()),
            ("code", code),
        ];

        let resp = self.http.post(&url).form(&params).send().await?;
        let body = Self::success_body(resp).await?;

        query_value(&body, "access_token").ok_or_else(|| {
            PocketError::MalformedBody(format!(
                "no access_token in authorize reply: {}",
                truncate(&body)
            ))
        })
    }

    /// URL of the user-consent page for a freshly issued request token.
    /// The nested redirect URI is percent-encoded; the token itself is
    /// URL-safe and stays literal.
    pub fn authorize_url(&self, request_token: &str, redirect_uri: &str) -> String {
        format!(
            "{}{}?request_token={}&redirect_uri={}",
            self.base_url,
            CONSENT_PATH,
            request_token,
            urlencoding::encode(redirect_uri)
        )
    }

    /// Fetch the caller's unread links. The envelope is fixed: always the
    /// complete detail of the first 5000 unread items, offset zero.
    pub async fn fetch_unread(&self, access_token: &str) -> Result<reqwest::Response, PocketError> {
        let request = GetRequest {
            auth: self.auth(access_token),
            state: LIST_STATE.to_string(),
            detail_type: LIST_DETAIL_TYPE.to_string(),
            count: LIST_COUNT,
            offset: LIST_OFFSET,
        };

        let url = format!("{}{}", self.base_url, GET_PATH);
        let resp = self.http.post(&url).json(&request).send().await?;
        Self::check_status(resp).await
    }

    /// Send a batch of actions to the provider's modify endpoint.
    pub async fn send_actions(
        &self,
        access_token: &str,
        actions: Vec<Action>,
    ) -> Result<reqwest::Response, PocketError> {
        let request = SendRequest {
            auth: self.auth(access_token),
            actions,
        };

        let url = format!("{}{}", self.base_url, SEND_PATH);
        let resp = self.http.post(&url).json(&request).send().await?;
        Self::check_status(resp).await
    }

    /// Render the modify request without issuing it: method, URL, headers
    /// and body, for the dry-run log.
    pub fn render_send(
        &self,
        access_token: &str,
        actions: Vec<Action>,
    ) -> Result<String, PocketError> {
        let request = SendRequest {
            auth: self.auth(access_token),
            actions,
        };

        let url = format!("{}{}", self.base_url, SEND_PATH);
        let built = self.http.post(&url).json(&request).build()?;

        let mut dump = format!("{} {}\n", built.method(), built.url());
        for (name, value) in built.headers() {
            dump.push_str(name.as_str());
            dump.push_str(": ");
            dump.push_str(value.to_str().unwrap_or("<binary>"));
            dump.push('\n');
        }
        if let Some(body) = built.body().and_then(|b| b.as_bytes()) {
            dump.push('\n');
            dump.push_str(&String::from_utf8_lossy(body));
        }

        Ok(dump)
    }

    fn auth(&self, access_token: &str) -> Auth {
        Auth {
            consumer_key: self.consumer_key.clone(),
            access_token: access_token.to_string(),
        }
    }

    /// Read the whole body of a reply that must be small (the OAuth legs),
    /// mapping non-2xx statuses to errors first.
    async fn success_body(resp: reqwest::Response) -> Result<String, PocketError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(PocketError::Status {
                status,
                body: truncate(&body),
            });
        }
        Ok(body)
    }

    /// Pass a reply through unread so the caller can stream its body, but
    /// only when the provider reported success.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, PocketError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(PocketError::Status {
            status,
            body: truncate(&body),
        })
    }
}

/// Extract one value from a URL-encoded body like
/// `access_token=XYZ&username=u`.
fn query_value(body: &str, key: &str) -> Option<String> {
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| urlencoding::decode(v).ok())
        .map(|v| v.into_owned())
}

fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}
