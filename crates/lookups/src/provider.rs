use async_trait::async_trait;

/// Fixed number of records requested from every provider.
pub const RESULT_CAP: u32 = 5;

/// Sent on every lookup; Wikimedia rejects requests without one.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client shared by the lookup providers: bounded timeout, identifying user agent.
pub fn http_client(timeout: std::time::Duration) -> crate::Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

/// One read-only search API. Implementations issue a single GET per call.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    type Record: Send;

    fn name(&self) -> &'static str;

    /// False when a required credential is missing; `search` must not be
    /// called then.
    fn is_configured(&self) -> bool {
        true
    }

    async fn search(&self, query: &str) -> crate::Result<Vec<Self::Record>>;
}

/// Shared status handling: anything but 200 becomes `LookupError::Api`.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> crate::Result<T> {
    let status = resp.status();
    if status != reqwest::StatusCode::OK {
        let body = resp.text().await.unwrap_or_default();
        return Err(crate::LookupError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
