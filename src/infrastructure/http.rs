use crate::error::Result;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the HTTP client a gateway reuses for all its vendor calls
/// (connection pooling).
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;
    Ok(client)
}

/// Body of a failed vendor response, truncated for error messages and logs.
pub async fn error_body(response: reqwest::Response) -> String {
    truncate_body(response.text().await.unwrap_or_default())
}

pub fn truncate_body(mut body: String) -> String {
    const MAX_LEN: usize = 512;
    if body.len() > MAX_LEN {
        let mut cut = MAX_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}
