//! NocoDB helpers: UI deep links and API token creation.
//!
//! deep_link(base, workspace, project) -> "{base}/#/{workspace}/{project}"
//! create_token(..) -> POST {base}/api/v1/db/meta/projects/{project}/api-tokens

use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Upper bound for the token request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default token description.
pub const DEFAULT_TOKEN_NAME: &str = "mcp-onboarder";

/// Shown after any token creation failure.
pub const PERMISSION_HINT: &str = "Tip: ensure xc-token has meta/project admin rights.";

#[derive(Debug, Error)]
pub enum NocoError {
    #[error("invalid base url '{0}'")]
    InvalidUrl(String),
    #[error("request timed out after {}s", REQUEST_TIMEOUT.as_secs())]
    Timeout,
    #[error("could not connect to {0}")]
    Connect(String),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for NocoError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NocoError::Timeout
        } else if e.is_connect() {
            let host = e
                .url()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_else(|| "server".to_string());
            NocoError::Connect(host)
        } else if let Some(status) = e.status() {
            NocoError::Status(status)
        } else {
            // without the URL: it can be long and tells the user nothing new
            NocoError::Transport(e.without_url().to_string())
        }
    }
}

/// Strip exactly one trailing slash.
fn trim_base(base: &str) -> &str {
    base.strip_suffix('/').unwrap_or(base)
}

pub fn deep_link(base: &str, workspace_id: &str, project_id: &str) -> String {
    format!("{}/#/{}/{}", trim_base(base), workspace_id, project_id)
}

pub fn token_endpoint(base: &str, project_id: &str) -> String {
    format!(
        "{}/api/v1/db/meta/projects/{}/api-tokens",
        trim_base(base),
        project_id
    )
}

/// Create an API token; returns the raw response body on 2xx.
pub async fn create_token(
    base: &str,
    project_id: &str,
    xc_token: &str,
    name: &str,
) -> Result<String, NocoError> {
    let endpoint = token_endpoint(base, project_id);
    let url = Url::parse(&endpoint).map_err(|_| NocoError::InvalidUrl(base.to_string()))?;

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| NocoError::Transport(e.to_string()))?;

    crate::log_info!("POST {}", url);
    let resp = client
        .post(url)
        .header("xc-token", xc_token)
        .json(&serde_json::json!({ "description": name }))
        .send()
        .await?
        .error_for_status()?;

    Ok(resp.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_strips_one_trailing_slash() {
        assert_eq!(
            deep_link("https://x.example/", "w1", "p1"),
            "https://x.example/#/w1/p1"
        );
        assert_eq!(
            deep_link("https://x.example", "w1", "p1"),
            "https://x.example/#/w1/p1"
        );
        assert_eq!(
            deep_link("https://x.example//", "w1", "p1"),
            "https://x.example//#/w1/p1"
        );
    }

    #[test]
    fn endpoint_format() {
        assert_eq!(
            token_endpoint("https://app.nocodb.com/", "p_9"),
            "https://app.nocodb.com/api/v1/db/meta/projects/p_9/api-tokens"
        );
    }

    #[test]
    fn invalid_base_rejected_before_network() {
        let res = crate::utils::block_on(create_token("not a url", "p", "t", "n")).unwrap();
        assert!(matches!(res, Err(NocoError::InvalidUrl(_))));
    }

    #[test]
    fn error_messages_are_one_line() {
        let msgs = [
            NocoError::Timeout.to_string(),
            NocoError::Connect("h".into()).to_string(),
            NocoError::Status(reqwest::StatusCode::FORBIDDEN).to_string(),
        ];
        assert_eq!(msgs[0], "request timed out after 30s");
        assert_eq!(msgs[2], "HTTP 403 Forbidden");
        for m in msgs {
            assert!(!m.contains('\n'));
        }
    }
}
