//! Chamada POST no formato JSON 1.1 usado pelos serviços de visão e tradução.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const MAX_ERROR_SNIPPET: usize = 400;

/// Destino de um serviço: endpoint base mais token opcional.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    pub url: Url,
    pub bearer_token: Option<String>,
}

pub async fn call<B, R>(
    client: &Client,
    endpoint: &ServiceEndpoint,
    operation: &str,
    body: &B,
) -> Result<R, String>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    debug!(url = %endpoint.url, operation, "service request");

    let mut request = client
        .post(endpoint.url.clone())
        .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
        .header("X-Amz-Target", operation)
        .json(body);

    if let Some(token) = &endpoint.bearer_token {
        request = request.bearer_auth(token);
    }

    let resp = request.send().await.map_err(|e| e.to_string())?;
    let status = resp.status();

    // Texto primeiro: preserva a mensagem de erro quando o corpo não é o JSON esperado.
    let text = resp.text().await.map_err(|e| e.to_string())?;

    if !status.is_success() {
        return Err(extract_error_message(status, &text));
    }

    serde_json::from_str(&text).map_err(|e| format!("unexpected response from {operation}: {e}"))
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        let msg = v
            .get("message")
            .or_else(|| v.get("Message"))
            .and_then(|m| m.as_str());
        if let Some(msg) = msg {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
    }

    let trimmed = body_text.trim();
    let snippet: String = if trimmed.chars().count() > MAX_ERROR_SNIPPET {
        let cut: String = trimmed.chars().take(MAX_ERROR_SNIPPET).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    };

    format!("HTTP {}: {}", status.as_u16(), snippet)
}
