use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{PipelineError, PipelineResult};

/// Baixa a imagem e devolve os bytes exatamente como vieram.
///
/// Sem timeout próprio e sem retry: uma falha aqui encerra a requisição.
pub async fn fetch(client: &Client, url: &Url) -> PipelineResult<Vec<u8>> {
    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| PipelineError::Fetch(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(PipelineError::Fetch(format!("HTTP {} from {url}", status.as_u16())));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| PipelineError::Fetch(e.to_string()))?;

    debug!(bytes = bytes.len(), "image fetched");

    Ok(bytes.to_vec())
}
