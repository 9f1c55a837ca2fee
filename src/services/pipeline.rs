use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, error};
use url::Url;

use crate::error::{PipelineError, PipelineResult};
use crate::model::event::{Event, Response};
use crate::services::detection::{Detection, LabelDetector};
use crate::services::translation::{self, TextTranslator, TranslationMode};
use crate::services::{image, report};

/// Orquestra uma requisição: baixa a imagem, detecta, traduz e formata.
///
/// Não guarda estado mutável; uma instância atende todas as requisições do processo.
pub struct RequestPipeline {
    http: Client,
    detector: Arc<dyn LabelDetector>,
    translator: Arc<dyn TextTranslator>,
    mode: TranslationMode,
}

impl RequestPipeline {
    pub fn new(
        http: Client,
        detector: Arc<dyn LabelDetector>,
        translator: Arc<dyn TextTranslator>,
        mode: TranslationMode,
    ) -> Self {
        Self {
            http,
            detector,
            translator,
            mode,
        }
    }

    /// Ponto de entrada: qualquer falha vira a mesma resposta 500.
    pub async fn handle(&self, event: &Event) -> Response {
        match self.respond(event).await {
            Ok(body) => Response::ok(body),
            Err(e) => {
                error!(error = %e, details = ?e, "request failed");
                Response::internal_error()
            }
        }
    }

    async fn respond(&self, event: &Event) -> PipelineResult<String> {
        let url = image_url(event)?;
        let report = self.run(&url).await?;
        Ok(report::body(&report))
    }

    pub async fn run(&self, url: &Url) -> PipelineResult<String> {
        let bytes = image::fetch(&self.http, url).await?;

        let labels = self.detector.detect_labels(&bytes).await?;
        let detected = labels.len();
        let Detection { names, labels } = Detection::from_labels(labels);
        debug!(detected, kept = labels.len(), "labels filtered");

        let translated =
            translation::translate_labels(self.translator.as_ref(), self.mode, &names, &labels)
                .await?;

        Ok(report::format(&translated, &labels))
    }
}

pub fn image_url(event: &Event) -> PipelineResult<Url> {
    let raw = event
        .query_string_parameters
        .as_ref()
        .and_then(|q| q.image_url.as_ref())
        .ok_or(PipelineError::MissingImageUrl)?;

    let raw = raw.as_str().ok_or_else(|| PipelineError::InvalidImageUrl {
        url: raw.to_string(),
        reason: "expected a string".into(),
    })?;

    let url = Url::parse(raw.trim()).map_err(|e| PipelineError::InvalidImageUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PipelineError::InvalidImageUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
