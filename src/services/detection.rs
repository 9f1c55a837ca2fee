use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::model::label::Label;
use crate::services::aws_json::{self, ServiceEndpoint};

/// Rótulos com confiança igual ou abaixo disso são descartados.
pub const MIN_CONFIDENCE: f64 = 80.0;

const NAME_SEPARATOR: &str = " and ";
const DETECT_LABELS_TARGET: &str = "RekognitionService.DetectLabels";

#[async_trait]
pub trait LabelDetector: Send + Sync {
    async fn detect_labels(&self, image: &[u8]) -> PipelineResult<Vec<Label>>;
}

/// Resultado do passo de detecção já filtrado.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Nomes unidos por " and ", entrada da tradução.
    pub names: String,
    pub labels: Vec<Label>,
}

impl Detection {
    pub fn from_labels(labels: Vec<Label>) -> Self {
        let labels = filter_confident(labels);
        let names = join_names(&labels);
        Self { names, labels }
    }
}

pub fn filter_confident(labels: Vec<Label>) -> Vec<Label> {
    labels
        .into_iter()
        .filter(|l| l.confidence > MIN_CONFIDENCE)
        .collect()
}

pub fn join_names(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|l| l.name.as_str())
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
}

#[derive(Serialize)]
struct DetectLabelsRequest<'a> {
    #[serde(rename = "Image")]
    image: ImagePayload<'a>,
}

#[derive(Serialize)]
struct ImagePayload<'a> {
    #[serde(rename = "Bytes")]
    bytes: &'a str,
}

#[derive(Deserialize)]
struct DetectLabelsResponse {
    #[serde(rename = "Labels")]
    labels: Vec<Label>,
}

pub struct RekognitionClient {
    http: Client,
    endpoint: ServiceEndpoint,
}

impl RekognitionClient {
    pub fn new(http: Client, endpoint: ServiceEndpoint) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl LabelDetector for RekognitionClient {
    async fn detect_labels(&self, image: &[u8]) -> PipelineResult<Vec<Label>> {
        let encoded = STANDARD.encode(image);
        let body = DetectLabelsRequest {
            image: ImagePayload { bytes: &encoded },
        };

        let resp: DetectLabelsResponse =
            aws_json::call(&self.http, &self.endpoint, DETECT_LABELS_TARGET, &body)
                .await
                .map_err(PipelineError::Detection)?;

        Ok(resp.labels)
    }
}
