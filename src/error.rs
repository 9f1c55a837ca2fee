//! Erros do pipeline de rotulagem.
//!
//! Todas as variantes terminam na mesma resposta 500; a distinção existe
//! apenas para o log de diagnóstico.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("queryStringParameters.imageUrl is required")]
    MissingImageUrl,

    #[error("invalid imageUrl {url:?}: {reason}")]
    InvalidImageUrl { url: String, reason: String },

    #[error("failed to fetch image: {0}")]
    Fetch(String),

    #[error("label detection failed: {0}")]
    Detection(String),

    #[error("translation failed: {0}")]
    Translation(String),

    #[error("translated {translated} segment(s) for {labels} label(s)")]
    Misaligned { labels: usize, translated: usize },
}

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}
