use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::model::label::Label;
use crate::services::aws_json::{self, ServiceEndpoint};

pub const SOURCE_LANG: &str = "en";
pub const TARGET_LANG: &str = "pt";

/// "and" em português; usado para separar a frase traduzida de volta em rótulos.
const TRANSLATED_SEPARATOR: &str = " e ";
const TRANSLATE_TEXT_TARGET: &str = "AWSShineFrontendService_20170701.TranslateText";

#[async_trait]
pub trait TextTranslator: Send + Sync {
    async fn translate(&self, source: &str, target: &str, text: &str) -> PipelineResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationMode {
    /// Uma chamada com os nomes unidos, separada depois em " e ".
    #[default]
    Joined,
    /// Uma chamada por rótulo.
    PerLabel,
}

impl FromStr for TranslationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "joined" => Ok(TranslationMode::Joined),
            "per-label" | "per_label" => Ok(TranslationMode::PerLabel),
            other => Err(format!("unknown translation mode {other:?}")),
        }
    }
}

/// Traduz os nomes dos rótulos filtrados, um resultado por rótulo e na mesma ordem.
///
/// `names` é a junção já feita pela detecção; só é usada no modo `Joined`.
pub async fn translate_labels(
    translator: &dyn TextTranslator,
    mode: TranslationMode,
    names: &str,
    labels: &[Label],
) -> PipelineResult<Vec<String>> {
    if labels.is_empty() {
        return Ok(Vec::new());
    }

    let translated = match mode {
        TranslationMode::Joined => {
            let text = translator.translate(SOURCE_LANG, TARGET_LANG, names).await?;
            split_translated(&text)
        }
        TranslationMode::PerLabel => {
            let mut out = Vec::with_capacity(labels.len());
            for label in labels {
                out.push(translator.translate(SOURCE_LANG, TARGET_LANG, &label.name).await?);
            }
            out
        }
    };

    debug!(labels = labels.len(), translated = translated.len(), ?mode, "labels translated");

    if translated.len() != labels.len() {
        return Err(PipelineError::Misaligned {
            labels: labels.len(),
            translated: translated.len(),
        });
    }

    Ok(translated)
}

pub fn split_translated(text: &str) -> Vec<String> {
    text.split(TRANSLATED_SEPARATOR).map(str::to_string).collect()
}

#[derive(Serialize)]
struct TranslateTextRequest<'a> {
    #[serde(rename = "SourceLanguageCode")]
    source_language_code: &'a str,
    #[serde(rename = "TargetLanguageCode")]
    target_language_code: &'a str,
    #[serde(rename = "Text")]
    text: &'a str,
}

#[derive(Deserialize)]
struct TranslateTextResponse {
    #[serde(rename = "TranslatedText")]
    translated_text: String,
}

pub struct TranslateClient {
    http: Client,
    endpoint: ServiceEndpoint,
}

impl TranslateClient {
    pub fn new(http: Client, endpoint: ServiceEndpoint) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl TextTranslator for TranslateClient {
    async fn translate(&self, source: &str, target: &str, text: &str) -> PipelineResult<String> {
        let body = TranslateTextRequest {
            source_language_code: source,
            target_language_code: target,
            text,
        };

        let resp: TranslateTextResponse =
            aws_json::call(&self.http, &self.endpoint, TRANSLATE_TEXT_TARGET, &body)
                .await
                .map_err(PipelineError::Translation)?;

        Ok(resp.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use url::Url;
    use wiremock::matchers::{body_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Dicionário fixo; registra cada texto recebido.
    struct Dictionary {
        entries: HashMap<&'static str, &'static str>,
        seen: Mutex<Vec<String>>,
    }

    impl Dictionary {
        fn new(entries: &[(&'static str, &'static str)]) -> Self {
            Self {
                entries: entries.iter().copied().collect(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextTranslator for Dictionary {
        async fn translate(&self, source: &str, target: &str, text: &str) -> PipelineResult<String> {
            assert_eq!((source, target), (SOURCE_LANG, TARGET_LANG));
            self.seen.lock().unwrap().push(text.to_string());
            self.entries
                .get(text)
                .map(|s| s.to_string())
                .ok_or_else(|| PipelineError::Translation(format!("no entry for {text:?}")))
        }
    }

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(|n| Label::new(*n, 90.0)).collect()
    }

    #[test]
    fn splits_on_portuguese_and() {
        assert_eq!(split_translated("Gato e Cachorro"), vec!["Gato", "Cachorro"]);
        assert_eq!(split_translated("Gato"), vec!["Gato"]);
        // "e" colado a outra palavra não separa.
        assert_eq!(split_translated("Leite"), vec!["Leite"]);
    }

    #[test]
    fn parses_mode() {
        assert_eq!("joined".parse::<TranslationMode>(), Ok(TranslationMode::Joined));
        assert_eq!(" Per-Label ".parse::<TranslationMode>(), Ok(TranslationMode::PerLabel));
        assert!("whatever".parse::<TranslationMode>().is_err());
    }

    #[tokio::test]
    async fn joined_mode_makes_one_call() {
        let dict = Dictionary::new(&[("Cat and Dog", "Gato e Cachorro")]);
        let out = translate_labels(&dict, TranslationMode::Joined, "Cat and Dog", &labels(&["Cat", "Dog"]))
            .await
            .unwrap();

        assert_eq!(out, vec!["Gato", "Cachorro"]);
        assert_eq!(dict.seen(), vec!["Cat and Dog"]);
    }

    #[tokio::test]
    async fn joined_mode_fails_loudly_on_count_mismatch() {
        // Tradução que "engole" o separador.
        let dict = Dictionary::new(&[("Salt and Pepper", "Sal com pimenta")]);
        let err = translate_labels(
            &dict,
            TranslationMode::Joined,
            "Salt and Pepper",
            &labels(&["Salt", "Pepper"]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PipelineError::Misaligned { labels: 2, translated: 1 }));
    }

    #[tokio::test]
    async fn per_label_mode_translates_each_in_order() {
        let dict = Dictionary::new(&[("Salt", "Sal"), ("Pepper", "Pimenta")]);
        let out = translate_labels(
            &dict,
            TranslationMode::PerLabel,
            "Salt and Pepper",
            &labels(&["Salt", "Pepper"]),
        )
        .await
        .unwrap();

        assert_eq!(out, vec!["Sal", "Pimenta"]);
        assert_eq!(dict.seen(), vec!["Salt", "Pepper"]);
    }

    #[tokio::test]
    async fn no_labels_means_no_call() {
        let dict = Dictionary::new(&[]);
        let out = translate_labels(&dict, TranslationMode::Joined, "", &[]).await.unwrap();

        assert!(out.is_empty());
        assert!(dict.seen().is_empty());
    }

    #[tokio::test]
    async fn client_sends_fixed_languages() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("X-Amz-Target", TRANSLATE_TEXT_TARGET))
            .and(body_json(serde_json::json!({
                "SourceLanguageCode": "en",
                "TargetLanguageCode": "pt",
                "Text": "Cat and Dog"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "TranslatedText": "Gato e Cachorro",
                "SourceLanguageCode": "en",
                "TargetLanguageCode": "pt"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TranslateClient::new(
            Client::new(),
            ServiceEndpoint {
                url: Url::parse(&server.uri()).unwrap(),
                bearer_token: None,
            },
        );

        let text = client
            .translate(SOURCE_LANG, TARGET_LANG, "Cat and Dog")
            .await
            .unwrap();
        assert_eq!(text, "Gato e Cachorro");
    }

    #[tokio::test]
    async fn client_maps_service_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "__type": "ThrottlingException",
                "message": "Rate exceeded"
            })))
            .mount(&server)
            .await;

        let client = TranslateClient::new(
            Client::new(),
            ServiceEndpoint {
                url: Url::parse(&server.uri()).unwrap(),
                bearer_token: None,
            },
        );

        let err = client.translate(SOURCE_LANG, TARGET_LANG, "Cat").await.unwrap_err();
        assert!(matches!(err, PipelineError::Translation(ref m) if m == "HTTP 429: Rate exceeded"));
    }
}
