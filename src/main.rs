use std::process::ExitCode;
use std::sync::Arc;

use reqwest::Client;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod model;
mod protocol;
mod services;

use config::Config;
use services::aws_json::ServiceEndpoint;
use services::detection::RekognitionClient;
use services::pipeline::RequestPipeline;
use services::translation::TranslateClient;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout é o canal de respostas; logs vão para stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let pipeline = build_pipeline(cfg);
    info!("rotulador ready");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) if is_bad_line(&e) => {
                error!(error = %e, "skipping unreadable stdin line");
                continue;
            }
            Err(e) => {
                error!(error = %e, "failed to read stdin");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = protocol::handle(&pipeline, &line).await;

        if stdout.write_all(format!("{response}\n").as_bytes()).await.is_err() {
            break;
        }

        let _ = stdout.flush().await;
    }

    ExitCode::SUCCESS
}

fn build_pipeline(cfg: Config) -> RequestPipeline {
    // Um único client HTTP, reaproveitado pela busca da imagem e pelos dois serviços.
    let http = Client::new();

    let detector = RekognitionClient::new(
        http.clone(),
        ServiceEndpoint {
            url: cfg.vision_endpoint,
            bearer_token: cfg.api_token.clone(),
        },
    );
    let translator = TranslateClient::new(
        http.clone(),
        ServiceEndpoint {
            url: cfg.translate_endpoint,
            bearer_token: cfg.api_token,
        },
    );

    RequestPipeline::new(http, Arc::new(detector), Arc::new(translator), cfg.translation_mode)
}

/// Linha com UTF-8 inválido é descartada; qualquer outro erro de leitura encerra o loop.
fn is_bad_line(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::InvalidData
}
