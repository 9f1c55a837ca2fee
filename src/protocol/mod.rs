use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde_json::json;
use tracing::error;

use crate::error::PipelineError;
use crate::model::event::{Event, Response, INTERNAL_ERROR_BODY};
use crate::services::pipeline::RequestPipeline;

/// Processa uma linha de entrada (um evento JSON) e devolve a linha de resposta.
pub async fn handle(pipeline: &RequestPipeline, input: &str) -> String {
    let response = match parse_event(input) {
        Ok(event) => {
            let run = AssertUnwindSafe(pipeline.handle(&event)).catch_unwind();
            match run.await {
                Ok(resp) => resp,
                Err(_) => {
                    error!("request panicked");
                    Response::internal_error()
                }
            }
        }
        Err(e) => {
            error!(error = %e, "request failed");
            Response::internal_error()
        }
    };

    encode(&response)
}

fn parse_event(input: &str) -> Result<Event, PipelineError> {
    serde_json::from_str(input).map_err(|e| PipelineError::InvalidEvent(e.to_string()))
}

fn encode(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| {
        json!({ "statusCode": 500, "body": INTERNAL_ERROR_BODY }).to_string()
    })
}
