use serde::{Deserialize, Serialize};

pub const INTERNAL_ERROR_BODY: &str = "Internal server error!";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub query_string_parameters: Option<QueryParameters>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameters {
    // Mantido como Value: tipo errado é erro de formato da requisição, não de parse.
    #[serde(default)]
    pub image_url: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    pub fn internal_error() -> Self {
        Self {
            status_code: 500,
            body: INTERNAL_ERROR_BODY.to_string(),
        }
    }
}
