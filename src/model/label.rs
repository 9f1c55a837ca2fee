use serde::{Deserialize, Serialize};

/// Rótulo devolvido pelo serviço de detecção.
///
/// `confidence` vem na escala 0..=100, como o serviço entrega.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Label {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Confidence")]
    pub confidence: f64,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}
