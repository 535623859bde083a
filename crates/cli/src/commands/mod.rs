pub mod config;
pub mod demo;
pub mod doctor;
pub mod recommend;

use makeitsell_core::ScoredProduct;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// One line per ranked product, e.g.
/// `  1. Infinix Note 40 Smartphone [prod-infinix-note] score 145.00 NGN 285000`.
pub(crate) fn render_ranking(ranked: &[ScoredProduct]) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            format!(
                "  {}. {} [{}] score {:.2} NGN {}",
                position + 1,
                entry.product.name,
                entry.product.id.as_str(),
                entry.score,
                entry.product.price
            )
        })
        .collect()
}
