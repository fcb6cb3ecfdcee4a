use std::future::Future;
use std::process::ExitCode;
use serde_json::{Value, json};
use tracing::error;
use sc_core::{ErrorEnvelope, GenerationRequest, Stage};
use crate::generator::Generator;

/// What the CLI prints and how it exits
#[derive(Debug, Clone, PartialEq)]
pub struct CliOutcome {
    pub success: bool,
    pub body: Value,
}

impl CliOutcome {
    fn failure(stage: Stage, message: String) -> Self {
        error!("{message}");
        Self {
            success: false,
            body: json!(ErrorEnvelope::new(stage, message)),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Parse the object description, then load the model and generate once.
///
/// The input is parsed before anything is loaded so a typo never costs a
/// model load. Only JSON syntax and non-object documents are input errors;
/// fields are read leniently.
pub async fn run<F, Fut>(raw: &str, connect: F) -> CliOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<Generator>>,
{
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => return CliOutcome::failure(Stage::InputParsing, format!("Invalid JSON input: {e}")),
    };
    let request = match value.as_object() {
        Some(fields) => GenerationRequest::from_loose(fields),
        None => {
            return CliOutcome::failure(
                Stage::InputParsing,
                format!("Invalid JSON input: expected an object, got {value}"),
            );
        }
    };

    let generator = match connect().await {
        Ok(generator) => generator,
        Err(e) => return CliOutcome::failure(Stage::ModelGeneration, format!("{e:#}")),
    };

    match generator.generate(&request).await {
        Ok(record) => CliOutcome {
            success: true,
            body: json!(record),
        },
        Err(e) => CliOutcome::failure(e.stage(), e.to_string()),
    }
}
