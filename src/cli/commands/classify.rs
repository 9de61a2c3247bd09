use crate::chain::ChainNetwork;
use crate::classifier::InputClassifier;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::types::{ClassificationOutcome, PaymentIntent};
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::info;

/// Classify text or a typed binary file
#[derive(Args)]
pub struct ClassifyCommand {
    /// Text input: address, WIF key, bitcoin: URI, BITCOIN: payload or encoded transaction
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    pub input: Option<String>,

    /// Read binary input from a file instead
    #[arg(long, requires = "mime_type")]
    pub file: Option<PathBuf>,

    /// Declared content type of --file
    #[arg(long)]
    pub mime_type: Option<String>,

    /// Network to validate against: main or test (overrides config.toml)
    #[arg(long)]
    pub network: Option<ChainNetwork>,
}

impl ClassifyCommand {
    pub fn run(&self, config: &AppConfig) -> AppResult<()> {
        let network = self.network.unwrap_or(config.classifier.network);
        let classifier = InputClassifier::new(network);
        info!("Classifying input for the {} network", network);

        let outcome = match (&self.input, &self.file, &self.mime_type) {
            (Some(text), _, _) => classifier.classify_text(text.trim()),
            (None, Some(path), Some(mime_type)) => {
                let bytes = std::fs::read(path)?;
                info!("Read {} bytes from {}", bytes.len(), path.display());
                classifier.classify_binary(mime_type, &bytes)
            }
            _ => {
                return Err(AppError::InvalidData(
                    "either INPUT or --file with --mime-type is required".to_string(),
                ))
            }
        };

        println!("{}", serde_json::to_string_pretty(&render_outcome(&outcome))?);

        match outcome {
            ClassificationOutcome::Error(err) => Err(AppError::Rejected(err)),
            ClassificationOutcome::Unclassifiable(input) => Err(AppError::Unclassifiable(input)),
            _ => Ok(()),
        }
    }
}

/// JSON view of an outcome for terminal output
pub fn render_outcome(outcome: &ClassificationOutcome) -> Value {
    match outcome {
        ClassificationOutcome::PaymentRequest(intent) => json!({
            "kind": outcome.kind(),
            "intent": render_intent(intent),
        }),
        ClassificationOutcome::DirectTransaction { bytes, transaction } => json!({
            "kind": outcome.kind(),
            "txid": transaction.compute_txid().to_string(),
            "size": bytes.len(),
            "inputs": transaction.input.len(),
            "outputs": transaction.output.len(),
            "hex": hex::encode(bytes),
        }),
        ClassificationOutcome::Unclassifiable(input) => json!({
            "kind": outcome.kind(),
            "input": input,
        }),
        ClassificationOutcome::Error(err) => json!({
            "kind": outcome.kind(),
            "reason": err.reason.as_str(),
            "detail": err.detail,
        }),
    }
}

fn render_intent(intent: &PaymentIntent) -> Value {
    json!({
        "address": intent.address().to_string(),
        "amount_sats": intent.amount().map(|a| a.to_sat()),
        "memo": intent.memo(),
        "transport_hint": intent.transport_hint(),
        "payment_request_url": intent.payment_request_url(),
    })
}
