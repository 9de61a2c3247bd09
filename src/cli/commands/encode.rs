use crate::chain;
use crate::classifier::patterns::PAYMENT_REQUEST_SCHEME;
use crate::codec;
use crate::errors::{AppError, AppResult};
use crate::payment_request::MAX_PAYMENT_REQUEST_BYTES;
use clap::Args;
use tracing::{info, warn};

/// Encode a raw transaction into its Base43 barcode form
#[derive(Args)]
pub struct EncodeTxCommand {
    /// Consensus-serialized transaction as hex
    pub hex: String,

    /// Gzip the transaction before encoding
    #[arg(long)]
    pub compress: bool,
}

impl EncodeTxCommand {
    pub fn run(&self) -> AppResult<()> {
        println!("{}", self.encode()?);
        Ok(())
    }

    pub fn encode(&self) -> AppResult<String> {
        let bytes = hex::decode(self.hex.trim())?;
        let transaction = chain::deserialize_transaction(&bytes)?;
        info!(
            "Encoding transaction {} ({} bytes)",
            transaction.compute_txid(),
            bytes.len()
        );

        if self.compress {
            Ok(codec::encode_compress_binary(&bytes)?)
        } else {
            Ok(codec::encode_uncompressed_binary(&bytes))
        }
    }
}

/// Encode a serialized payment request as a BITCOIN: payload
#[derive(Args)]
pub struct EncodeRequestCommand {
    /// Serialized payment request as hex
    pub hex: String,
}

impl EncodeRequestCommand {
    pub fn run(&self) -> AppResult<()> {
        println!("{}", self.encode()?);
        Ok(())
    }

    pub fn encode(&self) -> AppResult<String> {
        let bytes = hex::decode(self.hex.trim())?;
        if bytes.is_empty() {
            return Err(AppError::InvalidData("empty payment request".to_string()));
        }
        if bytes.len() > MAX_PAYMENT_REQUEST_BYTES {
            warn!(
                "Payment request is {} bytes; classifiers reject anything over {}",
                bytes.len(),
                MAX_PAYMENT_REQUEST_BYTES
            );
        }
        Ok(format!(
            "{}{}",
            PAYMENT_REQUEST_SCHEME,
            codec::encode_binary(&bytes)
        ))
    }
}
