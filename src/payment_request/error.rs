//! Payment request rejection types

use crate::types::PaymentRequestReason;

/// Result type for payment request validation
pub type PaymentRequestResult<T> = Result<T, PaymentRequestError>;

/// One variant per validator check; the first failing check wins
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentRequestError {
    #[error("payment request too big: {size} bytes (limit {limit})")]
    Oversized { size: usize, limit: usize },

    /// Encoded text that cannot decode to an acceptable size
    #[error("payment request too big: {length} encoded characters (limit {limit})")]
    OversizedText { length: usize, limit: usize },

    #[error("cannot decode payment request: {0}")]
    Undecodable(String),

    #[error("cannot handle pki type: {0}")]
    UnsupportedPki(String),

    #[error("cannot handle payment details version: {0}")]
    UnsupportedVersion(u32),

    #[error("payment details expired: {expires} ({expires_at})")]
    Expired { expires: u64, expires_at: String },

    #[error("can only handle payment requests with 1 output, got {0}")]
    OutputCount(usize),

    #[error("cannot handle payment request network: {0}")]
    WrongNetwork(String),

    #[error("can only handle send-to-address scripts in payment request")]
    NonStandardScript,
}

impl PaymentRequestError {
    pub fn reason(&self) -> PaymentRequestReason {
        match self {
            PaymentRequestError::Oversized { .. } | PaymentRequestError::OversizedText { .. } => {
                PaymentRequestReason::Oversized
            }
            PaymentRequestError::Undecodable(_) => PaymentRequestReason::Undecodable,
            PaymentRequestError::UnsupportedPki(_) => PaymentRequestReason::UnsupportedPki,
            PaymentRequestError::UnsupportedVersion(_) => PaymentRequestReason::UnsupportedVersion,
            PaymentRequestError::Expired { .. } => PaymentRequestReason::Expired,
            PaymentRequestError::OutputCount(_) => PaymentRequestReason::OutputCount,
            PaymentRequestError::WrongNetwork(_) => PaymentRequestReason::WrongNetwork,
            PaymentRequestError::NonStandardScript => PaymentRequestReason::NonStandardScript,
        }
    }
}

impl From<prost::DecodeError> for PaymentRequestError {
    fn from(err: prost::DecodeError) -> Self {
        PaymentRequestError::Undecodable(err.to_string())
    }
}
