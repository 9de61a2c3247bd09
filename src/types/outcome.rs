use super::PaymentIntent;
use bitcoin::Transaction;
use std::fmt;

/// Payment request rejection sub-reasons, one per validator check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentRequestReason {
    Oversized,
    Undecodable,
    UnsupportedPki,
    UnsupportedVersion,
    Expired,
    OutputCount,
    WrongNetwork,
    NonStandardScript,
}

impl PaymentRequestReason {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentRequestReason::Oversized => "oversized",
            PaymentRequestReason::Undecodable => "undecodable",
            PaymentRequestReason::UnsupportedPki => "unsupported-pki",
            PaymentRequestReason::UnsupportedVersion => "unsupported-version",
            PaymentRequestReason::Expired => "expired",
            PaymentRequestReason::OutputCount => "output-count",
            PaymentRequestReason::WrongNetwork => "wrong-network",
            PaymentRequestReason::NonStandardScript => "non-standard-script",
        }
    }
}

/// Machine-readable reason attached to a classification error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    /// Malformed `bitcoin:` URI
    InvalidUri,
    InvalidAddress,
    InvalidTransaction,
    InvalidPaymentRequest(PaymentRequestReason),
    /// Input matched no known shape or content type
    Unclassifiable,
}

impl ReasonCode {
    /// Stable code, e.g. `invalid-payment-request/expired`
    pub fn as_str(&self) -> String {
        match self {
            ReasonCode::InvalidUri => "invalid-uri".to_string(),
            ReasonCode::InvalidAddress => "invalid-address".to_string(),
            ReasonCode::InvalidTransaction => "invalid-transaction".to_string(),
            ReasonCode::InvalidPaymentRequest(reason) => {
                format!("invalid-payment-request/{}", reason.as_str())
            }
            ReasonCode::Unclassifiable => "unclassifiable".to_string(),
        }
    }

    pub fn is_payment_request(&self) -> bool {
        matches!(self, ReasonCode::InvalidPaymentRequest(_))
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

/// Reason plus a free-form diagnostic detail
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}: {detail}")]
pub struct ClassificationError {
    pub reason: ReasonCode,
    pub detail: String,
}

impl ClassificationError {
    pub fn new(reason: ReasonCode, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }
}

/// The single result of classifying one input
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    PaymentRequest(PaymentIntent),
    DirectTransaction {
        bytes: Vec<u8>,
        transaction: Transaction,
    },
    /// Echoes the raw text, or the content type for binary input
    Unclassifiable(String),
    Error(ClassificationError),
}

impl ClassificationOutcome {
    pub fn error(reason: ReasonCode, detail: impl Into<String>) -> Self {
        ClassificationOutcome::Error(ClassificationError::new(reason, detail))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClassificationOutcome::PaymentRequest(_) => "payment_request",
            ClassificationOutcome::DirectTransaction { .. } => "direct_transaction",
            ClassificationOutcome::Unclassifiable(_) => "unclassifiable",
            ClassificationOutcome::Error(_) => "error",
        }
    }

    pub fn intent(&self) -> Option<&PaymentIntent> {
        match self {
            ClassificationOutcome::PaymentRequest(intent) => Some(intent),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            ClassificationOutcome::Error(err) => Some(err.reason),
            _ => None,
        }
    }

    /// Invoke exactly one listener method for this outcome
    pub fn dispatch<L: IntentListener + ?Sized>(self, listener: &mut L) {
        match self {
            ClassificationOutcome::PaymentRequest(intent) => listener.on_payment_intent(intent),
            ClassificationOutcome::DirectTransaction { transaction, .. } => {
                listener.on_direct_transaction(transaction)
            }
            ClassificationOutcome::Unclassifiable(input) => listener.on_unclassifiable(&input),
            ClassificationOutcome::Error(err) => listener.on_error(err.reason, &err.detail),
        }
    }
}

/// Callback-style consumer of classification outcomes
pub trait IntentListener {
    fn on_payment_intent(&mut self, intent: PaymentIntent);

    fn on_direct_transaction(&mut self, transaction: Transaction);

    fn on_error(&mut self, reason: ReasonCode, detail: &str);

    /// Reported as an error carrying the raw input unless overridden
    fn on_unclassifiable(&mut self, input: &str) {
        self.on_error(ReasonCode::Unclassifiable, input);
    }
}
