//! Value objects handed from the classifier to its caller

pub mod intent;
pub mod outcome;

pub use intent::PaymentIntent;
pub use outcome::{
    ClassificationError, ClassificationOutcome, IntentListener, PaymentRequestReason, ReasonCode,
};

/// Declared content type of a serialized transaction
pub const MIMETYPE_TRANSACTION: &str = "application/x-btctx";

/// Declared content type of a serialized payment request
pub const MIMETYPE_PAYMENT_REQUEST: &str = "application/bitcoin-paymentrequest";
