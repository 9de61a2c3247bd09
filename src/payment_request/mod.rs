//! Payment request decoding and validation
//!
//! A payment request is the payee-signed protobuf envelope of the payment
//! protocol. This module accepts only the subset we can honour without a
//! signature verification path:
//! - no PKI (`pki_type == "none"`)
//! - details version 1
//! - exactly one pay-to-address output on the configured network
//! - not expired
//!
//! Checks run strictly in that order and stop at the first violation, so a
//! request that breaks several rules always reports the earliest one.

use crate::chain::{self, ChainNetwork};
use crate::types::PaymentIntent;
use bitcoin::{Amount, ScriptBuf};
use chrono::DateTime;
use prost::Message;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

pub mod error;
pub mod proto;

pub use error::{PaymentRequestError, PaymentRequestResult};

/// Decode-bomb guard, applied before any parsing
pub const MAX_PAYMENT_REQUEST_BYTES: usize = 50_000;

/// The only PKI type we accept
pub const PKI_TYPE_NONE: &str = "none";

/// The only payment details version we accept
pub const SUPPORTED_DETAILS_VERSION: u32 = 1;

/// Payment URL scheme that carries a short-range transport address
pub const BLUETOOTH_URL_PREFIX: &str = "bt:";

/// Validator bound to one network
#[derive(Debug, Clone, Copy)]
pub struct PaymentRequestValidator {
    network: ChainNetwork,
}

impl PaymentRequestValidator {
    pub fn new(network: ChainNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> ChainNetwork {
        self.network
    }

    /// Validate against the current wall-clock time
    pub fn validate(&self, bytes: &[u8]) -> PaymentRequestResult<PaymentIntent> {
        validate_payment_request(bytes, unix_now(), self.network)
    }

    /// Validate against an explicit Unix time in seconds
    pub fn validate_at(&self, bytes: &[u8], now: u64) -> PaymentRequestResult<PaymentIntent> {
        validate_payment_request(bytes, now, self.network)
    }
}

/// Validate a serialized payment request and turn it into a payment intent
///
/// `now` is Unix time in seconds; a request expires once `now >= expires`.
pub fn validate_payment_request(
    bytes: &[u8],
    now: u64,
    network: ChainNetwork,
) -> PaymentRequestResult<PaymentIntent> {
    let result = check_payment_request(bytes, now, network);
    if let Err(ref err) = result {
        debug!(
            "Rejected payment request ({} bytes): {} [{}]",
            bytes.len(),
            err,
            err.reason().as_str()
        );
    }
    result
}

fn check_payment_request(
    bytes: &[u8],
    now: u64,
    network: ChainNetwork,
) -> PaymentRequestResult<PaymentIntent> {
    if bytes.len() > MAX_PAYMENT_REQUEST_BYTES {
        return Err(PaymentRequestError::Oversized {
            size: bytes.len(),
            limit: MAX_PAYMENT_REQUEST_BYTES,
        });
    }

    let request = proto::PaymentRequest::decode(bytes)?;

    if request.pki_type() != PKI_TYPE_NONE {
        return Err(PaymentRequestError::UnsupportedPki(
            request.pki_type().to_string(),
        ));
    }

    if request.payment_details_version() != SUPPORTED_DETAILS_VERSION {
        return Err(PaymentRequestError::UnsupportedVersion(
            request.payment_details_version(),
        ));
    }

    let serialized_details = request
        .serialized_payment_details
        .as_deref()
        .ok_or_else(|| missing_field("serialized_payment_details"))?;
    let details = proto::PaymentDetails::decode(serialized_details)?;
    if details.time.is_none() {
        return Err(missing_field("time"));
    }

    let expires = details.expires();
    if expires != 0 && now >= expires {
        return Err(PaymentRequestError::Expired {
            expires,
            expires_at: format_timestamp(expires),
        });
    }

    let output = match details.outputs.as_slice() {
        [output] => output,
        outputs => return Err(PaymentRequestError::OutputCount(outputs.len())),
    };

    if details.network() != network.payment_protocol_id() {
        return Err(PaymentRequestError::WrongNetwork(
            details.network().to_string(),
        ));
    }

    let script = output
        .script
        .clone()
        .map(ScriptBuf::from_bytes)
        .ok_or_else(|| missing_field("outputs.script"))?;
    let address = chain::pay_to_address(&script, network)
        .map_err(|_| PaymentRequestError::NonStandardScript)?;

    let mut intent = PaymentIntent::new(address).with_memo(details.memo());

    // Same shape as a `bitcoin:` URI `r` parameter: full URL kept, `bt:` also
    // yields the transport hint
    let payment_url = details.payment_url();
    if !payment_url.is_empty() {
        if let Some(mac) = payment_url.strip_prefix(BLUETOOTH_URL_PREFIX) {
            intent = intent.with_transport_hint(mac);
        }
        intent = intent.with_payment_request_url(payment_url);
    }

    // Zero means "payer chooses", same as an absent amount
    let amount = output.amount();
    if amount != 0 {
        intent = intent.with_amount(Amount::from_sat(amount));
    }

    Ok(intent)
}

fn missing_field(name: &str) -> PaymentRequestError {
    PaymentRequestError::Undecodable(format!("missing required field {}", name))
}

fn format_timestamp(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "out of range".to_string())
}

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
