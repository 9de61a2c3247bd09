//! Input classification engine
//!
//! Turns one piece of user input into exactly one [`ClassificationOutcome`].
//!
//! Text input is tested against an ordered matcher table; the first matcher
//! whose predicate accepts the string handles it:
//! 1. `BITCOIN:` - Base43-packed payment request
//! 2. `bitcoin:` - payment URI
//! 3. base58 address
//! 4. WIF private key (only the derived address is kept)
//! 5. Base43 signed transaction, optionally gzip-compressed
//!
//! Anything else is unclassifiable. Binary input is routed purely on its
//! declared content type.
//!
//! The classifier holds no mutable state, so one instance can be shared
//! freely across threads.

use crate::chain::{self, ChainNetwork};
use crate::codec;
use crate::payment_request::{self, PaymentRequestError};
use crate::types::{
    ClassificationOutcome, PaymentIntent, PaymentRequestReason, ReasonCode,
    MIMETYPE_PAYMENT_REQUEST, MIMETYPE_TRANSACTION,
};
use tracing::debug;

pub mod patterns;
pub mod uri;

pub use uri::{parse_bitcoin_uri, UriError};

/// Shape of a text input, named after the matcher that claims it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextShape {
    PaymentRequestUri,
    BitcoinUri,
    Address,
    PrivateKey,
    Transaction,
}

impl TextShape {
    pub fn as_str(self) -> &'static str {
        match self {
            TextShape::PaymentRequestUri => "payment-request-uri",
            TextShape::BitcoinUri => "bitcoin-uri",
            TextShape::Address => "address",
            TextShape::PrivateKey => "private-key",
            TextShape::Transaction => "transaction",
        }
    }
}

type TextHandler = fn(&InputClassifier, &str, u64) -> ClassificationOutcome;

struct TextMatcher {
    shape: TextShape,
    matches: fn(&str) -> bool,
    handle: TextHandler,
}

/// Matchers in priority order
static TEXT_MATCHERS: [TextMatcher; 5] = [
    TextMatcher {
        shape: TextShape::PaymentRequestUri,
        matches: patterns::is_payment_request_uri,
        handle: InputClassifier::handle_payment_request_uri,
    },
    TextMatcher {
        shape: TextShape::BitcoinUri,
        matches: patterns::is_bitcoin_uri,
        handle: InputClassifier::handle_bitcoin_uri,
    },
    TextMatcher {
        shape: TextShape::Address,
        matches: patterns::is_address,
        handle: InputClassifier::handle_address,
    },
    TextMatcher {
        shape: TextShape::PrivateKey,
        matches: patterns::is_private_key,
        handle: InputClassifier::handle_private_key,
    },
    TextMatcher {
        shape: TextShape::Transaction,
        matches: patterns::is_transaction,
        handle: InputClassifier::handle_transaction,
    },
];

/// The shape the classifier will treat `input` as, if any
pub fn detect_shape(input: &str) -> Option<TextShape> {
    TEXT_MATCHERS
        .iter()
        .find(|matcher| (matcher.matches)(input))
        .map(|matcher| matcher.shape)
}

/// Every shape whose predicate accepts `input`, ignoring priority
pub fn matching_shapes(input: &str) -> Vec<TextShape> {
    TEXT_MATCHERS
        .iter()
        .filter(|matcher| (matcher.matches)(input))
        .map(|matcher| matcher.shape)
        .collect()
}

/// Classifier bound to one network
#[derive(Debug, Clone, Copy)]
pub struct InputClassifier {
    network: ChainNetwork,
}

impl InputClassifier {
    pub fn new(network: ChainNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> ChainNetwork {
        self.network
    }

    /// Classify text against the current wall-clock time
    pub fn classify_text(&self, input: &str) -> ClassificationOutcome {
        self.classify_text_at(input, payment_request::unix_now())
    }

    /// Classify text, validating any payment request against Unix time `now`
    pub fn classify_text_at(&self, input: &str, now: u64) -> ClassificationOutcome {
        match TEXT_MATCHERS.iter().find(|matcher| (matcher.matches)(input)) {
            Some(matcher) => {
                debug!(
                    "Input ({} chars) matched {}",
                    input.len(),
                    matcher.shape.as_str()
                );
                (matcher.handle)(self, input, now)
            }
            None => {
                debug!("Input ({} chars) matched no text shape", input.len());
                ClassificationOutcome::Unclassifiable(input.to_string())
            }
        }
    }

    /// Classify bytes by their declared content type
    pub fn classify_binary(&self, content_type: &str, input: &[u8]) -> ClassificationOutcome {
        self.classify_binary_at(content_type, input, payment_request::unix_now())
    }

    pub fn classify_binary_at(
        &self,
        content_type: &str,
        input: &[u8],
        now: u64,
    ) -> ClassificationOutcome {
        match content_type {
            MIMETYPE_TRANSACTION => self.direct_transaction(input.to_vec()),
            MIMETYPE_PAYMENT_REQUEST => self.payment_request(input, now),
            other => {
                debug!("Unrecognised content type {:?}", other);
                ClassificationOutcome::Unclassifiable(other.to_string())
            }
        }
    }

    fn handle_payment_request_uri(&self, input: &str, now: u64) -> ClassificationOutcome {
        let payload = &input[patterns::PAYMENT_REQUEST_SCHEME.len()..];
        let limit = codec::base43::max_encoded_len(payment_request::MAX_PAYMENT_REQUEST_BYTES);
        if payload.len() > limit {
            return payment_request_error(PaymentRequestError::OversizedText {
                length: payload.len(),
                limit,
            });
        }
        match codec::decode_binary(payload) {
            Ok(bytes) => self.payment_request(&bytes, now),
            Err(e) => ClassificationOutcome::error(
                ReasonCode::InvalidPaymentRequest(PaymentRequestReason::Undecodable),
                e.to_string(),
            ),
        }
    }

    fn handle_bitcoin_uri(&self, input: &str, _now: u64) -> ClassificationOutcome {
        match uri::parse_bitcoin_uri(input, self.network) {
            Ok(intent) => ClassificationOutcome::PaymentRequest(intent),
            Err(e) => {
                debug!("Rejected bitcoin URI: {}", e);
                ClassificationOutcome::error(ReasonCode::InvalidUri, format!("{}: {}", e, input))
            }
        }
    }

    fn handle_address(&self, input: &str, _now: u64) -> ClassificationOutcome {
        match chain::decode_address(input, self.network) {
            Ok(address) => ClassificationOutcome::PaymentRequest(PaymentIntent::new(address)),
            Err(e) => ClassificationOutcome::error(ReasonCode::InvalidAddress, e.to_string()),
        }
    }

    fn handle_private_key(&self, input: &str, _now: u64) -> ClassificationOutcome {
        match chain::address_for_private_key(input, self.network) {
            Ok(address) => ClassificationOutcome::PaymentRequest(PaymentIntent::new(address)),
            Err(e) => ClassificationOutcome::error(ReasonCode::InvalidAddress, e.to_string()),
        }
    }

    fn handle_transaction(&self, input: &str, _now: u64) -> ClassificationOutcome {
        match codec::decode_decompress_binary(input) {
            Ok(bytes) => self.direct_transaction(bytes),
            Err(e) => ClassificationOutcome::error(ReasonCode::InvalidTransaction, e.to_string()),
        }
    }

    fn direct_transaction(&self, bytes: Vec<u8>) -> ClassificationOutcome {
        match chain::deserialize_transaction(&bytes) {
            Ok(transaction) => {
                debug!(
                    "Direct transaction {} ({} bytes)",
                    transaction.compute_txid(),
                    bytes.len()
                );
                ClassificationOutcome::DirectTransaction { bytes, transaction }
            }
            Err(e) => ClassificationOutcome::error(ReasonCode::InvalidTransaction, e.to_string()),
        }
    }

    fn payment_request(&self, bytes: &[u8], now: u64) -> ClassificationOutcome {
        match payment_request::validate_payment_request(bytes, now, self.network) {
            Ok(intent) => ClassificationOutcome::PaymentRequest(intent),
            Err(e) => payment_request_error(e),
        }
    }
}

fn payment_request_error(err: PaymentRequestError) -> ClassificationOutcome {
    ClassificationOutcome::error(
        ReasonCode::InvalidPaymentRequest(err.reason()),
        err.to_string(),
    )
}
