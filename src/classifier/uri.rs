//! `bitcoin:` payment URI parsing
//!
//! Format: `bitcoin:[//]<address>[?param=value[&param=value...]]`
//!
//! Recognised parameters:
//! - `amount` - decimal BTC, converted exactly to satoshis
//! - `label`, `message` - percent-encoded text; the message wins as memo
//! - `r` - payment request URL; `bt:` URLs also yield a transport hint
//!
//! Unknown parameters are ignored unless prefixed `req-`, which marks them as
//! mandatory to understand.

use crate::chain::{self, ChainNetwork};
use crate::payment_request::BLUETOOTH_URL_PREFIX;
use crate::types::PaymentIntent;
use bitcoin::{Amount, Denomination};
use percent_encoding::percent_decode_str;
use std::collections::HashSet;

use super::patterns::BITCOIN_URI_SCHEME;

/// URI parsing error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    #[error("not a bitcoin: URI")]
    WrongScheme,

    #[error("missing address")]
    MissingAddress,

    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("invalid percent-encoding in parameter {0}")]
    InvalidEncoding(String),

    #[error("duplicate parameter {0}")]
    DuplicateParameter(String),

    #[error("unsupported required parameter {0}")]
    UnsupportedRequirement(String),

    #[error("invalid payment request URL {url:?}: {reason}")]
    InvalidRequestUrl { url: String, reason: String },
}

/// Parse a `bitcoin:` URI into a payment intent for `network`
pub fn parse_bitcoin_uri(input: &str, network: ChainNetwork) -> Result<PaymentIntent, UriError> {
    let rest = input
        .strip_prefix(BITCOIN_URI_SCHEME)
        .ok_or(UriError::WrongScheme)?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);

    let (raw_address, query) = match rest.split_once('?') {
        Some((address, query)) => (address, Some(query)),
        None => (rest, None),
    };

    let address_text = decode_component("address", raw_address)?;
    if address_text.is_empty() {
        return Err(UriError::MissingAddress);
    }
    let address = chain::decode_address(&address_text, network).map_err(|e| {
        UriError::InvalidAddress {
            address: address_text.clone(),
            reason: e.to_string(),
        }
    })?;

    let mut amount: Option<Amount> = None;
    let mut label: Option<String> = None;
    let mut message: Option<String> = None;
    let mut request_url: Option<String> = None;
    let mut seen: HashSet<String> = HashSet::new();

    for param in query.unwrap_or("").split('&').filter(|p| !p.is_empty()) {
        let (name, raw_value) = param.split_once('=').unwrap_or((param, ""));

        if !seen.insert(name.to_string()) {
            return Err(UriError::DuplicateParameter(name.to_string()));
        }

        match name {
            "amount" => amount = Some(parse_amount(raw_value)?),
            "label" => label = Some(decode_component(name, raw_value)?),
            "message" => message = Some(decode_component(name, raw_value)?),
            "r" => request_url = Some(parse_request_url(&decode_component(name, raw_value)?)?),
            _ if name.starts_with("req-") => {
                return Err(UriError::UnsupportedRequirement(name.to_string()))
            }
            _ => {
                // Unknown optional parameters are ignored
            }
        }
    }

    let mut intent = PaymentIntent::new(address);
    if let Some(memo) = message.or(label) {
        intent = intent.with_memo(memo);
    }
    if let Some(amount) = amount {
        intent = intent.with_amount(amount);
    }
    if let Some(url) = request_url {
        if let Some(mac) = url.strip_prefix(BLUETOOTH_URL_PREFIX) {
            intent = intent.with_transport_hint(mac);
        }
        intent = intent.with_payment_request_url(url);
    }

    Ok(intent)
}

fn decode_component(name: &str, raw: &str) -> Result<String, UriError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UriError::InvalidEncoding(name.to_string()))
}

fn parse_amount(raw: &str) -> Result<Amount, UriError> {
    Amount::from_str_in(raw, Denomination::Bitcoin).map_err(|e| UriError::InvalidAmount {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_request_url(url: &str) -> Result<String, UriError> {
    if url.starts_with(BLUETOOTH_URL_PREFIX) {
        return Ok(url.to_string());
    }
    url::Url::parse(url)
        .map(|_| url.to_string())
        .map_err(|e| UriError::InvalidRequestUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
}
