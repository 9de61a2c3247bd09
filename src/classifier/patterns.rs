//! Input shape predicates
//!
//! The three regex shapes are mutually exclusive by construction:
//! - address: base58, 20-40 characters
//! - private key: `5` + 50-51 base58 characters (51-52 total)
//! - transaction: uppercase Base43 alphabet, 100+ characters
//!
//! Lengths separate the first two from each other and from the third; the
//! base58 alphabet has no `:` so neither scheme prefix can reach them. The
//! lowercase `bitcoin:` prefix cannot be a transaction because the Base43
//! alphabet has no lowercase letters. Only `BITCOIN:` overlaps the
//! transaction shape, and the matcher order puts it first.

use lazy_static::lazy_static;
use regex::Regex;

/// Base58 alphabet (no `0`, `O`, `I`, `l`)
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Scheme of a Base43-packed payment request
pub const PAYMENT_REQUEST_SCHEME: &str = "BITCOIN:";

/// Scheme of a BIP21-style payment URI
pub const BITCOIN_URI_SCHEME: &str = "bitcoin:";

lazy_static! {
    static ref ADDRESS_PATTERN: Regex =
        Regex::new(&format!("^[{}]{{20,40}}$", BASE58_ALPHABET)).expect("address pattern");
    static ref PRIVATE_KEY_PATTERN: Regex =
        Regex::new(&format!("^5[{}]{{50,51}}$", BASE58_ALPHABET)).expect("private key pattern");
    static ref TRANSACTION_PATTERN: Regex =
        Regex::new(r"^[0-9A-Z$*+\-./:]{100,}$").expect("transaction pattern");
}

pub fn is_payment_request_uri(input: &str) -> bool {
    input.starts_with(PAYMENT_REQUEST_SCHEME)
}

pub fn is_bitcoin_uri(input: &str) -> bool {
    input.starts_with(BITCOIN_URI_SCHEME)
}

pub fn is_address(input: &str) -> bool {
    ADDRESS_PATTERN.is_match(input)
}

pub fn is_private_key(input: &str) -> bool {
    PRIVATE_KEY_PATTERN.is_match(input)
}

pub fn is_transaction(input: &str) -> bool {
    TRANSACTION_PATTERN.is_match(input)
}
