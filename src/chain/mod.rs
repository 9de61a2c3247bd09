//! Bitcoin primitives used by the classifier
//!
//! Thin adapters over the `bitcoin` crate so the classifier only ever sees
//! network-checked values and one error type.

use bitcoin::secp256k1::Secp256k1;
use bitcoin::{consensus, Address, PrivateKey, Script, Transaction};
use std::str::FromStr;

pub mod network;

pub use network::{ChainNetwork, ParseNetworkError};

/// Chain primitive error types
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("invalid address {input}: {reason}")]
    InvalidAddress { input: String, reason: String },

    /// Never carries the key material itself
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid transaction: {0}")]
    InvalidTransaction(#[from] consensus::encode::Error),

    #[error("script is not a pay-to-address script")]
    NotPayToAddress,
}

/// Decode a textual address and require it to belong to `network`
pub fn decode_address(input: &str, network: ChainNetwork) -> Result<Address, ChainError> {
    Address::from_str(input)
        .and_then(|unchecked| unchecked.require_network(network.bitcoin_network()))
        .map_err(|e| ChainError::InvalidAddress {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

/// Decode a WIF private key and derive its pay-to-pubkey-hash address
///
/// Only the derived address leaves this function.
pub fn address_for_private_key(input: &str, network: ChainNetwork) -> Result<Address, ChainError> {
    let key = PrivateKey::from_wif(input)
        .map_err(|e| ChainError::InvalidPrivateKey(e.to_string()))?;

    if key.network != network.network_kind() {
        return Err(ChainError::InvalidPrivateKey(format!(
            "key is not for the {} network",
            network
        )));
    }

    let secp = Secp256k1::signing_only();
    let pubkey_hash = key.public_key(&secp).pubkey_hash();
    Ok(Address::p2pkh(pubkey_hash, network.bitcoin_network()))
}

/// Deserialize a consensus-encoded transaction
///
/// Trailing bytes after the transaction are rejected.
pub fn deserialize_transaction(bytes: &[u8]) -> Result<Transaction, ChainError> {
    Ok(consensus::deserialize::<Transaction>(bytes)?)
}

/// Recognise a pay-to-pubkey-hash output script and return its address
pub fn pay_to_address(script: &Script, network: ChainNetwork) -> Result<Address, ChainError> {
    if !script.is_p2pkh() {
        return Err(ChainError::NotPayToAddress);
    }
    Address::from_script(script, network.bitcoin_network()).map_err(|_| ChainError::NotPayToAddress)
}
