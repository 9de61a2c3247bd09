use bitcoin::{Network, NetworkKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment protocol network identifier for mainnet
pub const PAYMENT_PROTOCOL_ID_MAINNET: &str = "main";

/// Payment protocol network identifier for testnet
pub const PAYMENT_PROTOCOL_ID_TESTNET: &str = "test";

/// The chain a classifier is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChainNetwork {
    #[default]
    Main,
    Test,
}

impl ChainNetwork {
    pub fn bitcoin_network(self) -> Network {
        match self {
            ChainNetwork::Main => Network::Bitcoin,
            ChainNetwork::Test => Network::Testnet,
        }
    }

    pub fn network_kind(self) -> NetworkKind {
        NetworkKind::from(self.bitcoin_network())
    }

    /// Identifier a payment request must declare to be accepted on this chain
    pub fn payment_protocol_id(self) -> &'static str {
        match self {
            ChainNetwork::Main => PAYMENT_PROTOCOL_ID_MAINNET,
            ChainNetwork::Test => PAYMENT_PROTOCOL_ID_TESTNET,
        }
    }
}

impl fmt::Display for ChainNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payment_protocol_id())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown network {0:?} (expected \"main\" or \"test\")")]
pub struct ParseNetworkError(pub String);

impl FromStr for ChainNetwork {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" | "bitcoin" => Ok(ChainNetwork::Main),
            "test" | "testnet" => Ok(ChainNetwork::Test),
            _ => Err(ParseNetworkError(s.to_string())),
        }
    }
}
