//! Wallet collaborator seen by the broadcast worker

use crate::types::PaymentIntent;
use bitcoin::{Address, Amount, Transaction};

/// A fully specified spend: pay `amount` to `recipient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub recipient: Address,
    pub amount: Amount,
    pub memo: Option<String>,
}

impl SendRequest {
    pub fn to(recipient: Address, amount: Amount) -> Self {
        Self {
            recipient,
            amount,
            memo: None,
        }
    }

    /// Build from a classified intent, using `fallback_amount` when the payee
    /// left the amount open
    pub fn from_intent(intent: &PaymentIntent, fallback_amount: Amount) -> Self {
        Self {
            recipient: intent.address().clone(),
            amount: intent.amount().unwrap_or(fallback_amount),
            memo: intent.memo().map(str::to_string),
        }
    }
}

/// Wallet send failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("insufficient funds: missing {missing}")]
    InsufficientFunds { missing: Amount },

    #[error("broadcast failed: {0}")]
    Broadcast(String),
}

/// Completes and commits a send request without relaying it
///
/// Implementations may block for a long time; they are only ever called from
/// the blocking pool. Concurrent callers sharing one wallet must be
/// serialised by the implementation.
pub trait OfflineWallet: Send + Sync + 'static {
    fn send_coins_offline(&self, request: SendRequest) -> Result<Transaction, SendError>;
}
