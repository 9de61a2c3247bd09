use bitcoin::{Address, Amount};

/// A normalised request to pay one address
///
/// Built once by the classifier or validator and handed to the caller; the
/// `with_*` methods consume and return, so no half-built intent is ever
/// observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    address: Address,
    memo: Option<String>,
    amount: Option<Amount>,
    transport_hint: Option<String>,
    payment_request_url: Option<String>,
}

impl PaymentIntent {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            memo: None,
            amount: None,
            transport_hint: None,
            payment_request_url: None,
        }
    }

    /// Empty memos are dropped
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        let memo = memo.into();
        self.memo = if memo.is_empty() { None } else { Some(memo) };
        self
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Short-range transport address, e.g. a Bluetooth MAC
    pub fn with_transport_hint(mut self, hint: impl Into<String>) -> Self {
        self.transport_hint = Some(hint.into());
        self
    }

    pub fn with_payment_request_url(mut self, url: impl Into<String>) -> Self {
        self.payment_request_url = Some(url.into());
        self
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    /// `None` means the payer chooses the amount
    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn transport_hint(&self) -> Option<&str> {
        self.transport_hint.as_deref()
    }

    pub fn payment_request_url(&self) -> Option<&str> {
        self.payment_request_url.as_deref()
    }

    pub fn has_amount(&self) -> bool {
        self.amount.is_some()
    }
}
