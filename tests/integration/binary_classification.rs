//! Binary classification by declared content type

use crate::common::assertion_helpers::{expect_error, expect_intent, expect_request_rejected};
use crate::common::fixtures::{sample_transaction_bytes, NOW};
use crate::common::payment_requests::{output_to, recipient, PaymentRequestBuilder};
use bitcoin::Amount;
use payment_intake::chain::ChainNetwork;
use payment_intake::classifier::InputClassifier;
use payment_intake::types::{
    ClassificationOutcome, PaymentRequestReason, ReasonCode, MIMETYPE_PAYMENT_REQUEST,
    MIMETYPE_TRANSACTION,
};

#[test]
fn test_raw_transaction_bytes() {
    let (transaction, bytes) = sample_transaction_bytes();
    let classifier = InputClassifier::new(ChainNetwork::Main);

    match classifier.classify_binary_at(MIMETYPE_TRANSACTION, &bytes, NOW) {
        ClassificationOutcome::DirectTransaction {
            bytes: kept,
            transaction: parsed,
        } => {
            assert_eq!(kept, bytes);
            assert_eq!(parsed.compute_txid(), transaction.compute_txid());
        }
        other => panic!("expected a direct transaction, got {:?}", other),
    }
}

#[test]
fn test_truncated_transaction_bytes() {
    let (_, bytes) = sample_transaction_bytes();
    let classifier = InputClassifier::new(ChainNetwork::Main);

    let outcome = classifier.classify_binary_at(MIMETYPE_TRANSACTION, &bytes[..bytes.len() - 3], NOW);
    expect_error(&outcome, ReasonCode::InvalidTransaction);
}

#[test]
fn test_payment_request_bytes() {
    let bytes = PaymentRequestBuilder::new()
        .payment_url("https://merchant.example/pay/1138")
        .build();
    let classifier = InputClassifier::new(ChainNetwork::Main);

    let outcome = classifier.classify_binary_at(MIMETYPE_PAYMENT_REQUEST, &bytes, NOW);
    let intent = expect_intent(&outcome);
    assert_eq!(intent.address(), &recipient());
    assert_eq!(intent.amount(), Some(Amount::from_sat(150_000)));
    assert_eq!(
        intent.payment_request_url(),
        Some("https://merchant.example/pay/1138")
    );
    assert_eq!(intent.transport_hint(), None);
}

#[test]
fn test_payment_request_for_other_network() {
    let bytes = PaymentRequestBuilder::new().build();
    let classifier = InputClassifier::new(ChainNetwork::Test);

    let outcome = classifier.classify_binary_at(MIMETYPE_PAYMENT_REQUEST, &bytes, NOW);
    expect_request_rejected(&outcome, PaymentRequestReason::WrongNetwork);
}

#[test]
fn test_unknown_content_type_is_echoed() {
    let classifier = InputClassifier::new(ChainNetwork::Main);
    let outcome = classifier.classify_binary_at("image/png", &[0x89, 0x50, 0x4e, 0x47], NOW);
    assert_eq!(
        outcome,
        ClassificationOutcome::Unclassifiable("image/png".to_string())
    );
}

#[test]
fn test_same_bytes_under_wrong_type() {
    // Payment request bytes declared as a transaction
    let bytes = PaymentRequestBuilder::new().build();
    let classifier = InputClassifier::new(ChainNetwork::Main);

    let outcome = classifier.classify_binary_at(MIMETYPE_TRANSACTION, &bytes, NOW);
    assert_eq!(outcome.reason(), Some(ReasonCode::InvalidTransaction));
}

#[test]
fn test_bluetooth_url_same_shape_as_uri() {
    // Request bytes and a bitcoin: URI naming the same bt: endpoint
    let address = recipient();
    let bytes = PaymentRequestBuilder::new()
        .payment_url("bt:00112233AABB")
        .memo("")
        .outputs(vec![output_to(&address, 0)])
        .build();
    let uri = format!("bitcoin:{}?r=bt:00112233AABB", address);

    let classifier = InputClassifier::new(ChainNetwork::Main);
    let from_request = classifier.classify_binary_at(MIMETYPE_PAYMENT_REQUEST, &bytes, NOW);
    let from_uri = classifier.classify_text_at(&uri, NOW);

    assert_eq!(expect_intent(&from_request), expect_intent(&from_uri));
    assert_eq!(expect_intent(&from_request).payment_request_url(), Some("bt:00112233AABB"));
}
