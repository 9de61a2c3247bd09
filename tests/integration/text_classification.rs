//! Text classification through the full matcher chain

use crate::common::assertion_helpers::{expect_error, expect_intent, expect_request_rejected};
use crate::common::fixtures::{
    p2pkh_address, sample_transaction_bytes, uncompressed_wif, GENESIS_ADDRESS, NOW,
};
use crate::common::payment_requests::{recipient, PaymentRequestBuilder};
use bitcoin::{Amount, Network};
use payment_intake::chain::ChainNetwork;
use payment_intake::classifier::InputClassifier;
use payment_intake::codec;
use payment_intake::payment_request::MAX_PAYMENT_REQUEST_BYTES;
use payment_intake::types::{
    ClassificationOutcome, IntentListener, PaymentIntent, PaymentRequestReason, ReasonCode,
};
use std::time::{Duration, Instant};

fn mainnet() -> InputClassifier {
    InputClassifier::new(ChainNetwork::Main)
}

#[test]
fn test_plain_address_becomes_bare_intent() {
    let outcome = mainnet().classify_text_at(GENESIS_ADDRESS, NOW);
    let intent = expect_intent(&outcome);

    assert_eq!(intent.address().to_string(), GENESIS_ADDRESS);
    assert_eq!(intent.amount(), None);
    assert_eq!(intent.memo(), None);
    assert_eq!(intent.transport_hint(), None);
}

#[test]
fn test_testnet_address_rejected_on_mainnet() {
    let address = p2pkh_address(0x11, Network::Testnet).to_string();
    let outcome = mainnet().classify_text_at(&address, NOW);
    expect_error(&outcome, ReasonCode::InvalidAddress);

    let testnet = InputClassifier::new(ChainNetwork::Test);
    let intent_outcome = testnet.classify_text_at(&address, NOW);
    assert_eq!(expect_intent(&intent_outcome).address().to_string(), address);
}

#[test]
fn test_address_with_bad_checksum() {
    // Last character changed
    let outcome = mainnet().classify_text_at("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb", NOW);
    expect_error(&outcome, ReasonCode::InvalidAddress);
}

#[test]
fn test_private_key_yields_address_only() {
    let (wif, address) = uncompressed_wif(0x5a);
    assert!(wif.starts_with('5'));

    let outcome = mainnet().classify_text_at(&wif, NOW);
    let intent = expect_intent(&outcome);
    assert_eq!(intent.address(), &address);
    assert_eq!(intent.amount(), None);

    // Nothing in the rendered outcome carries the key
    assert!(!format!("{:?}", outcome).contains(&wif));
}

#[test]
fn test_corrupt_private_key_does_not_echo_key() {
    let (wif, _) = uncompressed_wif(0x5b);
    let mut corrupted: Vec<char> = wif.chars().collect();
    let last = corrupted.len() - 1;
    corrupted[last] = if corrupted[last] == 'z' { 'y' } else { 'z' };
    let corrupted: String = corrupted.into_iter().collect();

    let outcome = mainnet().classify_text_at(&corrupted, NOW);
    let detail = expect_error(&outcome, ReasonCode::InvalidAddress);
    assert!(!detail.contains(&corrupted));
}

#[test]
fn test_bitcoin_uri_with_amount_and_message() {
    let input = format!(
        "bitcoin:{}?amount=0.0015&label=Shop&message=Order%20%2342",
        GENESIS_ADDRESS
    );
    let outcome = mainnet().classify_text_at(&input, NOW);
    let intent = expect_intent(&outcome);

    assert_eq!(intent.address().to_string(), GENESIS_ADDRESS);
    assert_eq!(intent.amount(), Some(Amount::from_sat(150_000)));
    assert_eq!(intent.memo(), Some("Order #42"));
}

#[test]
fn test_bitcoin_uri_label_is_fallback_memo() {
    let input = format!("bitcoin:{}?label=Corner%20Cafe", GENESIS_ADDRESS);
    let outcome = mainnet().classify_text_at(&input, NOW);
    assert_eq!(expect_intent(&outcome).memo(), Some("Corner Cafe"));
}

#[test]
fn test_bitcoin_uri_bluetooth_request_url() {
    let input = format!("bitcoin:{}?r=bt:00112233AABB", GENESIS_ADDRESS);
    let outcome = mainnet().classify_text_at(&input, NOW);
    let intent = expect_intent(&outcome);
    assert_eq!(intent.transport_hint(), Some("00112233AABB"));
    assert_eq!(intent.payment_request_url(), Some("bt:00112233AABB"));
}

#[test]
fn test_bitcoin_uri_errors_carry_input() {
    let cases = [
        format!("bitcoin:{}?amount=abc", GENESIS_ADDRESS),
        format!("bitcoin:{}?req-signature=1", GENESIS_ADDRESS),
        format!("bitcoin:{}?amount=1&amount=2", GENESIS_ADDRESS),
        "bitcoin:".to_string(),
        "bitcoin:notanaddress".to_string(),
    ];

    for input in cases {
        let outcome = mainnet().classify_text_at(&input, NOW);
        let detail = expect_error(&outcome, ReasonCode::InvalidUri);
        assert!(detail.contains(&input), "detail {:?} lacks input", detail);
    }
}

#[test]
fn test_packed_payment_request() {
    let bytes = PaymentRequestBuilder::new().build();
    let input = format!("BITCOIN:{}", codec::encode_binary(&bytes));

    let outcome = mainnet().classify_text_at(&input, NOW);
    let intent = expect_intent(&outcome);
    assert_eq!(intent.address(), &recipient());
    assert_eq!(intent.amount(), Some(Amount::from_sat(150_000)));
    assert_eq!(intent.memo(), Some("Payment for order 1138"));
}

#[test]
fn test_packed_payment_request_rejections() {
    let expired = PaymentRequestBuilder::new().expires(NOW - 1).build();
    let input = format!("BITCOIN:{}", codec::encode_binary(&expired));
    let outcome = mainnet().classify_text_at(&input, NOW);
    expect_request_rejected(&outcome, PaymentRequestReason::Expired);

    // Lowercase is outside the Base43 alphabet
    let outcome = mainnet().classify_text_at("BITCOIN:abc", NOW);
    expect_request_rejected(&outcome, PaymentRequestReason::Undecodable);
}

#[test]
fn test_over_long_packed_request_is_oversized() {
    let limit = codec::base43::max_encoded_len(MAX_PAYMENT_REQUEST_BYTES);
    let input = format!("BITCOIN:{}", "Z".repeat(150_000));

    let started = Instant::now();
    let outcome = mainnet().classify_text_at(&input, NOW);
    let detail = expect_request_rejected(&outcome, PaymentRequestReason::Oversized);

    assert!(detail.contains(&limit.to_string()), "{}", detail);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_over_long_transaction_text_rejected() {
    let input = format!("Z{}", "A".repeat(200_000));

    let started = Instant::now();
    let outcome = mainnet().classify_text_at(&input, NOW);
    let detail = expect_error(&outcome, ReasonCode::InvalidTransaction);

    assert!(detail.contains("200001 characters"), "{}", detail);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_encoded_transaction_both_headers() {
    let (transaction, bytes) = sample_transaction_bytes();

    let plain = codec::encode_uncompressed_binary(&bytes);
    let compressed = codec::encode_compress_binary(&bytes).unwrap();

    for input in [plain, compressed] {
        match mainnet().classify_text_at(&input, NOW) {
            ClassificationOutcome::DirectTransaction {
                bytes: decoded,
                transaction: parsed,
            } => {
                assert_eq!(decoded, bytes);
                assert_eq!(parsed, transaction);
            }
            other => panic!("expected a direct transaction, got {:?}", other),
        }
    }
}

#[test]
fn test_encoded_garbage_is_invalid_transaction() {
    let garbage = format!("-{}", codec::encode_binary(&[0xff; 90]));
    let outcome = mainnet().classify_text_at(&garbage, NOW);
    expect_error(&outcome, ReasonCode::InvalidTransaction);
}

#[test]
fn test_unmatched_text_is_echoed() {
    for input in ["", "hello world", "lightning:lnbc1...", "12345"] {
        let outcome = mainnet().classify_text_at(input, NOW);
        assert_eq!(outcome, ClassificationOutcome::Unclassifiable(input.to_string()));
    }
}

#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl IntentListener for Recorder {
    fn on_payment_intent(&mut self, intent: PaymentIntent) {
        self.calls.push(format!("intent:{}", intent.address()));
    }

    fn on_direct_transaction(&mut self, transaction: bitcoin::Transaction) {
        self.calls.push(format!("tx:{}", transaction.compute_txid()));
    }

    fn on_error(&mut self, reason: ReasonCode, _detail: &str) {
        self.calls.push(format!("error:{}", reason));
    }
}

#[test]
fn test_each_outcome_fires_one_callback() {
    let (_, tx_bytes) = sample_transaction_bytes();
    let inputs = vec![
        GENESIS_ADDRESS.to_string(),
        format!("bitcoin:{}?amount=x", GENESIS_ADDRESS),
        codec::encode_uncompressed_binary(&tx_bytes),
        "nothing to see".to_string(),
    ];

    let mut recorder = Recorder::default();
    for input in &inputs {
        mainnet().classify_text_at(input, NOW).dispatch(&mut recorder);
    }

    // Unclassifiable input reaches on_error through the default handler
    assert_eq!(recorder.calls.len(), 4);
    assert_eq!(recorder.calls[0], format!("intent:{}", GENESIS_ADDRESS));
    assert_eq!(recorder.calls[1], "error:invalid-uri");
    assert!(recorder.calls[2].starts_with("tx:"));
    assert_eq!(recorder.calls[3], "error:unclassifiable");
}

#[test]
fn test_unclassifiable_text_reaches_error_callback() {
    let mut recorder = Recorder::default();
    mainnet()
        .classify_text_at("hello world", NOW)
        .dispatch(&mut recorder);
    assert_eq!(recorder.calls, vec!["error:unclassifiable".to_string()]);
}
