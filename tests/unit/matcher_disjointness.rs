//! Text shapes never overlap except where priority decides

use payment_intake::classifier::patterns::BASE58_ALPHABET;
use payment_intake::classifier::{detect_shape, matching_shapes, TextShape};
use payment_intake::codec::base43::ALPHABET as BASE43_ALPHABET;
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use std::collections::HashSet;

fn from_alphabet(
    alphabet: &'static [u8],
    len: std::ops::RangeInclusive<usize>,
) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(alphabet), len)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

/// Base58, Base43 and lowercase letters together
fn union_alphabet() -> Vec<u8> {
    let mut chars: Vec<u8> = BASE58_ALPHABET
        .bytes()
        .chain(BASE43_ALPHABET.iter().copied())
        .chain(b'a'..=b'z')
        .collect();
    chars.sort_unstable();
    chars.dedup();
    chars
}

/// Strings of length 1-200 that land in and around every matcher
fn matcher_shaped() -> impl Strategy<Value = String> {
    let prefix = prop_oneof![Just(""), Just("BITCOIN:"), Just("bitcoin:"), Just("5")];
    let body = prop_oneof![
        prop::collection::vec(prop::sample::select(BASE58_ALPHABET.as_bytes()), 0..=192),
        prop::collection::vec(prop::sample::select(BASE43_ALPHABET.as_slice()), 0..=192),
        prop::collection::vec(prop::sample::select(union_alphabet()), 0..=192),
    ];
    (prefix, body)
        .prop_map(|(prefix, body)| {
            let mut input = prefix.to_string();
            input.extend(body.into_iter().map(char::from));
            input
        })
        .prop_filter("non-empty", |input| !input.is_empty())
}

proptest! {
    #[test]
    fn address_shaped_text_matches_once(input in from_alphabet(BASE58_ALPHABET.as_bytes(), 20..=40)) {
        prop_assert_eq!(matching_shapes(&input), vec![TextShape::Address]);
    }

    #[test]
    fn key_shaped_text_matches_once(tail in from_alphabet(BASE58_ALPHABET.as_bytes(), 50..=51)) {
        let input = format!("5{}", tail);
        prop_assert_eq!(matching_shapes(&input), vec![TextShape::PrivateKey]);
    }

    #[test]
    fn transaction_shaped_text_matches_once(input in from_alphabet(BASE43_ALPHABET, 100..=300)) {
        prop_assume!(!input.starts_with("BITCOIN:"));
        prop_assert_eq!(matching_shapes(&input), vec![TextShape::Transaction]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2048))]

    #[test]
    fn at_most_one_shape_outside_payment_requests(input in matcher_shaped()) {
        let shapes = matching_shapes(&input);
        if input.starts_with("BITCOIN:") {
            prop_assert_eq!(shapes.first(), Some(&TextShape::PaymentRequestUri));
        } else {
            prop_assert!(shapes.len() <= 1, "{:?} matched {:?}", input, shapes);
        }
        prop_assert_eq!(detect_shape(&input), shapes.first().copied());
    }
}

#[test]
fn matcher_shaped_inputs_reach_every_shape() {
    let mut runner = TestRunner::deterministic();
    let strategy = matcher_shaped();
    let mut seen = HashSet::new();
    for _ in 0..20_000 {
        let input = strategy.new_tree(&mut runner).unwrap().current();
        seen.extend(detect_shape(&input));
    }
    assert_eq!(seen.len(), 5, "only reached {:?}", seen);
}
