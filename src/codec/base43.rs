//! Base43 text encoding
//!
//! Base43 uses exactly the characters that QR alphanumeric mode can carry
//! (minus space and `%`), so binary payloads survive barcode transport
//! without the byte-mode size penalty.
//!
//! # Usage
//!
//! ```rust
//! use payment_intake::codec::base43;
//!
//! let encoded = base43::encode(&[0x00, 0x01, 0xff]);
//! assert_eq!(base43::decode(&encoded).unwrap(), vec![0x00, 0x01, 0xff]);
//! ```

use super::CodecError;

/// Digit alphabet, most significant digit value last
pub const ALPHABET: &[u8; 43] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ$*+-./:";

const RADIX: u32 = 43;

const DIGITS_PER_STEP: usize = 5;

fn digit_value(c: char) -> Option<u32> {
    if !c.is_ascii() {
        return None;
    }
    ALPHABET
        .iter()
        .position(|&a| a == c as u8)
        .map(|index| index as u32)
}

/// Encode bytes as Base43
///
/// Each leading zero byte becomes one leading `'0'` digit.
pub fn encode(input: &[u8]) -> String {
    let zeros = input.iter().take_while(|&&b| b == 0).count();

    // Little-endian base-43 digits of the non-zero tail
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 3 / 2 + 1);
    for &byte in &input[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % RADIX) as u8;
            carry /= RADIX;
        }
        while carry > 0 {
            digits.push((carry % RADIX) as u8);
            carry /= RADIX;
        }
    }

    let mut encoded = String::with_capacity(zeros + digits.len());
    encoded.extend(std::iter::repeat(ALPHABET[0] as char).take(zeros));
    encoded.extend(digits.iter().rev().map(|&d| ALPHABET[d as usize] as char));
    encoded
}

/// Longest Base43 text that `bytes` input bytes can encode to
///
/// Callers use this to refuse over-long text before paying for a decode.
pub fn max_encoded_len(bytes: usize) -> usize {
    (bytes as f64 * 256f64.ln() / f64::from(RADIX).ln()).ceil() as usize
}

/// Decode a Base43 string
///
/// Fails on the first character outside [`ALPHABET`], reporting its position.
pub fn decode(input: &str) -> Result<Vec<u8>, CodecError> {
    let mut values: Vec<u32> = Vec::with_capacity(input.len());
    for (position, character) in input.chars().enumerate() {
        let value = digit_value(character).ok_or(CodecError::InvalidCharacter {
            character,
            position,
        })?;
        values.push(value);
    }

    let zeros = values.iter().take_while(|&&v| v == 0).count();

    // Little-endian base-2^32 limbs; 43^5 < 2^28 so five digits fold into
    // one multiply per limb without overflowing u64
    let mut limbs: Vec<u32> = Vec::with_capacity(values.len() / 5 + 1);
    for chunk in values[zeros..].chunks(DIGITS_PER_STEP) {
        let mut multiplier: u64 = 1;
        let mut carry: u64 = 0;
        for &value in chunk {
            multiplier *= u64::from(RADIX);
            carry = carry * u64::from(RADIX) + u64::from(value);
        }
        for limb in limbs.iter_mut() {
            let acc = u64::from(*limb) * multiplier + carry;
            *limb = acc as u32;
            carry = acc >> 32;
        }
        while carry > 0 {
            limbs.push(carry as u32);
            carry >>= 32;
        }
    }

    let mut decoded = vec![0u8; zeros];
    decoded.extend(
        limbs
            .iter()
            .rev()
            .flat_map(|limb| limb.to_be_bytes())
            .skip_while(|&b| b == 0),
    );
    Ok(decoded)
}
