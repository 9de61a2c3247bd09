//! Compact text codecs for barcode-carried payloads
//!
//! Two forms share the Base43 alphabet:
//! - **Plain binary** - the whole string is Base43 (payment requests behind
//!   the `BITCOIN:` scheme)
//! - **Header-prefixed binary** - the first character says whether the Base43
//!   remainder is gzip-compressed (`Z`) or raw (anything else, `-` when we
//!   produce it); used for signed transactions

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use tracing::debug;

pub mod base43;

/// Header marking a gzip-compressed Base43 body
pub const COMPRESSED_HEADER: char = 'Z';

/// Header we emit for an uncompressed Base43 body
pub const UNCOMPRESSED_HEADER: char = '-';

/// Upper bound on inflated payload size
pub const MAX_DECOMPRESSED_BYTES: u64 = 1_000_000;

/// Upper bound on the Base43 body of a header-prefixed payload, in bytes;
/// matches the standard transaction size limit
pub const MAX_ENCODED_BODY_BYTES: usize = 100_000;

/// Codec error types
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid base43 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("empty payload")]
    Empty,

    #[error("decompression failed: {0}")]
    Decompress(#[from] std::io::Error),

    #[error("decompressed payload exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("encoded payload is {length} characters (limit {limit})")]
    TooLong { length: usize, limit: usize },
}

/// Decode a plain Base43 payload
pub fn decode_binary(content: &str) -> Result<Vec<u8>, CodecError> {
    base43::decode(content)
}

/// Encode bytes as a plain Base43 payload
pub fn encode_binary(bytes: &[u8]) -> String {
    base43::encode(bytes)
}

/// Decode a header-prefixed payload, inflating it when the header says so
pub fn decode_decompress_binary(content: &str) -> Result<Vec<u8>, CodecError> {
    let limit = base43::max_encoded_len(MAX_ENCODED_BODY_BYTES) + 1;
    if content.len() > limit {
        return Err(CodecError::TooLong {
            length: content.len(),
            limit,
        });
    }

    let mut chars = content.chars();
    let header = chars.next().ok_or(CodecError::Empty)?;
    let body = base43::decode(chars.as_str())?;

    if header != COMPRESSED_HEADER {
        return Ok(body);
    }

    let mut inflated = Vec::new();
    GzDecoder::new(body.as_slice())
        .take(MAX_DECOMPRESSED_BYTES + 1)
        .read_to_end(&mut inflated)?;

    if inflated.len() as u64 > MAX_DECOMPRESSED_BYTES {
        return Err(CodecError::TooLarge {
            limit: MAX_DECOMPRESSED_BYTES,
        });
    }

    debug!(
        "Inflated {} compressed bytes to {} bytes",
        body.len(),
        inflated.len()
    );
    Ok(inflated)
}

/// Encode bytes with the uncompressed header
pub fn encode_uncompressed_binary(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 3 / 2 + 2);
    encoded.push(UNCOMPRESSED_HEADER);
    encoded.push_str(&base43::encode(bytes));
    encoded
}

/// Gzip then encode bytes with the compressed header
pub fn encode_compress_binary(bytes: &[u8]) -> Result<String, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;

    let mut encoded = String::with_capacity(compressed.len() * 3 / 2 + 2);
    encoded.push(COMPRESSED_HEADER);
    encoded.push_str(&base43::encode(&compressed));
    Ok(encoded)
}
