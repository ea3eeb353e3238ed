//! Payload decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;

/// How a source payload was decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    Base58,
    Base64,
    Plain,
}

/// Decodes a source payload into JSON text.
///
/// The payload is trimmed, then tried as base58 (bitcoin alphabet) and as
/// standard base64; the first decoding that yields valid UTF-8 wins. If
/// neither does, the trimmed text is returned as is.
pub fn decode_payload(raw: &str) -> (String, PayloadEncoding) {
    let content = raw.trim();

    if let Some(text) = bs58::decode(content)
        .into_vec()
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
    {
        debug!("Decoded base58 payload ({} bytes)", text.len());
        return (text, PayloadEncoding::Base58);
    }

    if let Some(text) = STANDARD
        .decode(content)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
    {
        debug!("Decoded base64 payload ({} bytes)", text.len());
        return (text, PayloadEncoding::Base64);
    }

    (content.to_string(), PayloadEncoding::Plain)
}
