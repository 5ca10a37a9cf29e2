use alloy::primitives::{Address, U256};
use eyre::{bail, eyre, Result};
use std::fmt::Write;

/// Decodes a hex string into a vector of bytes
///
/// ```
/// use vitrine_common::utils::strings::decode_hex;
///
/// let hex = "48656c6c6f20576f726c64"; // "Hello World" in hex
/// let result = decode_hex(hex).expect("should decode hex");
/// assert_eq!(result, vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100]);
/// ```
pub fn decode_hex(mut s: &str) -> Result<Vec<u8>> {
    // normalize
    s = s.trim_start_matches("0x").trim();

    if s.is_empty() {
        return Ok(vec![]);
    }

    if s.len() % 2 != 0 {
        bail!("odd-length hex string: {}", s);
    }

    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| eyre!("invalid hex string: {}", s))
}

/// Encodes a vector of bytes into a hex string
///
/// ```
/// use vitrine_common::utils::strings::encode_hex;
///
/// let bytes = vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100];
/// let result = encode_hex(&bytes);
/// assert_eq!(result, "48656c6c6f20576f726c64");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::new(), |mut acc, b| {
        write!(acc, "{b:02x}").expect("unable to write");
        acc
    })
}

/// Parses a 256-bit word from a hex string. Accepts an optional `0x` prefix
/// and up to 64 hex characters; shorter inputs are treated as the low-order
/// digits of the word.
///
/// ```
/// use vitrine_common::utils::strings::word_from_hex;
/// use alloy::primitives::U256;
///
/// assert_eq!(word_from_hex("0x2a").expect("should parse"), U256::from(42u8));
/// assert!(word_from_hex("0xzz").is_err());
/// ```
pub fn word_from_hex(s: &str) -> Result<U256> {
    let digits = s.trim_start_matches("0x").trim();

    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    if digits.len() > 64 {
        bail!("hex string too long for a 256-bit word: {}", s);
    }

    U256::from_str_radix(digits, 16).map_err(|_| eyre!("invalid hex string: {}", s))
}

/// Parses a 160-bit address from a hex string. Accepts an optional `0x`
/// prefix and up to 40 hex characters; shorter inputs are left-padded with
/// zeroes.
///
/// ```
/// use vitrine_common::utils::strings::address_from_hex;
///
/// let address = address_from_hex("0xdeadbeef").expect("should parse");
/// assert_eq!(address.as_slice()[19], 0xef);
/// assert!(address_from_hex("0x0000000000000000000000000000000000000000ff").is_err());
/// ```
pub fn address_from_hex(s: &str) -> Result<Address> {
    let digits = s.trim_start_matches("0x").trim();

    if digits.len() > 40 {
        bail!("hex string too long for a 160-bit address: {}", s);
    }

    let padded = format!("{digits:0>40}");
    let bytes = decode_hex(&padded)?;

    Ok(Address::from_slice(&bytes))
}
