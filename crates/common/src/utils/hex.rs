use super::strings::encode_hex;
use alloy::primitives::{Address, U256};

/// A convenience trait which encodes a given EVM type into a sized, lowercase hex string.
///
/// Widths are fixed: words always render as 64 characters, addresses as 40,
/// byte strings as two characters per byte. No `0x` prefix is added.
pub trait ToLowerHex {
    /// Converts the value to a lowercase hexadecimal string representation.
    fn to_lower_hex(&self) -> String;
}

impl ToLowerHex for U256 {
    fn to_lower_hex(&self) -> String {
        encode_hex(&self.to_be_bytes_vec())
    }
}

impl ToLowerHex for Address {
    fn to_lower_hex(&self) -> String {
        encode_hex(self.as_slice())
    }
}

impl ToLowerHex for Vec<u8> {
    fn to_lower_hex(&self) -> String {
        encode_hex(self)
    }
}

impl ToLowerHex for [u8] {
    fn to_lower_hex(&self) -> String {
        encode_hex(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_is_zero_padded_to_64_chars() {
        let hex = U256::from(0x2au8).to_lower_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with(&"0".repeat(62)));
        assert!(hex.ends_with("2a"));
    }

    #[test]
    fn test_address_is_40_chars() {
        assert_eq!(Address::ZERO.to_lower_hex(), "0".repeat(40));
    }

    #[test]
    fn test_bytes_passthrough() {
        assert_eq!(vec![0xde, 0xad].to_lower_hex(), "dead");
    }
}
