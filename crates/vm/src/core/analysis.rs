use hashbrown::HashSet;

use super::opcodes;

/// One-pass scan of the bytecode yielding the set of valid jump targets.
///
/// A position is a valid target iff it holds a `JUMPDEST` byte at an opcode
/// boundary. The immediate data of PUSH opcodes is skipped, so a `0x5b` byte
/// inside a PUSH immediate is not a valid destination.
///
/// ```
/// use vitrine_vm::core::analysis::valid_jump_destinations;
///
/// // PUSH1 0x5b; JUMPDEST
/// let dests = valid_jump_destinations(&[0x60, 0x5b, 0x5b]);
/// assert!(!dests.contains(&1));
/// assert!(dests.contains(&2));
/// ```
pub fn valid_jump_destinations(bytecode: &[u8]) -> HashSet<usize> {
    let mut destinations = HashSet::new();

    let mut i = 0;
    while i < bytecode.len() {
        let opcode = bytecode[i];
        if opcode == opcodes::JUMPDEST {
            destinations.insert(i);
            i += 1;
        } else if opcodes::is_push(opcode) {
            // skip the immediate data
            i += 1 + opcodes::push_bytes(opcode);
        } else {
            i += 1;
        }
    }

    destinations
}

#[cfg(test)]
mod tests {
    use vitrine_common::utils::strings::decode_hex;

    use super::*;

    #[test]
    fn test_empty_bytecode_has_no_destinations() {
        assert!(valid_jump_destinations(&[]).is_empty());
    }

    #[test]
    fn test_finds_every_jumpdest() {
        let bytecode = decode_hex("5b60015b00").expect("failed to decode hex");
        let dests = valid_jump_destinations(&bytecode);
        assert!(dests.contains(&0));
        assert!(dests.contains(&3));
        assert_eq!(dests.len(), 2);
    }

    #[test]
    fn test_skips_push_immediates() {
        // PUSH2 0x5b5b; JUMPDEST
        let bytecode = decode_hex("615b5b5b").expect("failed to decode hex");
        let dests = valid_jump_destinations(&bytecode);
        assert!(!dests.contains(&1));
        assert!(!dests.contains(&2));
        assert!(dests.contains(&3));
    }

    #[test]
    fn test_truncated_push_immediate() {
        // PUSH32 with only two bytes of immediate data present
        let bytecode = decode_hex("7f5b5b").expect("failed to decode hex");
        assert!(valid_jump_destinations(&bytecode).is_empty());
    }
}
