use alloy::primitives::{Address, U256};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use super::state::HaltReason;

/// A single trace event.
///
/// Every event carries its sequence number, the program counter of the
/// instruction that produced it, and the gas remaining at the moment it was
/// recorded, alongside the variant payload describing the mirrored action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Monotonically increasing sequence number, contiguous from zero.
    pub index: u64,

    /// Program counter at which the event was generated.
    pub pc: u64,

    /// Gas remaining at the moment the event was recorded.
    #[serde(rename = "gasRemaining", with = "serde_dec")]
    pub gas_remaining: u128,

    /// The action this event mirrors.
    #[serde(flatten)]
    pub kind: TraceKind,
}

/// The action mirrored by a [`TraceEvent`].
///
/// The serialized `type` tags and field formats are part of the stable trace
/// JSON contract: words render as `0x` + 64 hex characters, addresses as
/// `0x` + 40, byte strings as `0x` + two per byte, and big integers as
/// decimal strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TraceKind {
    /// An opcode was fetched and is about to execute.
    #[serde(rename = "opcode.start")]
    OpcodeStart {
        opcode: u8,
        #[serde(rename = "opcodeName")]
        opcode_name: String,
    },

    /// A value was pushed onto the stack.
    #[serde(rename = "stack.push")]
    StackPush {
        #[serde(with = "serde_word")]
        value: U256,
    },

    /// A value was popped off the stack.
    #[serde(rename = "stack.pop")]
    StackPop {
        #[serde(with = "serde_word")]
        value: U256,
    },

    /// Bytes were written into memory.
    #[serde(rename = "memory.write")]
    MemoryWrite {
        offset: u64,
        #[serde(with = "serde_bytes_hex")]
        data: Vec<u8>,
    },

    /// A region of memory was read.
    #[serde(rename = "memory.read")]
    MemoryRead { offset: u64, length: u64 },

    /// A storage slot was read through the host.
    #[serde(rename = "storage.read")]
    StorageRead {
        #[serde(with = "serde_address")]
        address: Address,
        #[serde(with = "serde_word")]
        key: U256,
        #[serde(with = "serde_word")]
        value: U256,
    },

    /// A storage slot is about to be written through the host.
    #[serde(rename = "storage.write")]
    StorageWrite {
        #[serde(with = "serde_address")]
        address: Address,
        #[serde(with = "serde_word")]
        key: U256,
        #[serde(with = "serde_word")]
        value: U256,
    },

    /// Gas was deducted from the budget.
    #[serde(rename = "gas.charge")]
    GasCharge {
        #[serde(with = "serde_dec")]
        amount: u128,
        reason: String,
    },

    /// A JUMP or JUMPI resolved its target.
    #[serde(rename = "jump")]
    Jump { from: u64, to: u64, conditional: bool, taken: bool },

    /// Execution reached a terminal state.
    #[serde(rename = "halt")]
    Halt { reason: HaltReason },

    /// A log record was emitted through the host.
    #[serde(rename = "log")]
    Log {
        #[serde(with = "serde_address")]
        address: Address,
        #[serde(with = "serde_topics")]
        topics: Vec<U256>,
        #[serde(with = "serde_bytes_hex")]
        data: Vec<u8>,
    },
}

/// Append-only collector of [`TraceEvent`]s.
///
/// Events are never reordered or removed; sequence numbers are assigned at
/// record time and are contiguous from zero. Cloning produces an independent
/// collector sharing no state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    events: Vec<TraceEvent>,
    next_index: u64,
}

impl Trace {
    /// Creates a new, empty [`Trace`].
    pub fn new() -> Trace {
        Trace { events: Vec::new(), next_index: 0 }
    }

    /// Append an event, stamping it with the next sequence number and the
    /// given program counter and gas reading.
    pub fn record(&mut self, pc: u64, gas_remaining: u128, kind: TraceKind) {
        let index = self.next_index;
        self.next_index += 1;
        self.events.push(TraceEvent { index, pc, gas_remaining, kind });
    }

    /// All recorded events, in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// The sequence number the next recorded event will receive.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serializes the trace to a JSON array of event objects. Field order and
    /// number formatting are stable, so identical executions produce
    /// byte-identical output.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.events).wrap_err("failed to encode trace")
    }

    /// Restores a trace from its JSON array form. The sequence counter is
    /// re-established from the number of events.
    pub fn from_json(json: &str) -> Result<Trace> {
        let events: Vec<TraceEvent> =
            serde_json::from_str(json).wrap_err("failed to decode trace")?;
        let next_index = events.len() as u64;
        Ok(Trace { events, next_index })
    }
}

mod serde_dec {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<u128>().map_err(serde::de::Error::custom)
    }
}

mod serde_word {
    use alloy::primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};
    use vitrine_common::utils::{hex::ToLowerHex, strings::word_from_hex};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", value.to_lower_hex()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        word_from_hex(&s).map_err(serde::de::Error::custom)
    }
}

mod serde_address {
    use alloy::primitives::Address;
    use serde::{Deserialize, Deserializer, Serializer};
    use vitrine_common::utils::{hex::ToLowerHex, strings::address_from_hex};

    pub fn serialize<S: Serializer>(value: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", value.to_lower_hex()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let s = String::deserialize(deserializer)?;
        address_from_hex(&s).map_err(serde::de::Error::custom)
    }
}

mod serde_bytes_hex {
    use serde::{Deserialize, Deserializer, Serializer};
    use vitrine_common::utils::strings::{decode_hex, encode_hex};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", encode_hex(value)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hex(&s).map_err(serde::de::Error::custom)
    }
}

mod serde_topics {
    use alloy::primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};
    use vitrine_common::utils::{hex::ToLowerHex, strings::word_from_hex};

    pub fn serialize<S: Serializer>(value: &[U256], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(value.iter().map(|topic| format!("0x{}", topic.to_lower_hex())))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<U256>, D::Error> {
        let strings = Vec::<String>::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| word_from_hex(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use vitrine_common::utils::strings::address_from_hex;

    use super::*;

    fn sample_trace() -> Trace {
        let address =
            address_from_hex("0x76697472696e6500000000000000000061646472").expect("bad address");

        let mut trace = Trace::new();
        trace.record(
            0,
            1_000_000,
            TraceKind::OpcodeStart { opcode: 0x60, opcode_name: "PUSH1".to_string() },
        );
        trace.record(0, 999_997, TraceKind::GasCharge { amount: 3, reason: "PUSH1".to_string() });
        trace.record(0, 999_997, TraceKind::StackPush { value: U256::from(5u8) });
        trace.record(2, 999_997, TraceKind::MemoryWrite { offset: 0, data: vec![0xaa, 0xbb] });
        trace.record(3, 999_997, TraceKind::MemoryRead { offset: 0, length: 32 });
        trace.record(
            4,
            999_797,
            TraceKind::StorageRead { address, key: U256::from(1u8), value: U256::MAX },
        );
        trace.record(
            5,
            994_797,
            TraceKind::StorageWrite { address, key: U256::from(1u8), value: U256::ZERO },
        );
        trace.record(
            6,
            994_797,
            TraceKind::Jump { from: 6, to: 9, conditional: true, taken: false },
        );
        trace.record(
            7,
            994_000,
            TraceKind::Log {
                address,
                topics: vec![U256::from(1u8), U256::from(2u8)],
                data: vec![0x01],
            },
        );
        trace.record(8, 994_000, TraceKind::Halt { reason: HaltReason::Stop });
        trace
    }

    #[test]
    fn test_indices_are_contiguous() {
        let trace = sample_trace();
        for (position, event) in trace.events().iter().enumerate() {
            assert_eq!(event.index, position as u64);
        }
        assert_eq!(trace.next_index(), trace.len() as u64);
    }

    #[test]
    fn test_json_roundtrip() {
        let trace = sample_trace();
        let json = trace.to_json().expect("failed to encode");
        let restored = Trace::from_json(&json).expect("failed to decode");
        assert_eq!(restored, trace);
        assert_eq!(restored.next_index(), trace.len() as u64);
    }

    #[test]
    fn test_json_field_formats() {
        let trace = sample_trace();
        let json = trace.to_json().expect("failed to encode");
        let values: Vec<serde_json::Value> =
            serde_json::from_str(&json).expect("failed to parse");

        for value in &values {
            assert!(value["type"].is_string());
            assert!(value["index"].is_u64());
            assert!(value["pc"].is_u64());
            assert!(value["gasRemaining"].is_string());
        }

        assert_eq!(values[0]["type"], "opcode.start");
        assert_eq!(values[0]["opcodeName"], "PUSH1");
        assert_eq!(values[1]["amount"], "3");

        let word = values[2]["value"].as_str().expect("value should be a string");
        assert_eq!(word.len(), 66);
        assert!(word.starts_with("0x"));
        assert!(word.ends_with("05"));

        assert_eq!(values[3]["data"], "0xaabb");

        let address = values[5]["address"].as_str().expect("address should be a string");
        assert_eq!(address.len(), 42);
        assert_eq!(address, "0x76697472696e6500000000000000000061646472");

        assert_eq!(values[7]["conditional"], true);
        assert_eq!(values[7]["taken"], false);

        let topics = values[8]["topics"].as_array().expect("topics should be an array");
        assert_eq!(topics.len(), 2);
        assert!(topics[0].as_str().expect("topic should be a string").ends_with("01"));

        assert_eq!(values[9]["reason"], "STOP");
    }

    #[test]
    fn test_halt_reason_strings() {
        let reasons = [
            (HaltReason::Stop, "STOP"),
            (HaltReason::Return, "RETURN"),
            (HaltReason::Revert, "REVERT"),
            (HaltReason::OutOfGas, "OUT_OF_GAS"),
            (HaltReason::InvalidOpcode, "INVALID_OPCODE"),
            (HaltReason::StackUnderflow, "STACK_UNDERFLOW"),
            (HaltReason::StackOverflow, "STACK_OVERFLOW"),
            (HaltReason::InvalidJump, "INVALID_JUMP"),
            (HaltReason::InvalidInstruction, "INVALID_INSTRUCTION"),
        ];
        for (reason, expected) in reasons {
            let mut trace = Trace::new();
            trace.record(0, 0, TraceKind::Halt { reason });
            let json = trace.to_json().expect("failed to encode");
            assert!(json.contains(&format!("\"reason\":\"{expected}\"")), "bad json: {json}");
        }
    }

    #[test]
    fn test_empty_data_encodes_as_bare_prefix() {
        let mut trace = Trace::new();
        trace.record(0, 0, TraceKind::MemoryWrite { offset: 0, data: Vec::new() });
        let json = trace.to_json().expect("failed to encode");
        assert!(json.contains("\"data\":\"0x\""));
        let restored = Trace::from_json(&json).expect("failed to decode");
        assert_eq!(restored, trace);
    }

    #[test]
    fn test_clone_shares_no_state() {
        let mut trace = sample_trace();
        let clone = trace.clone();
        trace.record(9, 0, TraceKind::Halt { reason: HaltReason::Revert });
        assert_eq!(clone.len(), trace.len() - 1);
        assert_eq!(clone.next_index(), trace.next_index() - 1);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = sample_trace().to_json().expect("failed to encode");
        let b = sample_trace().to_json().expect("failed to encode");
        assert_eq!(a, b);
    }
}
