use alloy::primitives::{Address, U256};
use hashbrown::HashMap;
use tracing::trace;

/// A log record emitted by a `LOG0`-`LOG4` opcode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// The address of the contract that emitted the log.
    pub address: Address,

    /// The log topics (up to 4 for LOG0-LOG4), in declaration order.
    pub topics: Vec<U256>,

    /// The raw data contained in the log.
    pub data: Vec<u8>,
}

impl LogEntry {
    /// Creates a new [`LogEntry`] with the given address, topics, and data.
    pub fn new(address: Address, topics: Vec<U256>, data: &[u8]) -> LogEntry {
        LogEntry { address, topics, data: data.to_vec() }
    }
}

/// The capability surface the interpreter uses for everything that outlives a
/// single execution: persistent storage, log emission, and the executing
/// contract's address.
///
/// Implementations must be deterministic relative to the sequence of calls
/// made against them; given that, two executions over equivalent hosts
/// produce byte-identical traces. The reference [`InMemoryHost`] is not
/// internally synchronized: callers sharing one across threads must serialize
/// access externally.
pub trait Host {
    /// Load the value stored at `(address, key)`. Unset slots read as zero.
    fn sload(&self, address: Address, key: U256) -> U256;

    /// Store `value` at `(address, key)`. Storing zero deletes the slot.
    fn sstore(&mut self, address: Address, key: U256, value: U256);

    /// Append a log record.
    fn log(&mut self, entry: LogEntry);

    /// All log records appended so far, in emission order.
    fn logs(&self) -> &[LogEntry];

    /// The address of the executing contract.
    fn address(&self) -> Address;
}

/// Reference [`Host`] implementation over in-memory maps.
///
/// Storage is sparse: only non-zero slots are materialized, and writing zero
/// removes the slot again. The host may outlive any number of interpreter
/// instances and accumulates their effects.
#[derive(Clone, Debug, Default)]
pub struct InMemoryHost {
    address: Address,
    storage: HashMap<Address, HashMap<U256, U256>>,
    logs: Vec<LogEntry>,
}

impl InMemoryHost {
    /// Creates a new [`InMemoryHost`] executing as the given address.
    pub fn new(address: Address) -> InMemoryHost {
        InMemoryHost { address, storage: HashMap::new(), logs: Vec::new() }
    }

    /// Direct storage accessor, mainly for tests and tooling.
    pub fn storage_at(&self, address: Address, key: U256) -> U256 {
        self.storage
            .get(&address)
            .and_then(|slots| slots.get(&key))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Number of materialized (non-zero) slots under the given address.
    pub fn slot_count(&self, address: Address) -> usize {
        self.storage.get(&address).map(|slots| slots.len()).unwrap_or(0)
    }
}

impl Host for InMemoryHost {
    fn sload(&self, address: Address, key: U256) -> U256 {
        self.storage_at(address, key)
    }

    fn sstore(&mut self, address: Address, key: U256, value: U256) {
        trace!(%address, %key, %value, "sstore");

        if value.is_zero() {
            if let Some(slots) = self.storage.get_mut(&address) {
                slots.remove(&key);
                if slots.is_empty() {
                    self.storage.remove(&address);
                }
            }
        } else {
            self.storage.entry(address).or_default().insert(key, value);
        }
    }

    fn log(&mut self, entry: LogEntry) {
        trace!(address = %entry.address, topics = entry.topics.len(), "log");

        self.logs.push(entry);
    }

    fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    fn address(&self) -> Address {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address() -> Address {
        Address::repeat_byte(0x42)
    }

    #[test]
    fn test_unset_slot_reads_zero() {
        let host = InMemoryHost::new(test_address());
        assert_eq!(host.sload(test_address(), U256::from(7u8)), U256::ZERO);
    }

    #[test]
    fn test_store_load_roundtrip() {
        let mut host = InMemoryHost::new(test_address());
        host.sstore(test_address(), U256::from(1u8), U256::from(0x2au8));
        assert_eq!(host.sload(test_address(), U256::from(1u8)), U256::from(0x2au8));
    }

    #[test]
    fn test_storing_zero_deletes_the_slot() {
        let mut host = InMemoryHost::new(test_address());
        host.sstore(test_address(), U256::from(1u8), U256::from(0x2au8));
        assert_eq!(host.slot_count(test_address()), 1);

        host.sstore(test_address(), U256::from(1u8), U256::ZERO);
        assert_eq!(host.sload(test_address(), U256::from(1u8)), U256::ZERO);
        assert_eq!(host.slot_count(test_address()), 0);
    }

    #[test]
    fn test_storage_is_per_address() {
        let mut host = InMemoryHost::new(test_address());
        let other = Address::repeat_byte(0x99);
        host.sstore(test_address(), U256::from(1u8), U256::from(10u8));
        host.sstore(other, U256::from(1u8), U256::from(20u8));
        assert_eq!(host.sload(test_address(), U256::from(1u8)), U256::from(10u8));
        assert_eq!(host.sload(other, U256::from(1u8)), U256::from(20u8));
    }

    #[test]
    fn test_logs_accumulate_in_order() {
        let mut host = InMemoryHost::new(test_address());
        host.log(LogEntry::new(test_address(), vec![U256::from(1u8)], &[0x01]));
        host.log(LogEntry::new(test_address(), vec![], &[0x02]));
        assert_eq!(host.logs().len(), 2);
        assert_eq!(host.logs()[0].topics, vec![U256::from(1u8)]);
        assert_eq!(host.logs()[1].data, vec![0x02]);
    }
}
