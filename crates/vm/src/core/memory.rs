/// The [`Memory`] struct represents the memory of an EVM instance.
///
/// Memory grows in 32-byte words and never shrinks within a single
/// execution; its logical size is always a multiple of 32.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    /// Vector storing memory data
    pub memory: Vec<u8>,
}

/// Quadratic word cost: `3 * words + words^2 / 512`.
const fn word_cost(words: u128) -> u128 {
    3 * words + words * words / 512
}

impl Memory {
    /// Creates a new [`Memory`] with an empty memory vector
    pub fn new() -> Memory {
        Memory { memory: Vec::with_capacity(2048) }
    }

    /// Gets the current size of the memory in bytes.
    ///
    /// ```
    /// use vitrine_vm::core::memory::Memory;
    ///
    /// let memory = Memory::new();
    /// assert_eq!(memory.size(), 0);
    /// ```
    pub fn size(&self) -> usize {
        self.memory.len()
    }

    /// Extends the memory to cover `offset + size` bytes, rounded up to the
    /// next word boundary. A zero-length access never grows memory,
    /// regardless of offset.
    ///
    /// ```
    /// use vitrine_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.extend(0, 1);
    /// assert_eq!(memory.size(), 32);
    /// ```
    pub fn extend(&mut self, offset: u64, size: u64) {
        if size == 0 {
            return;
        }

        let new_mem_size = (offset as u128 + size as u128).div_ceil(32) * 32;
        if new_mem_size > self.size() as u128 {
            self.memory.resize(new_mem_size as usize, 0u8);
        }
    }

    /// Store the given bytes in the memory at the given offset, extending the
    /// memory if necessary.
    ///
    /// ```
    /// use vitrine_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.store(31, &[0xff]);
    /// assert_eq!(memory.read(0, 32)[31], 0xff);
    /// ```
    pub fn store(&mut self, offset: usize, value: &[u8]) {
        if value.is_empty() {
            return;
        }

        self.extend(offset as u64, value.len() as u64);
        self.memory[offset..offset + value.len()].copy_from_slice(value);
    }

    /// Read the given number of bytes from the memory at the given offset.
    /// If the offset + size is greater than the current size of the memory,
    /// null bytes will be appended to the value.
    ///
    /// ```
    /// use vitrine_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.store(0, &[0xff]);
    /// assert_eq!(memory.read(0, 2), vec![0xff, 0x00]);
    /// ```
    pub fn read(&self, offset: usize, size: usize) -> Vec<u8> {
        if size == 0 {
            return Vec::new();
        }

        if offset.saturating_add(size) > self.size() {
            let mut value = Vec::with_capacity(size);

            if offset <= self.size() {
                value.extend_from_slice(&self.memory[offset..]);
            }

            value.resize(size, 0u8);
            value
        } else {
            self.memory[offset..offset + size].to_vec()
        }
    }

    /// Calculate the cumulative cost of the memory allocated so far.
    ///
    /// ```
    /// use vitrine_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.store(0, &[0xff; 32]);
    /// assert_eq!(memory.memory_cost(), 3);
    /// ```
    pub fn memory_cost(&self) -> u128 {
        word_cost((self.size() as u128).div_ceil(32))
    }

    /// Calculate the cost of extending the memory to cover `offset + size`
    /// bytes. Zero if no growth is required, and always zero for a
    /// zero-length access.
    ///
    /// ```
    /// use vitrine_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.store(0, &[0xff; 32]);
    /// assert_eq!(memory.expansion_cost(0, 32), 0);
    /// assert_eq!(memory.expansion_cost(0, 64), 3);
    /// ```
    pub fn expansion_cost(&self, offset: u64, size: u64) -> u128 {
        if size == 0 {
            return 0;
        }

        let new_words = (offset as u128 + size as u128).div_ceil(32);
        let current_words = (self.size() as u128).div_ceil(32);
        if new_words <= current_words {
            0
        } else {
            word_cost(new_words) - word_cost(current_words)
        }
    }
}

#[cfg(test)]
mod tests {
    use vitrine_common::utils::strings::decode_hex;

    use super::*;

    #[test]
    fn test_store_simple() {
        let mut memory = Memory::new();
        memory.store(
            0,
            &decode_hex("00000000000000000000000000000000000000000000000000000000000000ff")
                .expect("failed to decode hex"),
        );
        assert_eq!(
            memory.memory,
            decode_hex("00000000000000000000000000000000000000000000000000000000000000ff")
                .expect("failed to decode hex"),
        );
    }

    #[test]
    fn test_store_extends_to_word_boundary() {
        let mut memory = Memory::new();
        memory.store(34, &[0xff]);
        assert_eq!(memory.size(), 64);
        assert_eq!(memory.memory[34], 0xff);
    }

    #[test]
    fn test_store_single_byte() {
        let mut memory = Memory::new();
        memory.store(0, &[0xff]);
        assert_eq!(
            memory.memory,
            decode_hex("ff00000000000000000000000000000000000000000000000000000000000000")
                .expect("failed to decode hex"),
        );
    }

    #[test]
    fn test_read_simple() {
        let mut memory = Memory::new();
        memory.store(
            0,
            &decode_hex("11223344556677889900aabbccddeeff11223344556677889900aabbccddeeff")
                .expect("failed to decode hex"),
        );
        assert_eq!(
            memory.read(0, 32),
            decode_hex("11223344556677889900aabbccddeeff11223344556677889900aabbccddeeff")
                .expect("failed to decode hex"),
        );
    }

    #[test]
    fn test_read_pads_past_end() {
        let mut memory = Memory::new();
        memory.store(
            0,
            &decode_hex("11223344556677889900aabbccddeeff11223344556677889900aabbccddeeff")
                .expect("failed to decode hex"),
        );
        assert_eq!(
            memory.read(31, 32),
            decode_hex("ff00000000000000000000000000000000000000000000000000000000000000")
                .expect("failed to decode hex"),
        );
    }

    #[test]
    fn test_read_zero_length_is_empty() {
        let memory = Memory::new();
        assert_eq!(memory.read(1_000_000, 0), Vec::<u8>::new());
    }

    #[test]
    fn test_memory_cost() {
        let mut memory = Memory::new();
        memory.store(0, &[0xff; 32]);
        assert_eq!(memory.memory_cost(), 3);
    }

    #[test]
    fn test_memory_cost_quadratic_term() {
        let mut memory = Memory::new();
        memory.store(32 * 32, &[0xff; 32]);
        assert_eq!(memory.memory_cost(), 101);
    }

    #[test]
    fn test_expansion_cost() {
        let memory = Memory::new();
        assert_eq!(memory.expansion_cost(0, 32), 3);
    }

    #[test]
    fn test_expansion_cost_from_offset() {
        let memory = Memory::new();
        assert_eq!(memory.expansion_cost(32 * 32, 32), 101);
    }

    #[test]
    fn test_expansion_cost_zero_length() {
        let memory = Memory::new();
        assert_eq!(memory.expansion_cost(1_000_000, 0), 0);
    }

    #[test]
    fn test_expansion_never_shrinks() {
        let mut memory = Memory::new();
        memory.extend(0, 64);
        memory.extend(0, 32);
        assert_eq!(memory.size(), 64);
    }
}
