/// Jump-destination pre-analysis.
pub mod analysis;

/// Host capability and the in-memory reference host.
pub mod host;

/// Memory implementation for VM memory management.
pub mod memory;

/// Opcode definitions and metadata.
pub mod opcodes;

/// Stack implementation for the VM.
pub mod stack;

/// Machine state: program counter, gas accounting, halt bookkeeping.
pub mod state;

/// Trace events and the append-only collector.
pub mod trace;

/// Core interpreter implementation.
pub mod vm;
