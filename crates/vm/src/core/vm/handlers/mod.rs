//! Opcode handlers organized by category.
//!
//! Each submodule contains handler functions for related opcodes. Every
//! handler follows the same contract: the baseline gas for the mnemonic has
//! already been charged by the dispatcher; the handler pops its inputs,
//! charges any dynamic gas, performs side effects, pushes its results, and
//! advances the program counter, mirroring each of those actions into the
//! trace as it goes.

/// Arithmetic operations: ADD, MUL, SUB, DIV, MOD, ADDMOD, MULMOD, EXP
pub mod arithmetic;

/// Bitwise operations: AND, OR, XOR, NOT, BYTE, SHL, SHR
pub mod bitwise;

/// Comparison operations: LT, GT, EQ, ISZERO
pub mod comparison;

/// Control flow: STOP, JUMP, JUMPI, JUMPDEST, PC, GAS
pub mod control;

/// Calldata operations: CALLDATALOAD, CALLDATASIZE, CALLDATACOPY
pub mod environment;

/// Logging operations: LOG0-LOG4
pub mod logging;

/// Memory operations: MLOAD, MSTORE, MSTORE8, MSIZE
pub mod memory;

/// Stack operations: POP, PUSH1-PUSH32, DUP1-DUP16, SWAP1-SWAP16
pub mod stack;

/// Storage operations: SLOAD, SSTORE
pub mod storage;

/// System operations: RETURN, REVERT
pub mod system;
