//! Vitrine EVM interpreter
//!
//! This crate provides a deterministic, step-wise interpreter for EVM
//! bytecode built around observability: every semantically meaningful action
//! taken during execution is mirrored into an ordered, append-only trace of
//! structured events suitable for offline replay, visualization, and
//! teaching. Throughput is explicitly not a goal; exact semantics (gas,
//! wrap-around, padding, event ordering) are.

/// Core interpreter implementation, including memory, stack, trace, host, and
/// opcode handling.
pub mod core;
