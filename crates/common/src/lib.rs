//! Shared utilities for the vitrine workspace.
//!
//! This crate carries the encoding helpers used by the interpreter core and
//! its tests: hex string decoding/encoding and fixed-width conversions for
//! 256-bit words and 160-bit addresses.

pub mod utils;
