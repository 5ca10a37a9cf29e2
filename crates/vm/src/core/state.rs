use serde::{Deserialize, Serialize};

use super::{
    memory::Memory,
    stack::{Stack, StackError},
};

/// Reason an execution reached its terminal state. Exactly one reason
/// accompanies any halt; the serialized form is the uppercase identifier used
/// in trace JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HaltReason {
    Stop,
    Return,
    Revert,
    OutOfGas,
    InvalidOpcode,
    StackUnderflow,
    StackOverflow,
    InvalidJump,
    InvalidInstruction,
}

/// Error signalled by an opcode handler to abort the current instruction.
///
/// These drive intra-execution control flow only: the interpreter catches
/// every variant and converts it into a halt, so `run()` is infallible.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("out of gas")]
    OutOfGas,
    #[error(transparent)]
    Stack(#[from] StackError),
}

/// The [`MachineState`] struct holds all per-execution mutable machine state:
/// program counter, gas budget, stack, memory, return data, and halt
/// bookkeeping. It is created fresh per interpreter instance and considered
/// terminal once `halted` is set.
#[derive(Clone, Debug)]
pub struct MachineState {
    /// The current instruction pointer (program counter).
    pub pc: usize,

    /// The amount of gas remaining for execution.
    pub gas_remaining: u128,

    /// The EVM stack that holds values during execution.
    pub stack: Stack,

    /// The EVM memory space that can be read from and written to.
    pub memory: Memory,

    /// The data returned by the execution. Written only by a successful
    /// RETURN or REVERT; empty otherwise.
    pub returndata: Vec<u8>,

    /// Whether the execution has reached a terminal state.
    pub halted: bool,

    /// The reason for the halt. Present iff `halted` is set.
    pub halt_reason: Option<HaltReason>,
}

impl MachineState {
    /// Creates a new [`MachineState`] with the given gas budget.
    pub fn new(initial_gas: u128) -> MachineState {
        MachineState {
            pc: 0,
            gas_remaining: initial_gas,
            stack: Stack::new(),
            memory: Memory::new(),
            returndata: Vec::new(),
            halted: false,
            halt_reason: None,
        }
    }

    /// Consume gas units. Charging is atomic: if the requested amount exceeds
    /// the remaining budget, the state halts with
    /// [`HaltReason::OutOfGas`], the deduction is not applied, and the
    /// current handler is aborted through the returned error.
    ///
    /// ```
    /// use vitrine_vm::core::state::{HaltReason, MachineState};
    ///
    /// let mut state = MachineState::new(10);
    /// state.charge_gas(4).expect("charge failed");
    /// assert_eq!(state.gas_remaining, 6);
    ///
    /// assert!(state.charge_gas(7).is_err());
    /// assert_eq!(state.gas_remaining, 6);
    /// assert_eq!(state.halt_reason, Some(HaltReason::OutOfGas));
    /// ```
    pub fn charge_gas(&mut self, amount: u128) -> Result<(), ExecError> {
        if amount > self.gas_remaining {
            self.halt(HaltReason::OutOfGas);
            return Err(ExecError::OutOfGas);
        }

        self.gas_remaining -= amount;
        Ok(())
    }

    /// Transition to the terminal state with the given reason. The first
    /// halt wins; later calls are ignored.
    pub fn halt(&mut self, reason: HaltReason) {
        if !self.halted {
            self.halted = true;
            self.halt_reason = Some(reason);
        }
    }
}
