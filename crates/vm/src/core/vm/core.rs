use alloy::primitives::U256;
use hashbrown::HashSet;
use tracing::trace;

use crate::core::{
    analysis::valid_jump_destinations,
    host::Host,
    opcodes,
    stack::{Stack, StackError},
    state::{ExecError, HaltReason, MachineState},
    trace::{Trace, TraceKind},
};

use super::handlers;

/// The [`Interpreter`] struct drives a single observable execution of EVM
/// bytecode.
///
/// It owns the per-execution [`MachineState`] and [`Trace`] and borrows a
/// [`Host`] for storage, logs, and the executing address, so hosts may
/// outlive any number of executions. Execution never raises errors to the
/// caller: the outcome is inspected through [`Interpreter::halt_reason`] and
/// the machine state.
pub struct Interpreter<'h> {
    /// The compiled bytecode being executed.
    pub(crate) bytecode: Vec<u8>,

    /// The input data provided to the execution.
    pub(crate) calldata: Vec<u8>,

    /// The machine state owned by this execution.
    pub(crate) state: MachineState,

    /// The ordered event log mirroring every state mutation.
    pub(crate) trace: Trace,

    /// Valid JUMP/JUMPI targets, fixed at construction.
    pub(crate) jumpdests: HashSet<usize>,

    /// External capability for storage, logs, and the executing address.
    pub(crate) host: &'h mut dyn Host,
}

impl<'h> Interpreter<'h> {
    /// Creates a new [`Interpreter`] over the given bytecode, calldata, gas
    /// budget, and host. Jump destinations are pre-analyzed here and fixed
    /// for the lifetime of the instance.
    ///
    /// ```
    /// use alloy::primitives::Address;
    /// use vitrine_vm::core::{host::InMemoryHost, vm::Interpreter};
    ///
    /// let mut host = InMemoryHost::new(Address::ZERO);
    /// let mut interpreter = Interpreter::new(&[0x00], &[], 1_000_000, &mut host);
    /// interpreter.run();
    /// assert!(interpreter.is_halted());
    /// ```
    pub fn new(
        bytecode: &[u8],
        calldata: &[u8],
        initial_gas: u128,
        host: &'h mut dyn Host,
    ) -> Interpreter<'h> {
        Interpreter {
            bytecode: bytecode.to_vec(),
            calldata: calldata.to_vec(),
            state: MachineState::new(initial_gas),
            trace: Trace::new(),
            jumpdests: valid_jump_destinations(bytecode),
            host,
        }
    }

    /// The machine state of this execution.
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// The stack of this execution.
    pub fn stack(&self) -> &Stack {
        &self.state.stack
    }

    /// The trace recorded so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consumes the interpreter, yielding its trace.
    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Whether the execution has reached a terminal state.
    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    /// The halt reason, present iff the execution has halted.
    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.state.halt_reason
    }

    /// The bytecode being executed.
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// The calldata supplied at construction.
    pub fn calldata(&self) -> &[u8] {
        &self.calldata
    }

    /// Record an event against the current program counter and gas reading.
    pub(crate) fn record(&mut self, kind: TraceKind) {
        self.trace.record(self.state.pc as u64, self.state.gas_remaining, kind);
    }

    /// Charge gas and mirror the deduction into the trace. Zero-amount
    /// charges are applied silently; a failed charge halts with OutOfGas
    /// before any event is recorded.
    pub(crate) fn charge_gas(&mut self, amount: u128, reason: &str) -> Result<(), ExecError> {
        self.state.charge_gas(amount)?;
        if amount > 0 {
            self.record(TraceKind::GasCharge { amount, reason: reason.to_string() });
        }
        Ok(())
    }

    /// Charge the quadratic expansion cost for touching `offset + size`
    /// bytes of memory, then grow the memory. Memory is untouched if the
    /// charge fails.
    pub(crate) fn charge_expansion(&mut self, offset: u64, size: u64) -> Result<(), ExecError> {
        let cost = self.state.memory.expansion_cost(offset, size);
        self.charge_gas(cost, "memory.expansion")?;
        self.state.memory.extend(offset, size);
        Ok(())
    }

    /// Push a value onto the stack, mirroring it into the trace.
    pub(crate) fn push(&mut self, value: U256) -> Result<(), ExecError> {
        self.state.stack.push(value)?;
        self.record(TraceKind::StackPush { value });
        Ok(())
    }

    /// Pop a value off the stack, mirroring it into the trace.
    pub(crate) fn pop(&mut self) -> Result<U256, ExecError> {
        let value = self.state.stack.pop()?;
        self.record(TraceKind::StackPop { value });
        Ok(value)
    }

    /// Executes the next instruction. Returns `true` if the machine can make
    /// further progress, `false` once halted; calling `step` on a halted
    /// machine is a no-op.
    pub fn step(&mut self) -> bool {
        if self.state.halted {
            return false;
        }

        // running off the end of the bytecode is the implicit terminator
        if self.state.pc >= self.bytecode.len() {
            self.state.halt(HaltReason::Stop);
            self.record_halt();
            return false;
        }

        let opcode = self.bytecode[self.state.pc];
        trace!(
            pc = self.state.pc,
            opcode = %opcodes::mnemonic(opcode),
            gas = self.state.gas_remaining,
            "executing opcode"
        );
        self.record(TraceKind::OpcodeStart {
            opcode,
            opcode_name: opcodes::mnemonic(opcode),
        });

        match self.execute(opcode) {
            Ok(()) => {}
            // charge_gas already marked the state
            Err(ExecError::OutOfGas) => {}
            Err(ExecError::Stack(StackError::Underflow)) => {
                self.state.halt(HaltReason::StackUnderflow)
            }
            Err(ExecError::Stack(StackError::Overflow)) => {
                self.state.halt(HaltReason::StackOverflow)
            }
        }

        if self.state.halted {
            self.record_halt();
            return false;
        }

        true
    }

    /// Executes the bytecode until the machine halts.
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Charge the baseline gas for the opcode and dispatch to its handler.
    fn execute(&mut self, opcode: u8) -> Result<(), ExecError> {
        let Some(info) = opcodes::info(opcode) else {
            self.state.halt(HaltReason::InvalidOpcode);
            return Ok(());
        };

        self.charge_gas(info.min_gas() as u128, info.name())?;

        match opcode {
            opcodes::STOP => handlers::control::stop(self),

            opcodes::ADD => handlers::arithmetic::add(self)?,
            opcodes::MUL => handlers::arithmetic::mul(self)?,
            opcodes::SUB => handlers::arithmetic::sub(self)?,
            opcodes::DIV => handlers::arithmetic::div(self)?,
            opcodes::MOD => handlers::arithmetic::modulo(self)?,
            opcodes::ADDMOD => handlers::arithmetic::addmod(self)?,
            opcodes::MULMOD => handlers::arithmetic::mulmod(self)?,
            opcodes::EXP => handlers::arithmetic::exp(self)?,

            opcodes::LT => handlers::comparison::lt(self)?,
            opcodes::GT => handlers::comparison::gt(self)?,
            opcodes::EQ => handlers::comparison::eq(self)?,
            opcodes::ISZERO => handlers::comparison::iszero(self)?,

            opcodes::AND => handlers::bitwise::and(self)?,
            opcodes::OR => handlers::bitwise::or(self)?,
            opcodes::XOR => handlers::bitwise::xor(self)?,
            opcodes::NOT => handlers::bitwise::not(self)?,
            opcodes::BYTE => handlers::bitwise::byte(self)?,
            opcodes::SHL => handlers::bitwise::shl(self)?,
            opcodes::SHR => handlers::bitwise::shr(self)?,

            opcodes::CALLDATALOAD => handlers::environment::calldataload(self)?,
            opcodes::CALLDATASIZE => handlers::environment::calldatasize(self)?,
            opcodes::CALLDATACOPY => handlers::environment::calldatacopy(self)?,

            opcodes::POP => handlers::stack::pop(self)?,
            opcodes::MLOAD => handlers::memory::mload(self)?,
            opcodes::MSTORE => handlers::memory::mstore(self)?,
            opcodes::MSTORE8 => handlers::memory::mstore8(self)?,
            opcodes::SLOAD => handlers::storage::sload(self)?,
            opcodes::SSTORE => handlers::storage::sstore(self)?,
            opcodes::JUMP => handlers::control::jump(self)?,
            opcodes::JUMPI => handlers::control::jumpi(self)?,
            opcodes::PC => handlers::control::pc(self)?,
            opcodes::MSIZE => handlers::memory::msize(self)?,
            opcodes::GAS => handlers::control::gas(self)?,
            opcodes::JUMPDEST => handlers::control::jumpdest(self),

            op @ opcodes::PUSH1..=opcodes::PUSH32 => handlers::stack::push_n(self, op)?,
            op @ opcodes::DUP1..=opcodes::DUP16 => {
                handlers::stack::dup_n(self, (op - opcodes::DUP1 + 1) as usize)?
            }
            op @ opcodes::SWAP1..=opcodes::SWAP16 => {
                handlers::stack::swap_n(self, (op - opcodes::SWAP1 + 1) as usize)?
            }

            op @ opcodes::LOG0..=opcodes::LOG4 => {
                handlers::logging::log_n(self, op - opcodes::LOG0)?
            }

            opcodes::RETURN => handlers::system::ret(self)?,
            opcodes::REVERT => handlers::system::revert(self)?,

            // a table entry without a dispatch arm cannot occur
            _ => self.state.halt(HaltReason::InvalidOpcode),
        }

        Ok(())
    }

    fn record_halt(&mut self) {
        if let Some(reason) = self.state.halt_reason {
            trace!(reason = ?reason, gas = self.state.gas_remaining, "halting");
            self.record(TraceKind::Halt { reason });
        }
    }
}
