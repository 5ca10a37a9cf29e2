use alloy::primitives::U256;

use crate::core::{
    state::{ExecError, HaltReason},
    trace::TraceKind,
};

use super::super::core::Interpreter;

/// STOP - Halt execution normally
pub fn stop(interp: &mut Interpreter<'_>) {
    interp.state.halt(HaltReason::Stop);
}

/// JUMP - Unconditionally alter the program counter
///
/// The jump event is recorded before the target is validated, so invalid
/// jumps leave both the attempted jump and the halt in the trace.
pub fn jump(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let dest = interp.pop()?;
    let from = interp.state.pc as u64;
    let to: u64 = dest.try_into().unwrap_or(u64::MAX);

    interp.record(TraceKind::Jump { from, to, conditional: false, taken: true });
    take_jump(interp, to);
    Ok(())
}

/// JUMPI - Conditionally alter the program counter
pub fn jumpi(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let condition = interp.pop()?;
    let dest = interp.pop()?;
    let from = interp.state.pc as u64;
    let to: u64 = dest.try_into().unwrap_or(u64::MAX);
    let taken = !condition.is_zero();

    interp.record(TraceKind::Jump { from, to, conditional: true, taken });
    if taken {
        take_jump(interp, to);
    } else {
        interp.state.pc += 1;
    }
    Ok(())
}

/// JUMPDEST - Valid jump target marker; no operand effect
pub fn jumpdest(interp: &mut Interpreter<'_>) {
    interp.state.pc += 1;
}

/// PC - Push the program counter of this instruction, prior to its advance
pub fn pc(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let value = U256::from(interp.state.pc);
    interp.push(value)?;
    interp.state.pc += 1;
    Ok(())
}

/// GAS - Push the gas remaining after this instruction's own charge
pub fn gas(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let value = U256::from(interp.state.gas_remaining);
    interp.push(value)?;
    interp.state.pc += 1;
    Ok(())
}

fn take_jump(interp: &mut Interpreter<'_>, to: u64) {
    let dest = usize::try_from(to).unwrap_or(usize::MAX);
    if dest >= interp.bytecode.len() || !interp.jumpdests.contains(&dest) {
        interp.state.halt(HaltReason::InvalidJump);
    } else {
        interp.state.pc = dest;
    }
}
