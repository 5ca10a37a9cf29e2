use crate::core::{
    state::{ExecError, HaltReason},
    trace::TraceKind,
};

use super::super::core::Interpreter;

/// RETURN - Halt, returning a region of memory
pub fn ret(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    halt_with_output(interp, HaltReason::Return)
}

/// REVERT - Halt reverting, returning a region of memory
pub fn revert(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    halt_with_output(interp, HaltReason::Revert)
}

fn halt_with_output(interp: &mut Interpreter<'_>, reason: HaltReason) -> Result<(), ExecError> {
    let offset = interp.pop()?;
    let size = interp.pop()?;
    let offset: u64 = offset.try_into().unwrap_or(u64::MAX);
    let size: u64 = size.try_into().unwrap_or(u64::MAX);

    interp.charge_expansion(offset, size)?;
    interp.record(TraceKind::MemoryRead { offset, length: size });

    interp.state.returndata = interp.state.memory.read(offset as usize, size as usize);
    interp.state.halt(reason);
    Ok(())
}
