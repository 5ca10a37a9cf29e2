use crate::core::{state::ExecError, trace::TraceKind};

use super::super::core::Interpreter;

/// SLOAD - Load a word from persistent storage
///
/// The storage read is recorded before the resulting push.
pub fn sload(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let key = interp.pop()?;

    let address = interp.host.address();
    let value = interp.host.sload(address, key);
    interp.record(TraceKind::StorageRead { address, key, value });

    interp.push(value)?;
    interp.state.pc += 1;
    Ok(())
}

/// SSTORE - Write a word to persistent storage
///
/// Zero to non-zero transitions pay the set cost, everything else the reset
/// cost. The storage write is recorded before the host mutation is committed.
pub fn sstore(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let key = interp.pop()?;
    let value = interp.pop()?;
    let address = interp.host.address();

    let current = interp.host.sload(address, key);
    let gas_cost = if current.is_zero() && !value.is_zero() { 20_000 } else { 5_000 };
    interp.charge_gas(gas_cost, "SSTORE")?;

    interp.record(TraceKind::StorageWrite { address, key, value });
    interp.host.sstore(address, key, value);
    interp.state.pc += 1;
    Ok(())
}
