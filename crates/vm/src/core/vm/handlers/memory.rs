use alloy::primitives::U256;

use crate::core::{state::ExecError, trace::TraceKind};

use super::super::core::Interpreter;

/// MLOAD - Load a 32-byte big-endian word from memory
pub fn mload(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let offset = interp.pop()?;
    let offset: u64 = offset.try_into().unwrap_or(u64::MAX);

    interp.charge_expansion(offset, 32)?;
    interp.record(TraceKind::MemoryRead { offset, length: 32 });

    let value = U256::from_be_slice(&interp.state.memory.read(offset as usize, 32));
    interp.push(value)?;
    interp.state.pc += 1;
    Ok(())
}

/// MSTORE - Write a 32-byte big-endian word to memory
pub fn mstore(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let offset = interp.pop()?;
    let value = interp.pop()?;
    let offset: u64 = offset.try_into().unwrap_or(u64::MAX);

    interp.charge_expansion(offset, 32)?;

    let data = value.to_be_bytes_vec();
    interp.record(TraceKind::MemoryWrite { offset, data: data.clone() });
    interp.state.memory.store(offset as usize, &data);
    interp.state.pc += 1;
    Ok(())
}

/// MSTORE8 - Write the least-significant byte of a word to memory
pub fn mstore8(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let offset = interp.pop()?;
    let value = interp.pop()?;
    let offset: u64 = offset.try_into().unwrap_or(u64::MAX);

    interp.charge_expansion(offset, 1)?;

    let data = vec![value.to_be_bytes_vec()[31]];
    interp.record(TraceKind::MemoryWrite { offset, data: data.clone() });
    interp.state.memory.store(offset as usize, &data);
    interp.state.pc += 1;
    Ok(())
}

/// MSIZE - Push the current memory size in bytes
pub fn msize(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let size = U256::from(interp.state.memory.size());
    interp.push(size)?;
    interp.state.pc += 1;
    Ok(())
}
