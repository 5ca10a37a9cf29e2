use std::ops::{Shl, Shr};

use alloy::primitives::U256;

use crate::core::state::ExecError;

use super::super::core::Interpreter;

/// AND - Bitwise AND operation
pub fn and(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let b = interp.pop()?;
    let a = interp.pop()?;
    interp.push(a & b)?;
    interp.state.pc += 1;
    Ok(())
}

/// OR - Bitwise OR operation
pub fn or(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let b = interp.pop()?;
    let a = interp.pop()?;
    interp.push(a | b)?;
    interp.state.pc += 1;
    Ok(())
}

/// XOR - Bitwise XOR operation
pub fn xor(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let b = interp.pop()?;
    let a = interp.pop()?;
    interp.push(a ^ b)?;
    interp.state.pc += 1;
    Ok(())
}

/// NOT - Bitwise complement
pub fn not(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let a = interp.pop()?;
    interp.push(!a)?;
    interp.state.pc += 1;
    Ok(())
}

/// BYTE - Extract a single byte from a word; index 0 is the most significant
pub fn byte(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let index = interp.pop()?;
    let word = interp.pop()?;
    let result = if index >= U256::from(32u8) {
        U256::ZERO
    } else {
        word / (U256::from(256u32).pow(U256::from(31u8) - index)) % U256::from(256u32)
    };
    interp.push(result)?;
    interp.state.pc += 1;
    Ok(())
}

/// SHL - Logical shift left; shifts of 256 or more yield zero
pub fn shl(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let shift = interp.pop()?;
    let value = interp.pop()?;
    let result = if shift > U256::from(255u8) { U256::ZERO } else { value.shl(shift) };
    interp.push(result)?;
    interp.state.pc += 1;
    Ok(())
}

/// SHR - Logical shift right; shifts of 256 or more yield zero
pub fn shr(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let shift = interp.pop()?;
    let value = interp.pop()?;
    let result = if shift > U256::from(255u8) { U256::ZERO } else { value.shr(shift) };
    interp.push(result)?;
    interp.state.pc += 1;
    Ok(())
}
