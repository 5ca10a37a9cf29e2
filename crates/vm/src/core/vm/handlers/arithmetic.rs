use alloy::primitives::U256;

use crate::core::state::ExecError;

use super::super::core::Interpreter;

/// ADD - Addition operation
pub fn add(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let b = interp.pop()?;
    let a = interp.pop()?;
    interp.push(a.overflowing_add(b).0)?;
    interp.state.pc += 1;
    Ok(())
}

/// MUL - Multiplication operation
pub fn mul(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let b = interp.pop()?;
    let a = interp.pop()?;
    interp.push(a.overflowing_mul(b).0)?;
    interp.state.pc += 1;
    Ok(())
}

/// SUB - Subtraction operation
pub fn sub(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let b = interp.pop()?;
    let a = interp.pop()?;
    interp.push(a.overflowing_sub(b).0)?;
    interp.state.pc += 1;
    Ok(())
}

/// DIV - Integer division; division by zero yields zero
pub fn div(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let denominator = interp.pop()?;
    let numerator = interp.pop()?;
    let result =
        if denominator.is_zero() { U256::ZERO } else { numerator / denominator };
    interp.push(result)?;
    interp.state.pc += 1;
    Ok(())
}

/// MOD - Modulo remainder; modulus of zero yields zero
pub fn modulo(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let modulus = interp.pop()?;
    let a = interp.pop()?;
    let result = if modulus.is_zero() { U256::ZERO } else { a % modulus };
    interp.push(result)?;
    interp.state.pc += 1;
    Ok(())
}

/// ADDMOD - Addition modulo N, intermediate at full precision
pub fn addmod(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let modulus = interp.pop()?;
    let b = interp.pop()?;
    let a = interp.pop()?;
    let result = if modulus.is_zero() { U256::ZERO } else { a.add_mod(b, modulus) };
    interp.push(result)?;
    interp.state.pc += 1;
    Ok(())
}

/// MULMOD - Multiplication modulo N, intermediate at full precision
pub fn mulmod(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let modulus = interp.pop()?;
    let b = interp.pop()?;
    let a = interp.pop()?;
    let result = if modulus.is_zero() { U256::ZERO } else { a.mul_mod(b, modulus) };
    interp.push(result)?;
    interp.state.pc += 1;
    Ok(())
}

/// EXP - Exponentiation modulo 2^256
pub fn exp(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let exponent = interp.pop()?;
    let base = interp.pop()?;

    // dynamic cost scales with the exponent's byte width
    let exponent_byte_size = exponent.bit_len() / 8;
    interp.charge_gas(50 * exponent_byte_size as u128, "exp.bytes")?;

    interp.push(base.overflowing_pow(exponent).0)?;
    interp.state.pc += 1;
    Ok(())
}
