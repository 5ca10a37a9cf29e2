use alloy::primitives::U256;

use crate::core::state::ExecError;

use super::super::core::Interpreter;

fn push_boolean(interp: &mut Interpreter<'_>, condition: bool) -> Result<(), ExecError> {
    let value = if condition { U256::from(1u8) } else { U256::ZERO };
    interp.push(value)
}

/// LT - Unsigned less-than comparison
pub fn lt(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let b = interp.pop()?;
    let a = interp.pop()?;
    push_boolean(interp, a.lt(&b))?;
    interp.state.pc += 1;
    Ok(())
}

/// GT - Unsigned greater-than comparison
pub fn gt(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let b = interp.pop()?;
    let a = interp.pop()?;
    push_boolean(interp, a.gt(&b))?;
    interp.state.pc += 1;
    Ok(())
}

/// EQ - Equality comparison
pub fn eq(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let b = interp.pop()?;
    let a = interp.pop()?;
    push_boolean(interp, a.eq(&b))?;
    interp.state.pc += 1;
    Ok(())
}

/// ISZERO - Test the top of the stack against zero
pub fn iszero(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let a = interp.pop()?;
    push_boolean(interp, a.is_zero())?;
    interp.state.pc += 1;
    Ok(())
}
