use alloy::primitives::U256;

use crate::core::{opcodes, state::ExecError, trace::TraceKind};

use super::super::core::Interpreter;

/// POP - Remove the top stack item
pub fn pop(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    interp.pop()?;
    interp.state.pc += 1;
    Ok(())
}

/// PUSH1-PUSH32 - Place an immediate value on the stack
///
/// The immediate is read big-endian from the bytes following the opcode; if
/// the bytecode ends early the value zero-extends on the low bytes.
pub fn push_n(interp: &mut Interpreter<'_>, opcode: u8) -> Result<(), ExecError> {
    let width = opcodes::push_bytes(opcode);
    let value = read_immediate(&interp.bytecode, interp.state.pc + 1, width);
    interp.push(value)?;
    interp.state.pc += 1 + width;
    Ok(())
}

/// DUP1-DUP16 - Duplicate the nth stack item to the top
pub fn dup_n(interp: &mut Interpreter<'_>, n: usize) -> Result<(), ExecError> {
    interp.state.stack.dup(n)?;
    let value = interp.state.stack.peek(0);
    interp.record(TraceKind::StackPush { value });
    interp.state.pc += 1;
    Ok(())
}

/// SWAP1-SWAP16 - Exchange the top stack item with the nth below it
pub fn swap_n(interp: &mut Interpreter<'_>, n: usize) -> Result<(), ExecError> {
    interp.state.stack.swap(n)?;
    interp.state.pc += 1;
    Ok(())
}

fn read_immediate(bytecode: &[u8], start: usize, width: usize) -> U256 {
    let start = start.min(bytecode.len());
    let end = (start + width).min(bytecode.len());
    let immediate = &bytecode[start..end];

    let mut value = U256::from_be_slice(immediate);
    let missing = width - immediate.len();
    if missing > 0 {
        value = value << (missing * 8);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_immediate_full_width() {
        assert_eq!(read_immediate(&[0x60, 0xab], 1, 1), U256::from(0xabu8));
    }

    #[test]
    fn test_read_immediate_truncated_zero_extends_low_bytes() {
        // PUSH2 with a single immediate byte present
        assert_eq!(read_immediate(&[0x61, 0xab], 1, 2), U256::from(0xab00u16));
    }

    #[test]
    fn test_read_immediate_entirely_missing() {
        assert_eq!(read_immediate(&[0x60], 1, 1), U256::ZERO);
    }
}
