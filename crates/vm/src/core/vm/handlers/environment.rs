use alloy::primitives::U256;

use crate::core::{state::ExecError, trace::TraceKind};

use super::super::core::Interpreter;

/// CALLDATALOAD - Load a 32-byte word from calldata; bytes past the end read
/// as zero
pub fn calldataload(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let offset = interp.pop()?;
    let offset: usize = offset.try_into().unwrap_or(usize::MAX);

    let mut word = [0u8; 32];
    if offset < interp.calldata.len() {
        let available = (interp.calldata.len() - offset).min(32);
        word[..available].copy_from_slice(&interp.calldata[offset..offset + available]);
    }

    interp.push(U256::from_be_bytes(word))?;
    interp.state.pc += 1;
    Ok(())
}

/// CALLDATASIZE - Push the byte length of the calldata
pub fn calldatasize(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let size = U256::from(interp.calldata.len());
    interp.push(size)?;
    interp.state.pc += 1;
    Ok(())
}

/// CALLDATACOPY - Copy calldata into memory; bytes past the end copy as zero
pub fn calldatacopy(interp: &mut Interpreter<'_>) -> Result<(), ExecError> {
    let dest_offset = interp.pop()?;
    let offset = interp.pop()?;
    let size = interp.pop()?;

    let dest_offset: u64 = dest_offset.try_into().unwrap_or(u64::MAX);
    let offset: usize = offset.try_into().unwrap_or(usize::MAX);
    let size: u64 = size.try_into().unwrap_or(u64::MAX);

    // per-word copy cost, then expansion for the destination region
    let minimum_word_size = (size as u128).div_ceil(32);
    interp.charge_gas(3 * minimum_word_size, "calldata.copy")?;
    interp.charge_expansion(dest_offset, size)?;

    let value = safe_copy_data(&interp.calldata, offset, size as usize);
    interp.record(TraceKind::MemoryWrite { offset: dest_offset, data: value.clone() });
    interp.state.memory.store(dest_offset as usize, &value);
    interp.state.pc += 1;
    Ok(())
}

fn safe_copy_data(source: &[u8], offset: usize, size: usize) -> Vec<u8> {
    let end_offset = offset.saturating_add(size).min(source.len());
    let mut value = source.get(offset..end_offset).unwrap_or(&[]).to_owned();
    if value.len() < size {
        value.resize(size, 0u8);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_copy_within_bounds() {
        assert_eq!(safe_copy_data(&[1, 2, 3, 4], 1, 2), vec![2, 3]);
    }

    #[test]
    fn test_safe_copy_pads_past_end() {
        assert_eq!(safe_copy_data(&[1, 2], 1, 4), vec![2, 0, 0, 0]);
    }

    #[test]
    fn test_safe_copy_entirely_past_end() {
        assert_eq!(safe_copy_data(&[1, 2], 10, 3), vec![0, 0, 0]);
    }
}
