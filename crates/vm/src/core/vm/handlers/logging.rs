use crate::core::{host::LogEntry, state::ExecError, trace::TraceKind};

use super::super::core::Interpreter;

/// LOG0-LOG4 - Append a log record with N topics
pub fn log_n(interp: &mut Interpreter<'_>, topic_count: u8) -> Result<(), ExecError> {
    let offset = interp.pop()?;
    let size = interp.pop()?;
    let mut topics = Vec::with_capacity(topic_count as usize);
    for _ in 0..topic_count {
        topics.push(interp.pop()?);
    }

    let offset: u64 = offset.try_into().unwrap_or(u64::MAX);
    let size: u64 = size.try_into().unwrap_or(u64::MAX);

    // per-byte data cost, then expansion for the read region
    interp.charge_gas(8 * size as u128, "log.data")?;
    interp.charge_expansion(offset, size)?;

    interp.record(TraceKind::MemoryRead { offset, length: size });
    let data = interp.state.memory.read(offset as usize, size as usize);

    let address = interp.host.address();
    interp.record(TraceKind::Log { address, topics: topics.clone(), data: data.clone() });
    interp.host.log(LogEntry::new(address, topics, &data));
    interp.state.pc += 1;
    Ok(())
}
