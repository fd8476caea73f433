use crate::m68k::trace::{
    error::DecodeError,
    line::{split_comment, split_divider},
    operand::Param,
    snapshot::RegisterSnapshot,
    DecodeOptions,
};

/// Infers the value written to the destination register by reading it back from the next line's
/// register dump. Returns `None` when the last operand is not a destination register, or when the
/// next dump does not hold a readable value for that register. Only strict mode fails on a
/// malformed next dump.
///
/// `next_line` must already have its whitespace collapsed.
pub fn infer_result(
    params: &[Param],
    next_line: &str,
    options: DecodeOptions,
) -> Result<Option<u32>, DecodeError> {
    let register = match params.last().and_then(Param::destination_register) {
        Some(register) => register,
        None => return Ok(None),
    };

    let (body, _) = split_comment(next_line);
    let next_registers = split_divider(body).map_or(body, |(registers, _)| registers);
    if options.strict {
        let next_snapshot = RegisterSnapshot::parse(next_registers, options)?;
        return Ok(next_snapshot.get(register));
    }

    Ok(RegisterSnapshot::lookup(next_registers, register))
}
