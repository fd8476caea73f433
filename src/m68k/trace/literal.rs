#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("no hex digits")]
    Empty,
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
    #[error("hex value {0} does not fit in 32 bits")]
    Overflow(String),
}

/// Parses an unsigned hex digit sequence with no prefix or sign.
pub fn parse_hex(digits: &str) -> Result<u32, LiteralError> {
    if digits.is_empty() {
        return Err(LiteralError::Empty);
    }

    digits.chars().try_fold(0u32, |acc, c| {
        let digit = c.to_digit(16).ok_or(LiteralError::InvalidDigit(c))?;
        acc.checked_mul(16)
            .and_then(|acc| acc.checked_add(digit))
            .ok_or_else(|| LiteralError::Overflow(digits.to_owned()))
    })
}

/// Parses a signed literal of the form `[-]$HEX`. The magnitude is read as a 32-bit pattern, so
/// `$FFFFFFFF` is -1 and `-$80000000` is `i32::MIN`.
pub fn parse_literal(token: &str) -> Result<i32, LiteralError> {
    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let digits = unsigned.strip_prefix('$').unwrap_or(unsigned);

    let value = parse_hex(digits)? as i32;
    Ok(if negative { value.wrapping_neg() } else { value })
}

pub fn has_literal_prefix(token: &str) -> bool {
    token.starts_with('$') || token.starts_with("-$")
}
