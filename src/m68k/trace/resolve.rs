use tracing::trace;

use crate::m68k::{
    register::{split_size_suffix, Register, Size},
    trace::{
        error::DecodeError,
        literal::{has_literal_prefix, parse_literal},
        snapshot::RegisterSnapshot,
        DecodeOptions,
    },
};

/// A register operand token looked up in a snapshot, with its size mask applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRegister {
    pub register: Register,
    pub size: Option<Size>,
    pub value: u32,
}

/// Outcome of resolving a token that may hold either a register or a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Register(ResolvedRegister),
    Literal(i32),
}

impl Resolved {
    pub fn value(&self) -> i64 {
        match self {
            Resolved::Register(register) => register.value as i64,
            Resolved::Literal(value) => *value as i64,
        }
    }
}

/// Resolves `REG` or `REG.s` against the snapshot. Returns `None` when the token is not a
/// register name or the register is missing from the snapshot.
pub fn resolve_register(token: &str, snapshot: &RegisterSnapshot) -> Option<ResolvedRegister> {
    let (name, suffix) = split_size_suffix(token);
    let register = name.parse::<Register>().ok()?;
    let raw_value = snapshot.get(register)?;

    let size = suffix.and_then(Size::from_suffix);
    let mask = size.unwrap_or(Size::Long).mask();

    Some(ResolvedRegister {
        register,
        size,
        value: raw_value & mask,
    })
}

pub fn decode_literal(token: &str, options: DecodeOptions) -> Result<i32, DecodeError> {
    if options.strict && !has_literal_prefix(token) {
        return Err(DecodeError::UnrecognizedOperand(token.to_owned()));
    }

    parse_literal(token).map_err(|source| DecodeError::InvalidLiteral {
        token: token.to_owned(),
        source,
    })
}

/// Tries the token as a register first and falls back to a literal.
pub fn resolve_register_or_literal(
    token: &str,
    snapshot: &RegisterSnapshot,
    options: DecodeOptions,
) -> Result<Resolved, DecodeError> {
    match resolve_register(token, snapshot) {
        Some(register) => Ok(Resolved::Register(register)),
        None => {
            trace!(token, "not a known register, reading as literal");
            decode_literal(token, options).map(Resolved::Literal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> RegisterSnapshot {
        [(Register::D7, 0x1234_5678)].into_iter().collect()
    }

    #[test]
    fn mask_by_suffix() {
        let snapshot = snapshot();

        assert_eq!(
            resolve_register("D7.w", &snapshot).map(|r| r.value),
            Some(0x5678)
        );
        assert_eq!(
            resolve_register("D7.b", &snapshot).map(|r| r.value),
            Some(0x78)
        );
        assert_eq!(
            resolve_register("D7", &snapshot).map(|r| r.value),
            Some(0x1234_5678)
        );
        assert_eq!(
            resolve_register("D7.x", &snapshot),
            Some(ResolvedRegister {
                register: Register::D7,
                size: None,
                value: 0x1234_5678,
            })
        );
    }

    #[test]
    fn absent_register_is_unresolved() {
        let snapshot = snapshot();

        assert_eq!(resolve_register("D6", &snapshot), None);
        assert_eq!(resolve_register("$10", &snapshot), None);
    }

    #[test]
    fn fall_back_to_literal() {
        let snapshot = snapshot();

        assert_eq!(
            resolve_register_or_literal("-$8", &snapshot, DecodeOptions::default()).unwrap(),
            Resolved::Literal(-8)
        );
        assert_eq!(
            resolve_register_or_literal("D7.w", &snapshot, DecodeOptions::default())
                .unwrap()
                .value(),
            0x5678
        );
        // An absent register that happens to spell hex digits reads as a literal.
        assert_eq!(
            resolve_register_or_literal("D6", &snapshot, DecodeOptions::default()).unwrap(),
            Resolved::Literal(0xd6)
        );
        assert!(matches!(
            resolve_register_or_literal("D7.q", &RegisterSnapshot::new(), DecodeOptions::default()),
            Err(DecodeError::InvalidLiteral { .. })
        ));
        assert!(matches!(
            resolve_register_or_literal("A5", &snapshot, DecodeOptions::strict()),
            Err(DecodeError::UnrecognizedOperand(_))
        ));
    }
}
