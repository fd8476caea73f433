use crate::m68k::{register::Register, trace::literal::LiteralError};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("missing ` -- ` divider between register dump and instruction")]
    MissingDivider,
    #[error("missing instruction address")]
    MissingAddress,
    #[error("missing opcode")]
    MissingOpcode,
    #[error("invalid address {token:?}: {source}")]
    InvalidAddress { token: String, source: LiteralError },
    #[error("malformed register pair {0:?}")]
    MalformedRegisterPair(String),
    #[error("unknown register {0:?} in register dump")]
    UnknownRegister(String),
    #[error("invalid value for register {register}: {source}")]
    InvalidRegisterValue {
        register: Register,
        source: LiteralError,
    },
    #[error("failed to find a value for {0}")]
    UnresolvedIndirectRegister(String),
    #[error("displacement operand {0:?} does not name a base register")]
    MissingBaseRegister(String),
    #[error("invalid literal {token:?}: {source}")]
    InvalidLiteral { token: String, source: LiteralError },
    #[error("unrecognized operand {0:?}")]
    UnrecognizedOperand(String),
    #[error("unknown size suffix {0:?}")]
    UnknownSize(String),
}

/// A decode failure, tagged with the 1-based number of the line that failed.
#[derive(Debug, thiserror::Error)]
#[error("line {line_number}: {source}")]
pub struct TraceError {
    pub line_number: usize,
    pub source: DecodeError,
}
