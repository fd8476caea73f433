pub mod assembler;

pub mod error;

pub mod inference;

pub mod line;

pub mod literal;

pub mod opcode;

pub mod operand;

pub mod resolve;

pub mod snapshot;

/// Knobs for trace decoding. The default is lenient: anything that does not look like a register
/// or an indirect operand is read as a literal.
///
/// Neither mode decodes `-(An)` or `(An)+`. Those shapes are read as literals and fail with
/// `DecodeError::InvalidLiteral`, so a trace using them is rejected rather than given a wrong
/// value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Rejects unknown size suffixes, unknown registers in a dump, and literal operands without a
    /// `$` prefix. Also fails on a malformed register dump in the line after a destination
    /// register, which lenient mode treats as an absent result.
    pub strict: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}
