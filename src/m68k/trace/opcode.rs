use serde::{Deserialize, Serialize};

use crate::m68k::{
    register::{split_size_suffix, Size},
    trace::{error::DecodeError, DecodeOptions},
};

/// Instruction mnemonic with its optional size suffix, e.g. `MOVE.w`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opcode {
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl Opcode {
    /// An unrecognized suffix leaves the size unset, or fails in strict mode.
    pub fn parse(token: &str, options: DecodeOptions) -> Result<Self, DecodeError> {
        let (instruction, suffix) = split_size_suffix(token);

        let size = suffix.and_then(Size::from_suffix);
        if let Some(suffix) = suffix {
            if size.is_none() && options.strict {
                return Err(DecodeError::UnknownSize(suffix.to_owned()));
            }
        }

        Ok(Self {
            instruction: instruction.to_owned(),
            size,
        })
    }

    /// Size that applies to the operand at the given 1-based position. Only the first operand
    /// takes the instruction size.
    pub fn operand_size(&self, position: usize) -> Option<Size> {
        if position == 1 {
            self.size
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_size() {
        let opcode = Opcode::parse("MOVE.W", DecodeOptions::default()).unwrap();

        assert_eq!(opcode.instruction, "MOVE");
        assert_eq!(opcode.size, Some(Size::Word));
        assert_eq!(opcode.operand_size(1), Some(Size::Word));
        assert_eq!(opcode.operand_size(2), None);
    }

    #[test]
    fn parse_without_size() {
        let opcode = Opcode::parse("NOP", DecodeOptions::default()).unwrap();

        assert_eq!(opcode.instruction, "NOP");
        assert_eq!(opcode.size, None);
    }

    #[test]
    fn unknown_suffix() {
        let opcode = Opcode::parse("BRA.s", DecodeOptions::default()).unwrap();
        assert_eq!(opcode.instruction, "BRA");
        assert_eq!(opcode.size, None);

        assert!(matches!(
            Opcode::parse("BRA.s", DecodeOptions::strict()),
            Err(DecodeError::UnknownSize(suffix)) if suffix == "s"
        ));
    }
}
