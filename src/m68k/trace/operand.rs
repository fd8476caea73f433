use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use tracing::trace;

use crate::{
    m68k::{
        register::{split_size_suffix, Register, Size},
        trace::{
            error::DecodeError,
            opcode::Opcode,
            resolve::{decode_literal, resolve_register, resolve_register_or_literal},
            snapshot::RegisterSnapshot,
            DecodeOptions,
        },
    },
    serde::hex::Hex32,
};

/// Addressing modes recognized in trace operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// `Dn` / `An`.
    RegisterDirect,
    /// `(An)`.
    AddressRegisterIndirect,
    /// `(An)+`. Not produced by the decoder.
    AddressRegisterIndirectPostincrement,
    /// `-(An)`. Not produced by the decoder.
    AddressRegisterIndirectPredecrement,
    /// `(d,An)` and `(An,Xn.s)`.
    AddressRegisterIndirectDisplacement,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterOperand {
    pub register: Register,
    pub mode: Mode,
    /// Register value for direct mode, effective address for the indirect modes.
    #[serde_as(as = "Hex32")]
    pub value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Set only on a register-direct operand in last position.
    pub destination: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Param {
    Literal { value: i32 },
    Register(RegisterOperand),
}

impl Param {
    /// Decodes one operand token. `position` is 1-based and `total` is the operand count of the
    /// instruction.
    pub fn decode(
        raw: &str,
        position: usize,
        total: usize,
        opcode: &Opcode,
        snapshot: &RegisterSnapshot,
        options: DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let token = raw.strip_suffix(',').unwrap_or(raw);

        if let Ok(register) = token.parse::<Register>() {
            if let Some(value) = snapshot.get(register) {
                return Ok(Param::Register(RegisterOperand {
                    register,
                    mode: Mode::RegisterDirect,
                    value,
                    size: opcode.operand_size(position),
                    destination: position == total,
                }));
            }
        }

        if let Some(inner) = token.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            return match inner.split_once(',') {
                Some((left, right)) => decode_displacement(token, left, right, snapshot, options),
                None => decode_indirect(inner, snapshot),
            };
        }

        trace!(token, "decoding operand as literal");
        decode_literal(token, options).map(|value| Param::Literal { value })
    }

    pub fn as_register(&self) -> Option<&RegisterOperand> {
        match self {
            Param::Register(operand) => Some(operand),
            Param::Literal { .. } => None,
        }
    }

    /// The register written by the instruction, if this operand is a destination.
    pub fn destination_register(&self) -> Option<Register> {
        match self {
            Param::Register(operand) if operand.destination => Some(operand.register),
            Param::Register(_) | Param::Literal { .. } => None,
        }
    }
}

fn decode_displacement(
    token: &str,
    left: &str,
    right: &str,
    snapshot: &RegisterSnapshot,
    options: DecodeOptions,
) -> Result<Param, DecodeError> {
    let (base_name, suffix) = split_size_suffix(right);
    let register = base_name
        .parse::<Register>()
        .map_err(|_| DecodeError::MissingBaseRegister(token.to_owned()))?;

    let left = resolve_register_or_literal(left, snapshot, options)?;
    let right = resolve_register_or_literal(right, snapshot, options)?;

    Ok(Param::Register(RegisterOperand {
        register,
        mode: Mode::AddressRegisterIndirectDisplacement,
        value: (left.value() + right.value()) as u32,
        size: suffix.and_then(Size::from_suffix),
        destination: false,
    }))
}

fn decode_indirect(inner: &str, snapshot: &RegisterSnapshot) -> Result<Param, DecodeError> {
    let resolved = resolve_register(inner, snapshot)
        .ok_or_else(|| DecodeError::UnresolvedIndirectRegister(inner.to_owned()))?;

    Ok(Param::Register(RegisterOperand {
        register: resolved.register,
        mode: Mode::AddressRegisterIndirect,
        value: resolved.value,
        size: resolved.size,
        destination: false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> RegisterSnapshot {
        [
            (Register::D0, 0x0000_0001),
            (Register::D7, 0x0000_ffff),
            (Register::A0, 0x0000_1000),
            (Register::A1, 0x0000_3000),
            (Register::A5, 0x0000_2000),
        ]
        .into_iter()
        .collect()
    }

    fn decode(raw: &str, position: usize, total: usize) -> Result<Param, DecodeError> {
        let opcode = Opcode::parse("MOVE.w", DecodeOptions::default()).unwrap();
        Param::decode(
            raw,
            position,
            total,
            &opcode,
            &snapshot(),
            DecodeOptions::default(),
        )
    }

    #[test]
    fn register_direct_destination() {
        let last = decode("D0", 2, 2).unwrap();
        assert_eq!(
            last,
            Param::Register(RegisterOperand {
                register: Register::D0,
                mode: Mode::RegisterDirect,
                value: 1,
                size: None,
                destination: true,
            })
        );
        assert_eq!(last.destination_register(), Some(Register::D0));

        let first = decode("D0,", 1, 2).unwrap();
        let operand = first.as_register().unwrap();
        assert!(!operand.destination);
        assert_eq!(operand.size, Some(Size::Word));
        assert_eq!(first.destination_register(), None);
    }

    #[test]
    fn address_register_indirect() {
        let param = decode("(A0)", 2, 2).unwrap();
        assert_eq!(
            param,
            Param::Register(RegisterOperand {
                register: Register::A0,
                mode: Mode::AddressRegisterIndirect,
                value: 0x1000,
                size: None,
                destination: false,
            })
        );
    }

    #[test]
    fn literal_displacement() {
        let param = decode("(-$8,A5)", 2, 2).unwrap();
        let operand = param.as_register().unwrap();

        assert_eq!(operand.register, Register::A5);
        assert_eq!(operand.mode, Mode::AddressRegisterIndirectDisplacement);
        assert_eq!(operand.value, 0x1ff8);
        assert!(!operand.destination);
    }

    #[test]
    fn index_register_displacement() {
        let param = decode("(A1,D7.w),", 1, 2).unwrap();
        let operand = param.as_register().unwrap();

        assert_eq!(operand.register, Register::D7);
        assert_eq!(operand.mode, Mode::AddressRegisterIndirectDisplacement);
        assert_eq!(operand.value, 0x12fff);
        assert_eq!(operand.size, Some(Size::Word));
    }

    #[test]
    fn literal_operand() {
        assert_eq!(decode("$FF,", 1, 2).unwrap(), Param::Literal { value: 255 });
        assert_eq!(
            decode("-$8000", 2, 2).unwrap(),
            Param::Literal { value: -32768 }
        );
        assert_eq!(decode("$10", 1, 1).unwrap().destination_register(), None);
    }

    #[test]
    fn unknown_indirect_register_fails() {
        assert!(matches!(
            decode("(A3)", 1, 1),
            Err(DecodeError::UnresolvedIndirectRegister(name)) if name == "A3"
        ));
    }

    #[test]
    fn displacement_without_register_fails() {
        assert!(matches!(
            decode("($10,$20)", 1, 1),
            Err(DecodeError::MissingBaseRegister(_))
        ));
    }

    #[test]
    fn malformed_literal_fails() {
        assert!(matches!(
            decode("#$10", 1, 1),
            Err(DecodeError::InvalidLiteral { .. })
        ));
        assert!(matches!(
            decode("(A0)+", 1, 1),
            Err(DecodeError::InvalidLiteral { .. })
        ));
        assert!(matches!(
            decode("-(A7)", 2, 2),
            Err(DecodeError::InvalidLiteral { token, .. }) if token == "-(A7)"
        ));
    }

    #[test]
    fn strict_mode_rejects_bare_words() {
        let opcode = Opcode::parse("NOP", DecodeOptions::default()).unwrap();

        assert!(matches!(
            Param::decode("D3", 1, 1, &opcode, &snapshot(), DecodeOptions::strict()),
            Err(DecodeError::UnrecognizedOperand(_))
        ));
        assert_eq!(
            Param::decode("D3", 1, 1, &opcode, &snapshot(), DecodeOptions::default()).unwrap(),
            Param::Literal { value: 0xd3 }
        );
    }

    #[test]
    fn serialize_tagged() {
        let json = serde_json::to_value(decode("(A0)", 2, 2).unwrap()).unwrap();
        assert_eq!(json["kind"], "register");
        assert_eq!(json["register"], "A0");
        assert_eq!(json["mode"], "AddressRegisterIndirect");
        assert_eq!(json["value"], "0x00001000");

        let json = serde_json::to_value(Param::Literal { value: -8 }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "literal", "value": -8 }));
    }
}
