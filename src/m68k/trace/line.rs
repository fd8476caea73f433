use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use tracing::debug;

use crate::{
    m68k::trace::{
        error::DecodeError, inference::infer_result, literal::parse_hex, opcode::Opcode,
        operand::Param, snapshot::RegisterSnapshot, DecodeOptions,
    },
    serde::hex::Hex32,
};

const COMMENT_DIVIDER: &str = " ; ";
const REGISTER_DIVIDER: &str = " -- ";

/// One decoded trace line. Holds the registers before the instruction was executed and, when the
/// last operand is a destination register, the value that register holds afterwards.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLine {
    /// 1-based.
    pub line_number: usize,
    #[serde_as(as = "Hex32")]
    pub address: u32,
    pub opcode: Opcode,
    pub params: Vec<Param>,
    /// Operand tokens as they appear in the line, trailing commas included.
    pub raw_params: Vec<String>,
    /// The line with whitespace runs collapsed.
    pub raw_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub registers: RegisterSnapshot,
    #[serde_as(as = "Option<Hex32>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<u32>,
}

impl TraceLine {
    pub fn decode(
        line_number: usize,
        raw_line: &str,
        next_raw_line: &str,
    ) -> Result<Self, DecodeError> {
        Self::decode_with(
            line_number,
            raw_line,
            next_raw_line,
            DecodeOptions::default(),
        )
    }

    pub fn decode_with(
        line_number: usize,
        raw_line: &str,
        next_raw_line: &str,
        options: DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let raw_line = collapse_whitespace(raw_line);
        let next_line = collapse_whitespace(next_raw_line);

        let (body, comment) = split_comment(&raw_line);
        let (raw_registers, raw_asm) = split_divider(body).ok_or(DecodeError::MissingDivider)?;

        let mut tokens = raw_asm.split(' ');
        let raw_address = tokens
            .next()
            .filter(|token| !token.is_empty())
            .ok_or(DecodeError::MissingAddress)?;
        let raw_opcode = tokens.next().ok_or(DecodeError::MissingOpcode)?;
        let raw_params = tokens.map(|token| token.to_owned()).collect::<Vec<_>>();

        let address = decode_address(raw_address)?;
        let registers = RegisterSnapshot::parse(raw_registers, options)?;
        let opcode = Opcode::parse(raw_opcode, options)?;

        let total = raw_params.len();
        let params = raw_params
            .iter()
            .enumerate()
            .map(|(index, raw)| Param::decode(raw, index + 1, total, &opcode, &registers, options))
            .collect::<Result<Vec<_>, _>>()?;

        let result = infer_result(&params, &next_line, options)?;

        debug!(
            line_number,
            address = %format_args!("{:#010x}", address),
            instruction = %opcode.instruction,
            params = params.len(),
            "decoded trace line"
        );

        Ok(Self {
            line_number,
            address,
            comment: comment.map(|comment| comment.to_owned()),
            opcode,
            params,
            raw_params,
            registers,
            result,
            raw_line,
        })
    }
}

/// Replaces every whitespace run with a single space and trims both ends.
pub fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits off the trailing ` ; comment`, if any.
pub fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.split_once(COMMENT_DIVIDER) {
        Some((body, comment)) => (body, Some(comment)),
        None => (line, None),
    }
}

/// Splits a line body into the register dump and the instruction text. An empty register dump
/// leaves the line starting with `-- `.
pub fn split_divider(body: &str) -> Option<(&str, &str)> {
    body.split_once(REGISTER_DIVIDER).or_else(|| {
        body.strip_prefix(REGISTER_DIVIDER.trim_start())
            .map(|asm| ("", asm))
    })
}

fn decode_address(token: &str) -> Result<u32, DecodeError> {
    parse_hex(token.strip_suffix(':').unwrap_or(token)).map_err(|source| {
        DecodeError::InvalidAddress {
            token: token.to_owned(),
            source,
        }
    })
}
