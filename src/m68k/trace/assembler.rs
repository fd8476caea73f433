use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::m68k::trace::{
    error::TraceError,
    line::TraceLine,
    DecodeOptions,
};

/// Decoded trace. Holds one entry per raw line except the last one, which has no successor to
/// infer results from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    lines: Vec<TraceLine>,
}

impl Trace {
    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceLine> {
        self.lines.iter()
    }
}

impl IntoIterator for Trace {
    type Item = TraceLine;
    type IntoIter = std::vec::IntoIter<TraceLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceLine;
    type IntoIter = std::slice::Iter<'a, TraceLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

pub fn decode_trace<S: AsRef<str>>(raw_lines: &[S]) -> Result<Trace, TraceError> {
    decode_trace_with(raw_lines, DecodeOptions::default())
}

/// Decodes every line together with its successor. The first failing line aborts the whole decode.
pub fn decode_trace_with<S: AsRef<str>>(
    raw_lines: &[S],
    options: DecodeOptions,
) -> Result<Trace, TraceError> {
    let lines = raw_lines
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let line_number = index + 1;
            TraceLine::decode_with(line_number, pair[0].as_ref(), pair[1].as_ref(), options)
                .map_err(|source| TraceError {
                    line_number,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        raw_lines = raw_lines.len(),
        decoded = lines.len(),
        "decoded trace"
    );

    Ok(Trace { lines })
}

/// Splits trace file contents into raw lines. Carriage returns are stripped, and the empty line
/// after a final newline is dropped.
pub fn split_lines(contents: &str) -> Vec<&str> {
    let mut lines = contents
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect::<Vec<_>>();

    if lines.last() == Some(&"") {
        lines.pop();
    }

    lines
}
