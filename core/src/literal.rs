//! Brace-delimited hex literal output, e.g. `{00F8, E007, 1F00}`.

use core::fmt;

const SEPARATOR: &str = ", ";

/// Writes `values` as `{XXXX, XXXX, ...}` with 4-digit upper-case hex tokens.
pub fn write_literal<W: fmt::Write>(out: &mut W, values: &[u16]) -> fmt::Result {
    out.write_char('{')?;
    for (idx, value) in values.iter().enumerate() {
        if idx != 0 {
            out.write_str(SEPARATOR)?;
        }
        write!(out, "{:04X}", value)?;
    }
    out.write_char('}')
}

/// Display adapter over packed sprite colors.
#[derive(Debug, Clone, Copy)]
pub struct SpriteLiteral<'a>(pub &'a [u16]);

impl fmt::Display for SpriteLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_literal(f, self.0)
    }
}
