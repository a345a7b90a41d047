//! Common functions and statics for the Turtle writer.

use std::io::{self, Write as _};

use rdfsort_api::lazy_regex;

/// Write `txt` with Turtle single-line string escapes applied
/// (the surrounding quotes are the caller's business).
pub(crate) fn quoted_string<W: io::Write>(w: &mut W, txt: &str) -> io::Result<()> {
    for c in txt.chars() {
        match c {
            '"' => w.write_all(b"\\\"")?,
            '\\' => w.write_all(b"\\\\")?,
            '\n' => w.write_all(b"\\n")?,
            '\r' => w.write_all(b"\\r")?,
            '\t' => w.write_all(b"\\t")?,
            '\u{8}' => w.write_all(b"\\b")?,
            '\u{C}' => w.write_all(b"\\f")?,
            c if (c as u32) < 0x20 || c == '\u{7F}' => {
                write!(w, "\\u{:04X}", c as u32)?;
            }
            c => write!(w, "{c}")?,
        }
    }
    Ok(())
}

/// Write `txt` for a triple-quoted string: line breaks stay verbatim, only
/// backslashes and quotes are escaped (escaping every quote keeps any run
/// of quotes legal inside `"""…"""`).
pub(crate) fn long_quoted_string<W: io::Write>(w: &mut W, txt: &str) -> io::Result<()> {
    for c in txt.chars() {
        match c {
            '"' => w.write_all(b"\\\"")?,
            '\\' => w.write_all(b"\\\\")?,
            c => write!(w, "{c}")?,
        }
    }
    Ok(())
}

lazy_regex!(
    pub(crate) PN_LOCAL = r"(?x)^
    #(PN_CHARS_U | ':' | [0-9] | PLX)
    (
        [A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_:0-9]
        # | PLX
        | \\ [_~.!$&'()*+,;=/?\#@%-]
        | % [0-9A-Fa-f]{2}
    )
    # ((PN_CHARS | '.' | ':' | PLX)* (PN_CHARS | ':' | PLX))?
    (
        (
            [A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}.:-]
            | \\ [_~.!$&'()*+,;=/?\#@%-]
            | % [0-9A-Fa-f]{2}
        )*
        (
            [A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}:-]
            | \\ [_~.!$&'()*+,;=/?\#@%-]
            | % [0-9A-Fa-f]{2}
        )
    )?
$"
);

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
