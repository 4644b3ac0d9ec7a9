/// Extends `u8` by helpers for reading Hershey records.
pub trait ByteExt {
    /// Whether the byte may appear in the first four columns of a record header.
    ///
    /// Header columns hold the right-aligned glyph code, so only decimal digits and spaces qualify.
    fn is_header_byte(&self) -> bool;

    /// Returns a character representing the byte.
    ///
    /// Printable ASCII is returned as is.
    /// Control characters, the space character (`0x20`), and the delete character (`0x7F`) are represented by “Control Pictures” as defined by Unicode: <https://www.unicode.org/charts/PDF/U2400.pdf>.
    /// Bytes outside of ASCII are represented by the replacement character.
    fn picture(&self) -> char;
}

impl ByteExt for u8 {
    fn is_header_byte(&self) -> bool {
        self.is_ascii_digit() || *self == b' '
    }

    fn picture(&self) -> char {
        match *self {
            // U+2400 to U+2420 mirror 0x00 to 0x20 one to one
            byte @ 0x00..=0x20 => std::char::from_u32(0x2400 + byte as u32).unwrap_or('\u{FFFD}'),
            0x7F => '␡',
            byte @ 0x21..=0x7E => byte as char,
            _ => '\u{FFFD}',
        }
    }
}
