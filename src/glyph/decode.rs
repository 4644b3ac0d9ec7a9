//! # Glyph decoding
//!
//! A logical record has a fixed-width header followed by a stream of coordinate pairs:
//!
//! | Columns        | Content                                                  |
//! |----------------|----------------------------------------------------------|
//! | `0..5`         | glyph code, decimal, padded with spaces                  |
//! | `5..8`         | vertex count, decimal, including the side-bearing pair   |
//! | `8`            | left side-bearing                                        |
//! | `9`            | right side-bearing                                       |
//! | `10..`         | `vertex count - 1` coordinate pairs, two characters each |
//!
//! Side-bearings and coordinates are single characters holding a signed offset from `R`: `R` is zero, `Q` is `-1`, `S` is `1` and so on.
//! The pair `" R"` is the pen-up marker.
//! It produces no point; instead, the next coordinate pair starts a new polyline.
//!
//! ```
//! # use hershey::data::PathOp;
//! # use hershey::glyph::decode::decode;
//! let glyph = decode("  501  6IZRFRV RKVVV").unwrap();
//! assert_eq!(glyph.code, 501);
//! assert_eq!((glyph.left, glyph.right), (-9, 8));
//! assert_eq!(
//!     glyph.path,
//!     [
//!         PathOp::MoveTo(0, -12),
//!         PathOp::LineTo(0, 4),
//!         PathOp::MoveTo(-7, 4),
//!         PathOp::LineTo(4, 4),
//!     ]
//! );
//! ```

use crate::data::{GlyphRecord, PathOp};
use crate::util::byte::ByteExt;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// The character encoding the offset zero.
pub const ORIGIN: u8 = b'R';
/// The coordinate pair which lifts the pen.
pub const PEN_UP: [u8; 2] = [b' ', ORIGIN];

/// The columns of the glyph code.
const CODE_FIELD: Range<usize> = 0..5;
/// The columns of the vertex count.
const VERTEX_COUNT_FIELD: Range<usize> = 5..8;
/// The column of the left side-bearing.
const LEFT_BEARING_OFFSET: usize = 8;
/// The column of the right side-bearing.
const RIGHT_BEARING_OFFSET: usize = 9;
/// The column of the first coordinate pair.
const COORDINATES_OFFSET: usize = 10;

/// Decodes a logical record into a glyph.
///
/// Exactly `vertex count - 1` coordinate pairs are read.
/// Characters following them are ignored.
pub fn decode(record: &str) -> Result<GlyphRecord, DecodeError> {
    let bytes = record.as_bytes();
    let fail = |offset: usize, kind: DecodeErrorKind| DecodeError {
        record: record.to_string(),
        offset,
        kind,
    };

    let code: u32 = field(record, CODE_FIELD, DecodeErrorKind::InvalidCode)?;
    let vertex_count: usize = field(
        record,
        VERTEX_COUNT_FIELD,
        DecodeErrorKind::InvalidVertexCount,
    )?;

    // the side-bearing pair is part of the vertex count
    if vertex_count == 0 {
        return Err(fail(
            VERTEX_COUNT_FIELD.start,
            DecodeErrorKind::InvalidVertexCount,
        ));
    }

    let end = COORDINATES_OFFSET + 2 * (vertex_count - 1);

    if bytes.len() < end {
        let in_pair =
            bytes.len() > COORDINATES_OFFSET && (bytes.len() - COORDINATES_OFFSET) % 2 == 1;
        let (offset, kind) = if in_pair {
            (bytes.len() - 1, DecodeErrorKind::UnterminatedPair)
        } else {
            (bytes.len(), DecodeErrorKind::Truncated { expected: end })
        };
        return Err(fail(offset, kind));
    }

    if bytes.len() > end {
        log::debug!(
            "glyph {}: ignoring {} characters after {} vertices",
            code,
            bytes.len() - end,
            vertex_count
        );
    }

    let left =
        offset_at(bytes, LEFT_BEARING_OFFSET).map_err(|kind| fail(LEFT_BEARING_OFFSET, kind))?;
    let right =
        offset_at(bytes, RIGHT_BEARING_OFFSET).map_err(|kind| fail(RIGHT_BEARING_OFFSET, kind))?;

    let mut path = Vec::with_capacity(vertex_count - 1);
    let mut pen_up = true;

    for offset in (COORDINATES_OFFSET..end).step_by(2) {
        if bytes[offset..offset + 2] == PEN_UP {
            pen_up = true;
            continue;
        }

        let x = offset_at(bytes, offset).map_err(|kind| fail(offset, kind))?;
        let y = offset_at(bytes, offset + 1).map_err(|kind| fail(offset + 1, kind))?;

        if pen_up {
            path.push(PathOp::MoveTo(x, y));
            pen_up = false;
        } else {
            path.push(PathOp::LineTo(x, y));
        }
    }

    log::trace!("glyph {}: {} path operations", code, path.len());

    Ok(GlyphRecord {
        code,
        left,
        right,
        path,
    })
}

/// Returns the signed value of an offset character.
///
/// The format only uses printable ASCII, which bounds offsets to `-50..=44`.
pub fn offset_value(byte: u8) -> Option<i32> {
    if (0x20..=0x7E).contains(&byte) {
        Some(byte as i32 - ORIGIN as i32)
    } else {
        None
    }
}

fn offset_at(bytes: &[u8], offset: usize) -> Result<i32, DecodeErrorKind> {
    let byte = bytes[offset];
    offset_value(byte).ok_or(DecodeErrorKind::InvalidCharacter(byte))
}

/// Parses a space-padded decimal header field.
fn field<T: FromStr>(
    record: &str,
    range: Range<usize>,
    kind: DecodeErrorKind,
) -> Result<T, DecodeError> {
    if record.len() < range.end {
        return Err(DecodeError {
            record: record.to_string(),
            offset: record.len(),
            kind: DecodeErrorKind::Truncated {
                expected: range.end,
            },
        });
    }

    let start = range.start;

    record
        .get(range)
        .and_then(|x| x.trim().parse::<T>().ok())
        .ok_or_else(|| DecodeError {
            record: record.to_string(),
            offset: start,
            kind,
        })
}

/// An error that may occur when decoding a record.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct DecodeError {
    /// The raw record.
    pub record: String,
    /// The byte offset into `record` at which decoding failed.
    pub offset: usize,
    /// What went wrong.
    pub kind: DecodeErrorKind,
}

/// The kind of a [`DecodeError`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum DecodeErrorKind {
    /// The glyph code field is not a non-negative decimal number.
    InvalidCode,
    /// The vertex count field is not a positive decimal number.
    InvalidVertexCount,
    /// The record ends before the data announced by its header.
    Truncated {
        /// The length in bytes the record needs at least.
        expected: usize,
    },
    /// The record ends after the first character of a coordinate pair.
    UnterminatedPair,
    /// A side-bearing or coordinate character is not printable ASCII.
    InvalidCharacter(u8),
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCode => write!(f, "The glyph code can not be parsed."),
            Self::InvalidVertexCount => write!(f, "The vertex count can not be parsed."),
            Self::Truncated { expected } => write!(
                f,
                "The record is truncated; at least {} characters are required.",
                expected
            ),
            Self::UnterminatedPair => write!(f, "The last coordinate pair is incomplete."),
            Self::InvalidCharacter(byte) => {
                write!(f, "The character {} is not a valid offset.", byte.picture())
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (offset {} in record {:?})",
            self.kind, self.offset, self.record
        )
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PathOp::{LineTo, MoveTo};

    fn kind(record: &str) -> DecodeErrorKind {
        decode(record).unwrap_err().kind
    }

    #[test]
    fn test_decode_single_point() {
        // the side-bearings take the first two `R`s, the only pair is `RV`
        let glyph = decode("    1  2RRRVT").unwrap();
        assert_eq!(glyph.code, 1);
        assert_eq!((glyph.left, glyph.right), (0, 0));
        assert_eq!(glyph.path, [MoveTo(0, 4)]);
    }

    #[test]
    fn test_decode_bearings_only() {
        let glyph = decode("  699  1JZ").unwrap();
        assert_eq!(glyph.code, 699);
        assert_eq!((glyph.left, glyph.right), (-8, 8));
        assert!(glyph.path.is_empty());
    }

    #[test]
    fn test_decode_polyline() {
        let glyph = decode(" 2001  4MWRMNVVV").unwrap();
        assert_eq!(
            glyph.path,
            [MoveTo(0, -5), LineTo(-4, 4), LineTo(4, 4)]
        );
    }

    #[test]
    fn test_decode_pen_up_starts_subpath() {
        let glyph = decode("    5  6MWRMRW RPTTT").unwrap();
        assert_eq!(
            glyph.path,
            [
                MoveTo(0, -5),
                LineTo(0, 5),
                MoveTo(-2, 2),
                LineTo(2, 2),
            ]
        );
    }

    #[test]
    fn test_decode_repeated_pen_up() {
        let glyph = decode("    5  5MW R RRR R").unwrap();
        assert_eq!(glyph.path, [MoveTo(0, 0)]);
    }

    #[test]
    fn test_decode_negative_bearings() {
        let glyph = decode("    7  1AR").unwrap();
        assert_eq!((glyph.left, glyph.right), (-17, 0));
    }

    #[test]
    fn test_decode_trailing_characters() {
        let glyph = decode("    9  2RRSSextra").unwrap();
        assert_eq!(glyph.path, [MoveTo(1, 1)]);
    }

    #[test]
    fn test_decode_invalid_code() {
        assert_eq!(kind("  x1  1RR"), DecodeErrorKind::InvalidCode);
        assert_eq!(kind("       1RR"), DecodeErrorKind::InvalidCode);
        assert_eq!(kind("   -1  1RR"), DecodeErrorKind::InvalidCode);
    }

    #[test]
    fn test_decode_invalid_vertex_count() {
        assert_eq!(kind("    1 a1RR"), DecodeErrorKind::InvalidVertexCount);
        assert_eq!(kind("    1   RR"), DecodeErrorKind::InvalidVertexCount);
        assert_eq!(kind("    1  0RR"), DecodeErrorKind::InvalidVertexCount);
    }

    #[test]
    fn test_decode_truncated() {
        let error = decode("    1  3RRRV").unwrap_err();
        assert_eq!(error.kind, DecodeErrorKind::Truncated { expected: 14 });
        assert_eq!(error.offset, 12);
        assert_eq!(error.record, "    1  3RRRV");

        assert_eq!(kind("    1"), DecodeErrorKind::Truncated { expected: 8 });
        assert_eq!(kind("    1  1R"), DecodeErrorKind::Truncated { expected: 10 });
        assert_eq!(kind("  1"), DecodeErrorKind::Truncated { expected: 5 });
    }

    #[test]
    fn test_decode_unterminated_pair() {
        let error = decode("    1  3RRRVR").unwrap_err();
        assert_eq!(error.kind, DecodeErrorKind::UnterminatedPair);
        assert_eq!(error.offset, 12);
    }

    #[test]
    fn test_decode_invalid_character() {
        let error = decode("    1  2RR\tV").unwrap_err();
        assert_eq!(error.kind, DecodeErrorKind::InvalidCharacter(b'\t'));
        assert_eq!(error.offset, 10);

        let error = decode("    1  1R\x7f").unwrap_err();
        assert_eq!(error.kind, DecodeErrorKind::InvalidCharacter(0x7F));
        assert_eq!(error.offset, 9);
    }

    #[test]
    fn test_offset_value() {
        assert_eq!(offset_value(b'R'), Some(0));
        assert_eq!(offset_value(b'A'), Some(-17));
        assert_eq!(offset_value(b'Z'), Some(8));
        assert_eq!(offset_value(b' '), Some(-50));
        assert_eq!(offset_value(b'~'), Some(44));
        assert_eq!(offset_value(b'\n'), None);
    }

    #[test]
    fn test_decode_error_display() {
        let error = decode("    1  3RRRVR").unwrap_err();
        assert_eq!(
            error.to_string(),
            "The last coordinate pair is incomplete. (offset 12 in record \"    1  3RRRVR\")"
        );
        assert_eq!(
            DecodeErrorKind::InvalidCharacter(b'\t').to_string(),
            "The character ␉ is not a valid offset."
        );
    }
}
