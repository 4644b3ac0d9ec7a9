//! # Vector export
//!
//! Writes the 96 printable ASCII characters of a family as a plain-text line list.
//!
//! The document starts with a comment line naming the family and the bounds of all its segments, followed by one line per character from ASCII 32 to 127:
//!
//! ```text
//! // Font: <family> - Bounds {x, y, width, height} width x height - Note: {left,right},{x1,y1,x2,y2},..
//! '<char>':<left>,<right>|<x1>,<y1>,<x2>,<y2>|<x1>,<y1>,<x2>,<y2>|...
//! ```
//!
//! A character without segments is written as `'<char>':<left>,<right>`.
//! The bounds are the smallest rectangle containing every segment endpoint of the family; a family without segments has the bounds `{0, 0, 0, 0}`.

use crate::data::{GlyphRecord, GlyphTable, Rect, Segment};
use crate::family::{FamilyIndex, FAMILY_SIZE, FIRST_ASCII};
use bytes::{BufMut, Bytes, BytesMut};
use itertools::Itertools;
use std::fmt;

/// Returns the vector document for the family with the given name.
///
/// Every failure is detected before the document is written, so either a complete document or an error is returned.
///
/// # Errors
///
/// The family must exist, it must have exactly 96 codes, and each of its codes must be present in `glyphs`.
pub fn compile(
    name: &str,
    families: &FamilyIndex,
    glyphs: &GlyphTable,
) -> Result<Bytes, ExportError> {
    let family = families
        .family(name)
        .map_err(|_| ExportError::UnknownFamily(name.to_string()))?;
    let codes = family.codes();

    if codes.len() != FAMILY_SIZE {
        return Err(ExportError::Precondition {
            family: name.to_string(),
            len: codes.len(),
        });
    }

    let members = codes
        .iter()
        .map(|&code| {
            glyphs.get(code).map_err(|_| ExportError::MissingGlyph {
                family: name.to_string(),
                code,
            })
        })
        .collect::<Result<Vec<&GlyphRecord>, ExportError>>()?;

    let segments: Vec<Vec<Segment>> = members.iter().map(|x| x.segments()).collect();
    let rect = segment_bounds(segments.iter().flatten());

    log::info!(
        "export family {:?} with {} segments within {:?}",
        name,
        segments.iter().map(Vec::len).sum::<usize>(),
        rect
    );

    let mut buf = BytesMut::new();

    put_line(
        &mut buf,
        &format!(
            "// Font: {} - Bounds {{{}, {}, {}, {}}} {} x {} - Note: {{left,right}},{{x1,y1,x2,y2}},..",
            name, rect.x, rect.y, rect.width, rect.height, rect.width, rect.height
        ),
    );

    for (position, (glyph, segments)) in members.iter().zip(&segments).enumerate() {
        let character = char::from(FIRST_ASCII as u8 + position as u8);
        let mut line = format!("'{}':{},{}", character, glyph.left, glyph.right);

        if !segments.is_empty() {
            line.push('|');
            line.push_str(&segments.iter().join("|"));
        }

        log::trace!("{:?} (code {}): {} segments", character, glyph.code, segments.len());
        put_line(&mut buf, &line);
    }

    Ok(buf.freeze())
}

fn put_line(buf: &mut BytesMut, line: &str) {
    buf.put_slice(line.as_bytes());
    buf.put_u8(b'\n');
}

/// Returns the smallest rectangle containing both endpoints of every segment.
///
/// Returns an empty rectangle at the origin if there are no segments.
pub fn segment_bounds<'a, I>(segments: I) -> Rect
where
    I: IntoIterator<Item = &'a Segment>,
{
    Rect::enclosing(segments.into_iter().flat_map(|x| {
        let [start, end] = x.endpoints();
        std::iter::once(start).chain(std::iter::once(end))
    }))
    .unwrap_or_default()
}

/// An error that may occur when exporting a family.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum ExportError {
    /// No family has the name.
    UnknownFamily(String),
    /// The family does not have exactly 96 codes.
    Precondition {
        /// The name of the family.
        family: String,
        /// The number of codes of the family.
        len: usize,
    },
    /// A code of the family is not part of the glyph table.
    MissingGlyph {
        /// The name of the family.
        family: String,
        /// The missing code.
        code: u32,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFamily(family) => write!(f, "There is no family named {:?}.", family),
            Self::Precondition { family, len } => write!(
                f,
                "The family {:?} has {} codes instead of {}.",
                family, len, FAMILY_SIZE
            ),
            Self::MissingGlyph { family, code } => write!(
                f,
                "The family {:?} refers to the glyph {} which is not part of the glyph table.",
                family, code
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctx::Context;
    use crate::glyph::load;

    /// A glyph table with codes `1..=count`.
    ///
    /// Glyph `n` is a single vertical stroke from `(0, -n)` to `(0, 0)`, except for every tenth glyph which has no strokes.
    fn glyph_table(count: u32) -> String {
        (1..=count)
            .map(|code| {
                if code % 10 == 0 {
                    format!("{:>5}  1JZ", code)
                } else {
                    let top = (b'R' - (code % 40) as u8) as char;
                    format!("{:>5}  3JZR{}RR", code, top)
                }
            })
            .join("\n")
    }

    fn document(name: &str, families: &str, count: u32) -> Result<String, ExportError> {
        let glyphs = load(&glyph_table(count), &Context::default()).unwrap();
        let families = FamilyIndex::parse(families).unwrap();
        compile(name, &families, &glyphs).map(|x| String::from_utf8(x.to_vec()).unwrap())
    }

    #[test]
    fn test_compile() {
        let document = document("Simplex", "Simplex:1-96", 96).unwrap();
        let lines: Vec<&str> = document.lines().collect();

        assert_eq!(lines.len(), 97);
        assert_eq!(
            lines[0],
            "// Font: Simplex - Bounds {0, -39, 0, 39} 0 x 39 - Note: {left,right},{x1,y1,x2,y2},.."
        );
        assert_eq!(lines[1], "' ':-8,8|0,-1,0,0");
        assert_eq!(lines[2], "'!':-8,8|0,-2,0,0");
        assert_eq!(lines[10], "')':-8,8");
        assert_eq!(lines[34], "'A':-8,8|0,-34,0,0");
        assert_eq!(lines[96], "'\u{7f}':-8,8|0,-16,0,0");
        assert!(document.ends_with('\n'));
    }

    #[test]
    fn test_compile_declaration_order() {
        let families = format!("Reversed:{}", (1..=96).rev().join(","));
        let document = document("Reversed", &families, 96).unwrap();
        let lines: Vec<&str> = document.lines().collect();
        // code 96 goes first, code 95 second
        assert_eq!(lines[1], "' ':-8,8|0,-16,0,0");
        assert_eq!(lines[2], "'!':-8,8|0,-15,0,0");
        assert_eq!(lines[96], "'\u{7f}':-8,8|0,-1,0,0");
    }

    #[test]
    fn test_compile_multiple_segments() {
        let mut table = glyph_table(96);
        table.push_str("\n  200  6JZRRTT RVVWW");
        let glyphs = load(&table, &Context::default()).unwrap();
        let families = FamilyIndex::parse("Mixed:200,2-96").unwrap();
        let document = compile("Mixed", &families, &glyphs).unwrap();
        let document = std::str::from_utf8(&document).unwrap();
        let lines: Vec<&str> = document.lines().collect();

        assert_eq!(lines[1], "' ':-8,8|0,0,2,2|4,4,5,5");
        assert!(lines[0].contains("Bounds {0, -39, 5, 44} 5 x 44"));
    }

    #[test]
    fn test_compile_precondition() {
        assert_eq!(
            document("Short", "Short:1-95", 97),
            Err(ExportError::Precondition {
                family: "Short".to_string(),
                len: 95
            })
        );
        assert_eq!(
            document("Long", "Long:1-97", 97),
            Err(ExportError::Precondition {
                family: "Long".to_string(),
                len: 97
            })
        );
    }

    #[test]
    fn test_compile_missing_glyph() {
        assert_eq!(
            document("Roman", "Roman:1-95,500", 96),
            Err(ExportError::MissingGlyph {
                family: "Roman".to_string(),
                code: 500
            })
        );
    }

    #[test]
    fn test_compile_unknown_family() {
        assert_eq!(
            document("Gothic", "Roman:1-96", 96),
            Err(ExportError::UnknownFamily("Gothic".to_string()))
        );
    }

    #[test]
    fn test_compile_without_segments() {
        let glyphs = (1..=96)
            .map(|code| format!("{:>5}  1RR", code))
            .join("\n");
        let glyphs = load(&glyphs, &Context::default()).unwrap();
        let families = FamilyIndex::parse("Blank:1-96").unwrap();
        let document = compile("Blank", &families, &glyphs).unwrap();
        let document = std::str::from_utf8(&document).unwrap();

        assert!(document.starts_with("// Font: Blank - Bounds {0, 0, 0, 0} 0 x 0 - "));
        assert!(document.lines().skip(1).all(|x| x.ends_with(":0,0")));
    }

    fn segment(x1: i32, y1: i32, x2: i32, y2: i32) -> Segment {
        Segment { x1, y1, x2, y2 }
    }

    #[test]
    fn test_segment_bounds() {
        assert_eq!(segment_bounds(&[] as &[Segment]), Rect::default());
        assert_eq!(
            segment_bounds(&[segment(5, -3, -7, 2), segment(1, 9, 0, 0)]),
            Rect {
                x: -7,
                y: -3,
                width: 12,
                height: 12
            }
        );
    }

    #[test]
    fn test_segment_bounds_negative_only() {
        // both corners lie in the negative quadrant; the origin is not included
        assert_eq!(
            segment_bounds(&[segment(-9, -8, -2, -4)]),
            Rect {
                x: -9,
                y: -8,
                width: 7,
                height: 4
            }
        );
    }

    #[test]
    fn test_segment_bounds_order_independent() {
        let mut segments = vec![
            segment(5, -3, -7, 2),
            segment(1, 9, 0, 0),
            segment(-2, -2, 3, 3),
            segment(4, 12, 4, -11),
        ];
        let expected = segment_bounds(&segments);
        let heap = permutohedron::Heap::new(&mut segments);

        for permutation in heap {
            assert_eq!(segment_bounds(&permutation), expected);
        }
    }
}
