//! The decoded data of a Hershey font.

use itertools::{Itertools, MinMaxResult};
use std::collections::HashMap;
use std::fmt;

/// A single step of a glyph path in pen-space coordinates.
///
/// Paths consist of open polylines only: there is no close operation and no curve operation.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum PathOp {
    /// Lifts the pen and starts a new polyline at `(x, y)`.
    MoveTo(i32, i32),
    /// Draws a straight line from the current point to `(x, y)`.
    LineTo(i32, i32),
}

impl PathOp {
    /// The point the pen is located at after the operation.
    pub fn point(&self) -> (i32, i32) {
        match *self {
            PathOp::MoveTo(x, y) | PathOp::LineTo(x, y) => (x, y),
        }
    }
}

/// A decoded glyph.
///
/// A non-empty path always starts with [`PathOp::MoveTo`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GlyphRecord {
    /// The Hershey code of the glyph.
    ///
    /// Codes are unique within a glyph table but neither continuous nor related to ASCII.
    pub code: u32,
    /// The left side-bearing.
    pub left: i32,
    /// The right side-bearing.
    ///
    /// Not necessarily greater than `left`.
    pub right: i32,
    /// The strokes of the glyph.
    pub path: Vec<PathOp>,
}

impl GlyphRecord {
    /// Returns the flattened line segments of the glyph in path order.
    pub fn segments(&self) -> Vec<Segment> {
        crate::path::flatten(self).collect()
    }
}

/// A straight line between two pen positions.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Segment {
    /// The x coordinate of the start point.
    pub x1: i32,
    /// The y coordinate of the start point.
    pub y1: i32,
    /// The x coordinate of the end point.
    pub x2: i32,
    /// The y coordinate of the end point.
    pub y2: i32,
}

impl Segment {
    /// Both endpoints of the segment.
    pub fn endpoints(&self) -> [(i32, i32); 2] {
        [(self.x1, self.y1), (self.x2, self.y2)]
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}

/// An axis-aligned rectangle with integer coordinates.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct Rect {
    /// The smallest x coordinate.
    pub x: i32,
    /// The smallest y coordinate.
    pub y: i32,
    /// The extent along the x axis.
    pub width: i32,
    /// The extent along the y axis.
    pub height: i32,
}

impl Rect {
    /// Returns the smallest rectangle containing all given points, or `None` if there are no points.
    ///
    /// ```
    /// # use hershey::data::Rect;
    /// let rect = Rect::enclosing(vec![(3, -2), (-1, 4), (0, 0)]).unwrap();
    /// assert_eq!(rect, Rect { x: -1, y: -2, width: 4, height: 6 });
    /// ```
    pub fn enclosing<I>(points: I) -> Option<Rect>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let (xs, ys): (Vec<i32>, Vec<i32>) = points.into_iter().unzip();
        let (min_x, max_x) = min_max(xs)?;
        let (min_y, max_y) = min_max(ys)?;

        Some(Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }
}

fn min_max(values: Vec<i32>) -> Option<(i32, i32)> {
    match values.into_iter().minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(x) => Some((x, x)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

/// The decoded glyphs of a font in source order.
///
/// The table keeps an index from glyph code to position which is built once on construction.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct GlyphTable {
    glyphs: Vec<GlyphRecord>,
    positions: HashMap<u32, usize>,
}

impl GlyphTable {
    /// Creates a table from glyphs with pairwise distinct codes.
    ///
    /// Callers guarantee uniqueness; [`glyph::load`](crate::glyph::load) rejects duplicates before constructing a table.
    pub(crate) fn from_glyphs(glyphs: Vec<GlyphRecord>) -> Self {
        let positions: HashMap<u32, usize> = glyphs
            .iter()
            .enumerate()
            .map(|(position, glyph)| (glyph.code, position))
            .collect();
        debug_assert_eq!(positions.len(), glyphs.len());

        GlyphTable { glyphs, positions }
    }

    /// The number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the table has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Returns the glyph with the given code.
    pub fn get(&self, code: u32) -> Result<&GlyphRecord, LookupError> {
        self.index_of(code)
            .map(|position| &self.glyphs[position])
            .ok_or(LookupError::UnknownCode(code))
    }

    /// Returns the position of the glyph with the given code.
    pub fn index_of(&self, code: u32) -> Option<usize> {
        self.positions.get(&code).copied()
    }

    /// Returns the glyph at the given position.
    pub fn at(&self, position: usize) -> Option<&GlyphRecord> {
        self.glyphs.get(position)
    }

    /// Iterates the glyphs in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, GlyphRecord> {
        self.glyphs.iter()
    }
}

impl<'a> IntoIterator for &'a GlyphTable {
    type Item = &'a GlyphRecord;
    type IntoIter = std::slice::Iter<'a, GlyphRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An error that may occur when looking up a glyph.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum LookupError {
    /// No glyph has the code.
    UnknownCode(u32),
    /// No family has the name.
    UnknownFamily(String),
    /// The family has no glyph for the ASCII code.
    AsciiOutOfRange {
        /// The name of the family.
        family: String,
        /// The requested ASCII code.
        ascii: u32,
    },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCode(code) => write!(f, "There is no glyph with code {}.", code),
            Self::UnknownFamily(family) => write!(f, "There is no family named {:?}.", family),
            Self::AsciiOutOfRange { family, ascii } => write!(
                f,
                "The family {:?} has no glyph for ASCII code {}.",
                family, ascii
            ),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
