//! Flattening of glyph paths into line segments.

use crate::data::{GlyphRecord, PathOp, Rect, Segment};

/// Returns the line segments of a glyph in path order.
///
/// Every [`PathOp::LineTo`] produces one segment from the current point; [`PathOp::MoveTo`] only moves the current point.
/// Polylines are open: no segment is added to close a polyline.
///
/// ```
/// # use hershey::data::{GlyphRecord, PathOp, Segment};
/// # use hershey::path::flatten;
/// let glyph = GlyphRecord {
///     code: 1,
///     left: -4,
///     right: 4,
///     path: vec![PathOp::MoveTo(0, -5), PathOp::LineTo(3, 5), PathOp::LineTo(-3, 5)],
/// };
/// let segments: Vec<Segment> = flatten(&glyph).collect();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1], Segment { x1: 3, y1: 5, x2: -3, y2: 5 });
/// ```
pub fn flatten(glyph: &GlyphRecord) -> Flatten<'_> {
    Flatten {
        ops: glyph.path.iter(),
        current: (0, 0),
        start: (0, 0),
    }
}

/// An iterator over the segments of a glyph path.
///
/// Created by [`flatten`].
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    ops: std::slice::Iter<'a, PathOp>,
    current: (i32, i32),
    start: (i32, i32),
}

impl<'a> Flatten<'a> {
    /// The first point of the polyline the iterator is currently in.
    ///
    /// A closing segment, where one is wanted, runs from the current point back to this point.
    pub fn subpath_start(&self) -> (i32, i32) {
        self.start
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        for op in &mut self.ops {
            match *op {
                PathOp::MoveTo(x, y) => {
                    self.current = (x, y);
                    self.start = (x, y);
                }
                PathOp::LineTo(x, y) => {
                    let (x1, y1) = self.current;
                    self.current = (x, y);
                    return Some(Segment {
                        x1,
                        y1,
                        x2: x,
                        y2: y,
                    });
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.ops.len()))
    }
}

/// Returns the bounding box of all points of a glyph path, or `None` if the path is empty.
///
/// Points reached by a [`PathOp::MoveTo`] count even if no line starts there.
pub fn bounds(glyph: &GlyphRecord) -> Option<Rect> {
    Rect::enclosing(glyph.path.iter().map(PathOp::point))
}

/// Returns the segments of a glyph as a table, one segment per line.
///
/// Each line holds `x1, y1, x2, y2`, every number right-aligned to a width of three characters.
///
/// ```
/// # use hershey::data::{GlyphRecord, PathOp};
/// # use hershey::path::line_list;
/// let glyph = GlyphRecord {
///     code: 1,
///     left: -4,
///     right: 4,
///     path: vec![PathOp::MoveTo(0, -12), PathOp::LineTo(8, 9)],
/// };
/// assert_eq!(line_list(&glyph), "  0, -12,   8,   9\n");
/// ```
pub fn line_list(glyph: &GlyphRecord) -> String {
    let mut list = String::new();

    for segment in flatten(glyph) {
        list.push_str(&format!(
            "{:>3}, {:>3}, {:>3}, {:>3}\n",
            segment.x1, segment.y1, segment.x2, segment.y2
        ));
    }

    list
}
