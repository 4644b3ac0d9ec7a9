//! # Hershey
//!
//! *Hershey* decodes stroke fonts in the Hershey interchange format and exports them as plain-text line lists.
//!
//! The Hershey fonts are vector fonts digitized by A. V. Hershey and distributed in the compact ASCII encoding devised by James Hurt.
//! Every glyph is a set of open polylines together with a left and a right side-bearing.
//!
//! The library is organized along the stages of the pipeline:
//!
//! - [`glyph`] reassembles wrapped records and decodes them into a [`GlyphTable`](crate::data::GlyphTable).
//! - [`family`] reads a family table which assigns printable ASCII characters to glyph codes.
//! - [`path`] flattens glyph paths into line [segments](crate::data::Segment).
//! - [`export`] writes all 96 printable characters of a family as a vector document.
//!
//! [`font`] bundles a glyph table and a family index behind a single query surface.
//!
//! All operations are pure functions over text that has already been read by the caller.
//!
//! # Example
//!
//! ```
//! # use hershey::ctx::Context;
//! # use hershey::font::Font;
//! let glyphs = "    1  3IZRFRV\n    2  1KY";
//! let families = "Demo:1-2";
//! let font = Font::load(glyphs, families, &Context::default()).unwrap();
//!
//! let glyph = font.glyph_for("Demo", b' ').unwrap();
//! assert_eq!(glyph.code, 1);
//! assert_eq!(font.segments(1).unwrap().len(), 1);
//! ```

#![deny(missing_docs, missing_debug_implementations)]

pub mod ctx;
pub mod data;
pub mod export;
pub mod family;
pub mod font;
pub mod glyph;
pub mod path;
mod util;
