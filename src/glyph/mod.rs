//! Loading of Hershey glyph tables.
//!
//! A glyph table is read in two stages:
//! [`record`] joins wrapped physical lines into logical records and [`decode`] turns every record into a [`GlyphRecord`].
//!
//! # Example
//!
//! ```
//! # use hershey::ctx::Context;
//! # use hershey::glyph::load;
//! let text = "  501  6IZRFRV RK\nVVV\n  502  1JZ";
//! let table = load(text, &Context::default()).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get(501).unwrap().path.len(), 4);
//! ```

pub mod decode;
pub mod record;

use crate::ctx::{Context, ErrorPolicy};
use crate::data::{GlyphRecord, GlyphTable};
use decode::DecodeError;
use std::collections::HashSet;
use std::fmt;

/// Decodes a glyph table.
///
/// `ctx.on_decode_error` decides whether a malformed record or a repeated glyph code fails the load or is skipped.
/// A continuation line at the very start of the text always fails the load since it can not be attributed to any glyph.
pub fn load(text: &str, ctx: &Context) -> Result<GlyphTable, LoadError> {
    let records = record::reassemble(text).map_err(|x| LoadError::OrphanContinuation {
        line: x.line,
        text: x.text,
    })?;

    let mut glyphs: Vec<GlyphRecord> = Vec::with_capacity(records.len());
    let mut codes: HashSet<u32> = HashSet::with_capacity(records.len());

    for record in records {
        let result = decode::decode(&record.text)
            .map_err(|source| LoadError::Decode {
                line: record.line,
                source,
            })
            .and_then(|glyph| {
                if codes.insert(glyph.code) {
                    Ok(glyph)
                } else {
                    Err(LoadError::DuplicateCode {
                        line: record.line,
                        code: glyph.code,
                    })
                }
            });

        match (result, ctx.on_decode_error) {
            (Ok(glyph), _) => glyphs.push(glyph),
            (Err(error), ErrorPolicy::Abort) => return Err(error),
            (Err(error), ErrorPolicy::Skip) => log::warn!("skipping record: {}", error),
        }
    }

    log::info!("decoded {} glyphs", glyphs.len());

    Ok(GlyphTable::from_glyphs(glyphs))
}

/// An error that may occur when loading a glyph table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LoadError {
    /// The table starts with a continuation line.
    OrphanContinuation {
        /// The 1-based line number.
        line: usize,
        /// The text of the line.
        text: String,
    },
    /// A record can not be decoded.
    Decode {
        /// The 1-based line number at which the record starts.
        line: usize,
        /// The decoding failure.
        source: DecodeError,
    },
    /// A record repeats the code of an earlier record.
    DuplicateCode {
        /// The 1-based line number at which the repeating record starts.
        line: usize,
        /// The repeated glyph code.
        code: u32,
    },
}

impl LoadError {
    /// The 1-based line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::OrphanContinuation { line, .. }
            | Self::Decode { line, .. }
            | Self::DuplicateCode { line, .. } => *line,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrphanContinuation { line, text } => write!(
                f,
                "Line {} continues a record but no record has been started: {:?}",
                line, text
            ),
            Self::Decode { line, source } => {
                write!(f, "The record at line {} is malformed: {}", line, source)
            }
            Self::DuplicateCode { line, code } => write!(
                f,
                "The record at line {} repeats the glyph code {}.",
                line, code
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}
