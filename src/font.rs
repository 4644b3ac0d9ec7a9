//! A glyph table together with its family index.
//!
//! [`Font`] is the query surface for consumers such as viewers or converters: glyphs can be looked up by code, by position, or by family and ASCII character.
//! Both tables are immutable after loading, so a `Font` can be shared between threads without locking.

use crate::ctx::Context;
use crate::data::{GlyphRecord, GlyphTable, LookupError, Segment};
use crate::family::{Family, FamilyError, FamilyIndex};
use crate::glyph::{self, LoadError};
use crate::{export, path};
use bytes::Bytes;
use std::fmt;

/// A loaded Hershey font.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Font {
    glyphs: GlyphTable,
    families: FamilyIndex,
}

impl Font {
    /// Loads a font from the text of a glyph table and the text of a family table.
    pub fn load(glyphs: &str, families: &str, ctx: &Context) -> Result<Font, FontError> {
        let glyphs = glyph::load(glyphs, ctx).map_err(FontError::Glyphs)?;
        let families = FamilyIndex::parse(families).map_err(FontError::Families)?;

        for family in families.families() {
            if !family.is_complete() {
                log::warn!(
                    "family {:?} has {} codes and can not be exported",
                    family.name(),
                    family.codes().len()
                );
            }
        }

        Ok(Font::new(glyphs, families))
    }

    /// Creates a font from tables loaded separately.
    pub fn new(glyphs: GlyphTable, families: FamilyIndex) -> Font {
        Font { glyphs, families }
    }

    /// The glyph table.
    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// The family index.
    pub fn families(&self) -> &FamilyIndex {
        &self.families
    }

    /// Returns the glyph with the given code.
    pub fn glyph(&self, code: u32) -> Result<&GlyphRecord, LookupError> {
        self.glyphs.get(code)
    }

    /// Returns the glyph at the given position of the glyph table.
    pub fn glyph_at(&self, position: usize) -> Option<&GlyphRecord> {
        self.glyphs.at(position)
    }

    /// Returns the glyph representing an ASCII character in the given family.
    pub fn glyph_for(&self, family: &str, ascii: u8) -> Result<&GlyphRecord, LookupError> {
        let code = self.families.code_for(family, ascii as u32)?;
        self.glyphs.get(code)
    }

    /// The family names in declaration order.
    pub fn family_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.families.names()
    }

    /// Returns the family with the given name.
    pub fn family(&self, name: &str) -> Result<&Family, LookupError> {
        self.families.family(name)
    }

    /// Returns the line segments of the glyph with the given code.
    pub fn segments(&self, code: u32) -> Result<Vec<Segment>, LookupError> {
        self.glyph(code).map(GlyphRecord::segments)
    }

    /// Returns the segment table of the glyph with the given code.
    ///
    /// See [`path::line_list`].
    pub fn line_list(&self, code: u32) -> Result<String, LookupError> {
        self.glyph(code).map(path::line_list)
    }

    /// Returns a summary of the glyph with the given code.
    pub fn info(&self, code: u32) -> Result<GlyphInfo<'_>, LookupError> {
        let glyph = self.glyph(code)?;

        Ok(GlyphInfo {
            code: glyph.code,
            ascii: self.families.ascii(code),
            family: self.families.family_name(code),
        })
    }

    /// Returns the vector document of a family.
    ///
    /// See [`export::compile`].
    pub fn export(&self, family: &str) -> Result<Bytes, export::ExportError> {
        export::compile(family, &self.families, &self.glyphs)
    }
}

/// The classification of a glyph.
///
/// The `Display` implementation writes one labeled line per known property:
///
/// ```text
/// Code:   2001  (0x7D1)
/// ASCII:  65  (0x41)
/// Family: Roman
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct GlyphInfo<'a> {
    /// The Hershey code.
    pub code: u32,
    /// The ASCII value, if the glyph belongs to a family.
    pub ascii: Option<u32>,
    /// The family name, if the glyph belongs to a family.
    pub family: Option<&'a str>,
}

impl fmt::Display for GlyphInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code:   {}  (0x{:X})", self.code, self.code)?;

        if let Some(ascii) = self.ascii {
            write!(f, "\nASCII:  {}  (0x{:X})", ascii, ascii)?;
        }

        if let Some(family) = self.family {
            write!(f, "\nFamily: {}", family)?;
        }

        Ok(())
    }
}

/// An error that may occur when loading a font.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FontError {
    /// The glyph table can not be loaded.
    Glyphs(LoadError),
    /// The family table can not be parsed.
    Families(FamilyError),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Glyphs(error) => write!(f, "Invalid glyph table: {}", error),
            Self::Families(error) => write!(f, "Invalid family table: {}", error),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Glyphs(error) => Some(error),
            Self::Families(error) => Some(error),
        }
    }
}
