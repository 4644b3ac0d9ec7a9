//! # Font families
//!
//! A family table assigns the printable ASCII characters to glyph codes.
//! Each line has the form `Name:entry,entry,...` where each entry is either a single code `N` or an inclusive range `N-M`.
//!
//! Codes receive ASCII values sequentially, starting at 32 (space), in the order in which they are declared on their line.
//! The counter does not restart between the entries of a line, but every line starts again at 32.
//!
//! Lines without exactly one `:` are ignored, which allows blank lines and free-form comments in family tables.
//!
//! ```
//! # use hershey::family::FamilyIndex;
//! let index = FamilyIndex::parse("Letters:65-67,97").unwrap();
//! assert_eq!(index.codes("Letters").unwrap(), [65, 66, 67, 97]);
//! assert_eq!(index.ascii(66), Some(33));
//! assert_eq!(index.ascii(97), Some(35));
//! assert_eq!(index.family_name(97), Some("Letters"));
//! ```

use crate::data::LookupError;
use itertools::Itertools;
use spans::Spans;
use std::collections::HashMap;
use std::fmt;

/// The ASCII value assigned to the first code of a family.
pub const FIRST_ASCII: u32 = 32;
/// The number of codes of a complete family, covering ASCII 32 to 127.
pub const FAMILY_SIZE: usize = 96;
/// The largest number of codes a single range may declare.
pub const MAX_RANGE_LEN: u32 = 16 * FAMILY_SIZE as u32;

/// A named sequence of glyph codes.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Family {
    name: String,
    codes: Vec<u32>,
}

impl Family {
    /// The name of the family.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The codes of the family in declaration order.
    ///
    /// The code at position `i` represents the ASCII character `32 + i`.
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Whether the family covers exactly the printable ASCII range.
    pub fn is_complete(&self) -> bool {
        self.codes.len() == FAMILY_SIZE
    }
}

/// Writes the family as a family table line.
///
/// Runs of consecutive ascending codes are written as ranges.
impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;

        let mut spans = self
            .codes
            .iter()
            .spans_by_key(|&code| *code, |a, b| a.checked_add(1) == Some(b));
        let mut separator = "";

        while let Some(mut span) = spans.next() {
            if let Some(&start) = span.next() {
                let end = span.last().map_or(start, |&x| x);

                if start == end {
                    write!(f, "{}{}", separator, start)?;
                } else {
                    write!(f, "{}{}-{}", separator, start, end)?;
                }

                separator = ",";
            }
        }

        Ok(())
    }
}

/// Lookup tables built from a family table.
///
/// Families are kept in declaration order.
/// If a code is declared by several families, it is attributed to the last declaration.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct FamilyIndex {
    families: Vec<Family>,
    positions: HashMap<String, usize>,
    ascii: HashMap<u32, u32>,
    members: HashMap<u32, usize>,
}

impl FamilyIndex {
    /// Parses a family table.
    ///
    /// A family name appearing on several lines continues the same family: the codes of every line are appended to its code sequence.
    /// ASCII values are assigned per line, so the first code of each line is assigned 32.
    ///
    /// # Errors
    ///
    /// Returns an error for a line with one `:` whose name is empty or whose entries can not be parsed.
    pub fn parse(text: &str) -> Result<FamilyIndex, FamilyError> {
        let mut index = FamilyIndex::default();

        for (number, line) in text.lines().enumerate() {
            let number = number + 1;
            let (name, entries) = match line.split(':').collect_tuple::<(&str, &str)>() {
                Some(x) => x,
                None => {
                    if !line.trim().is_empty() {
                        log::debug!("line {}: ignoring {:?}", number, line);
                    }
                    continue;
                }
            };
            let fail = |kind: FamilyErrorKind| FamilyError {
                line: number,
                text: line.to_string(),
                kind,
            };

            let name = name.trim();

            if name.is_empty() {
                return Err(fail(FamilyErrorKind::MissingName));
            }

            let codes = parse_entries(entries).map_err(fail)?;
            index.extend(name, codes);
        }

        log::info!(
            "indexed {} families with {} codes",
            index.families.len(),
            index.ascii.len()
        );

        Ok(index)
    }

    fn extend(&mut self, name: &str, codes: Vec<u32>) {
        let families = &mut self.families;
        let position = *self
            .positions
            .entry(name.to_string())
            .or_insert_with(|| {
                families.push(Family {
                    name: name.to_string(),
                    codes: Vec::new(),
                });
                families.len() - 1
            });

        for (offset, code) in codes.into_iter().enumerate() {
            let ascii = FIRST_ASCII + offset as u32;

            if let Some(previous) = self.members.insert(code, position) {
                if previous != position {
                    log::debug!(
                        "code {} moves from family {:?} to {:?}",
                        code,
                        self.families[previous].name,
                        name
                    );
                }
            }

            self.ascii.insert(code, ascii);
            self.families[position].codes.push(code);
        }
    }

    fn families_name(&self, position: usize) -> &str {
        self.families.get(position).map_or("", |x| x.name.as_str())
    }

    /// The number of families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Whether the index has no families.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// The families in declaration order.
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// The family names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.families.iter().map(Family::name)
    }

    /// Returns the family with the given name.
    pub fn family(&self, name: &str) -> Result<&Family, LookupError> {
        self.positions
            .get(name)
            .map(|&position| &self.families[position])
            .ok_or_else(|| LookupError::UnknownFamily(name.to_string()))
    }

    /// Returns the codes of the family with the given name in declaration order.
    pub fn codes(&self, name: &str) -> Result<&[u32], LookupError> {
        self.family(name).map(Family::codes)
    }

    /// Returns the code representing an ASCII character in the given family.
    ///
    /// The code is taken from position `ascii - 32` of the family's code sequence.
    pub fn code_for(&self, name: &str, ascii: u32) -> Result<u32, LookupError> {
        let codes = self.codes(name)?;

        ascii
            .checked_sub(FIRST_ASCII)
            .and_then(|offset| codes.get(offset as usize))
            .copied()
            .ok_or_else(|| LookupError::AsciiOutOfRange {
                family: name.to_string(),
                ascii,
            })
    }

    /// Returns the ASCII value assigned to a code.
    pub fn ascii(&self, code: u32) -> Option<u32> {
        self.ascii.get(&code).copied()
    }

    /// Returns the name of the family a code belongs to.
    pub fn family_name(&self, code: u32) -> Option<&str> {
        self.members
            .get(&code)
            .map(|&position| self.families_name(position))
    }
}

/// Writes the index as a family table, one line per family.
///
/// Parsing the written table yields an equal index as long as no code is shared between families and every family was declared on a single line.
impl fmt::Display for FamilyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for family in &self.families {
            writeln!(f, "{}", family)?;
        }

        Ok(())
    }
}

/// Expands the comma-separated entries of a line into codes.
fn parse_entries(entries: &str) -> Result<Vec<u32>, FamilyErrorKind> {
    let mut codes = Vec::new();

    for entry in entries.split(',').map(str::trim).filter(|x| !x.is_empty()) {
        let bounds: Vec<&str> = entry.split('-').map(str::trim).collect();

        match bounds.as_slice() {
            [code] => codes.push(parse_code(code)?),
            [start, end] => {
                let start = parse_code(start)?;
                let end = parse_code(end)?;

                if start > end {
                    log::warn!("range {} declares no codes", entry);
                } else if end - start >= MAX_RANGE_LEN {
                    return Err(FamilyErrorKind::RangeTooLarge);
                }

                codes.extend(start..=end);
            }
            _ => return Err(FamilyErrorKind::InvalidEntry),
        }
    }

    Ok(codes)
}

fn parse_code(code: &str) -> Result<u32, FamilyErrorKind> {
    code.parse::<u32>().map_err(|_| FamilyErrorKind::InvalidCode)
}

/// An error that may occur when parsing a family table.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FamilyError {
    /// The 1-based line number.
    pub line: usize,
    /// The text of the line.
    pub text: String,
    /// What went wrong.
    pub kind: FamilyErrorKind,
}

/// The kind of a [`FamilyError`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum FamilyErrorKind {
    /// The family name is empty.
    MissingName,
    /// A code is not a non-negative decimal number.
    InvalidCode,
    /// An entry has more than two bounds.
    InvalidEntry,
    /// A range declares more than [`MAX_RANGE_LEN`] codes.
    RangeTooLarge,
}

impl fmt::Display for FamilyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::MissingName => "The family name is empty.",
            Self::InvalidCode => "A code can not be parsed.",
            Self::InvalidEntry => "An entry is neither a code nor a range of codes.",
            Self::RangeTooLarge => "A range declares too many codes.",
        };
        write!(f, "{}", message)
    }
}

impl fmt::Display for FamilyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}: {:?})", self.kind, self.line, self.text)
    }
}

impl std::error::Error for FamilyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
