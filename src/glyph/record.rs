//! # Record reassembly
//!
//! Hershey glyph tables are hard-wrapped at a fixed column width without any continuation marker.
//! A physical line starts a new logical record if and only if its first four characters (or all of them, for shorter lines) are decimal digits or spaces; these columns hold the right-aligned glyph code.
//! Every other line continues the record started most recently and is appended to it verbatim.
//!
//! Empty lines carry no data and are dropped.
//!
//! ```
//! # use hershey::glyph::record::reassemble;
//! let records = reassemble("  501  4KYRFRV\nRV\n  502  1JZ").unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].text, "  501  4KYRFRVRV");
//! assert_eq!(records[1].line, 3);
//! ```

use crate::util::byte::ByteExt;

/// The number of leading columns inspected to classify a line.
const HEADER_PROBE_LEN: usize = 4;

/// A logical glyph record.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Record {
    /// The 1-based number of the physical line that starts the record.
    pub line: usize,
    /// The concatenated text of the record.
    pub text: String,
}

/// A continuation line was found before any header line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct OrphanLine {
    /// The 1-based number of the offending physical line.
    pub line: usize,
    /// The text of the offending physical line.
    pub text: String,
}

/// Whether the physical line starts a new logical record.
pub fn is_header(line: &str) -> bool {
    line.bytes().take(HEADER_PROBE_LEN).all(|x| x.is_header_byte())
}

/// Joins the physical lines of a glyph table into logical records.
///
/// Returns an error if the first non-empty line is not a header line, since there is no record it could extend.
pub fn reassemble(text: &str) -> Result<Vec<Record>, OrphanLine> {
    let mut records: Vec<Record> = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let number = number + 1;

        if line.is_empty() {
            continue;
        }

        if is_header(line) {
            records.push(Record {
                line: number,
                text: line.to_string(),
            });
        } else if let Some(record) = records.last_mut() {
            log::trace!("line {} continues the record of line {}", number, record.line);
            record.text.push_str(line);
        } else {
            return Err(OrphanLine {
                line: number,
                text: line.to_string(),
            });
        }
    }

    log::info!("reassembled {} records", records.len());

    Ok(records)
}
