//! The context with which a font is loaded.

/// A context defines customization options.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Context {
    /// What [`glyph::load`](crate::glyph::load) does with a record that can not be decoded.
    ///
    /// The same policy applies to records repeating a glyph code that is already part of the table.
    pub on_decode_error: ErrorPolicy,
}

impl Context {
    /// Creates a context with the given error policy.
    pub fn new(on_decode_error: ErrorPolicy) -> Self {
        Context { on_decode_error }
    }
}

/// The reaction to a malformed record in a glyph table.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ErrorPolicy {
    /// Fail the whole load on the first malformed record.
    ///
    /// No partially populated table is ever returned.
    Abort,
    /// Leave malformed records out of the table and continue with the next one.
    ///
    /// Every skipped record is reported with `log::warn!`.
    Skip,
}

impl ErrorPolicy {
    /// Returns the policy for the given name, or `None` if the name is invalid.
    pub fn from_name(name: &str) -> Option<ErrorPolicy> {
        match name {
            "abort" => Some(ErrorPolicy::Abort),
            "skip" => Some(ErrorPolicy::Skip),
            _ => None,
        }
    }
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Abort
    }
}
