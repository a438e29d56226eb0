//! Parse limits shared by [`parse_with_options`](crate::parse_with_options) and
//! [`verify_with_options`](crate::verify_with_options).

/// Options controlling how much nesting the parser accepts.
///
/// The default imposes no limit: recursion depth then grows with the input's
/// nesting depth. Callers handling untrusted input should set one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject documents whose arrays/objects nest more than `max_depth` levels.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}
