use std::fmt;

/// A CSS color string that could not be read back into an [`Rgb`](crate::Rgb).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorParseError {
    /// The offending input fragment.
    pub input: String,
    pub message: String,
}

impl ColorParseError {
    pub(crate) fn new(input: impl Into<String>, msg: impl Into<String>) -> Self {
        Self { input: input.into(), message: msg.into() }
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: {}", self.input, self.message)
    }
}

impl std::error::Error for ColorParseError {}
