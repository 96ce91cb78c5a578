//! Input format decoders.
//!
//! Each format follows a layered structure:
//! - `layout`: field names and line patterns (source of truth)
//! - `reader`: tolerant access to raw values and lines
//! - `parser`: assembly into the canonical model (no raw indexing)
//! - `error`: the terminal failures; field defects never surface here
//!
//! Decoders are pure and contain no I/O; the caller supplies the bytes.

pub(crate) mod common;
pub mod json;
pub mod text;

/// Encoding of a `show bgp all summary` blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// Pick by the first non-whitespace byte.
    #[default]
    Auto,
    /// Nested vendor JSON (`TABLE_vrf` / `ROW_vrf` ...).
    Json,
    /// Line-oriented CLI transcript.
    Text,
}

impl InputFormat {
    /// `Json` when the input opens with `{` or `[`, `Text` otherwise.
    ///
    /// # Examples
    /// ```
    /// use bgplens_core::InputFormat;
    ///
    /// assert_eq!(InputFormat::detect(b"  {\"TABLE_vrf\": {}}"), InputFormat::Json);
    /// assert_eq!(InputFormat::detect(b"BGP summary information"), InputFormat::Text);
    /// ```
    pub fn detect(raw: &[u8]) -> InputFormat {
        match raw.iter().copied().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') | Some(b'[') => InputFormat::Json,
            _ => InputFormat::Text,
        }
    }

    /// Replace `Auto` with the detected format.
    pub fn resolve(self, raw: &[u8]) -> InputFormat {
        match self {
            InputFormat::Auto => InputFormat::detect(raw),
            forced => forced,
        }
    }
}
