use thiserror::Error;

/// Terminal failures of the JSON decoder.
///
/// # Examples
/// ```
/// use bgplens_core::{JsonError, summaries_from_json};
///
/// let err = summaries_from_json(b"{}").unwrap_err();
/// assert!(matches!(err, JsonError::NoVrfData));
/// assert_eq!(err.to_string(), "no BGP summary data found in input");
/// ```
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("malformed JSON: top level is {found}, expected an object")]
    NotAnObject { found: &'static str },
    #[error("no BGP summary data found in input")]
    NoVrfData,
}
