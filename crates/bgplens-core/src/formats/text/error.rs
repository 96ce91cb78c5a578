use thiserror::Error;

/// Terminal failure of the text decoder.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("no BGP summary data found in input")]
    NoSummaryData,
}
