use std::str::Utf8Error;

use thiserror::Error;
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use tracing::debug;

use crate::formats::InputFormat;
use crate::formats::json::{JsonError, summaries_from_json};
use crate::formats::text::{TextError, summaries_from_text};
use crate::{DEFAULT_DATE, ENTRY_DATA_TYPE, Entry, Summary};

mod anomalies;
mod health;

pub use anomalies::{AnomalyThresholds, detect_anomalies, detect_anomalies_with};
pub use health::{Assessment, assess_neighbor};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("JSON input: {0}")]
    Json(#[from] JsonError),
    #[error("text input: {0}")]
    Text(#[from] TextError),
    #[error("text input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}

/// Knobs for one [`analyze`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisOptions {
    /// Input encoding; `Auto` sniffs the first non-whitespace byte.
    pub format: InputFormat,
    pub thresholds: AnomalyThresholds,
}

/// Decode one input blob and wrap every summary in an [`Entry`] stamped
/// with `at`.
pub fn analyze(
    raw: &[u8],
    options: &AnalysisOptions,
    at: OffsetDateTime,
) -> Result<Vec<Entry>, AnalysisError> {
    let format = options.format.resolve(raw);
    debug!(?format, bytes = raw.len(), "decoding BGP summary");
    let summaries = match format {
        InputFormat::Text => summaries_from_text(std::str::from_utf8(raw)?)?,
        InputFormat::Json | InputFormat::Auto => summaries_from_json(raw)?,
    };
    Ok(build_entries(summaries, at, &options.thresholds))
}

pub fn build_entries(
    summaries: Vec<Summary>,
    at: OffsetDateTime,
    thresholds: &AnomalyThresholds,
) -> Vec<Entry> {
    summaries
        .into_iter()
        .map(|summary| Entry::new(summary, at, thresholds))
        .collect()
}

impl Entry {
    pub fn new(summary: Summary, at: OffsetDateTime, thresholds: &AnomalyThresholds) -> Self {
        let anomalies = detect_anomalies_with(&summary, thresholds);
        let at = at.to_offset(UtcOffset::UTC);
        Entry {
            data_type: ENTRY_DATA_TYPE.to_string(),
            timestamp: at.unix_timestamp(),
            date: at
                .format(&Rfc3339)
                .unwrap_or_else(|_| DEFAULT_DATE.to_string()),
            message: summary,
            anomalies,
        }
    }
}
