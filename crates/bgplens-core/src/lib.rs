//! bgplens core library for BGP summary normalization and health analysis.
//!
//! This crate implements the pipeline used by the CLI: a format decoder
//! (JSON or text, each split into layout/reader/parser) builds a canonical
//! `Summary -> AddressFamily -> Neighbor` tree, every neighbor is assessed
//! for health while it is assembled, and each finished summary is scanned
//! for cross-neighbor anomalies before being wrapped in an [`Entry`].
//! Decoding is pure and side-effect free; the caller owns all I/O and the
//! clock.
//!
//! Invariants:
//! - `asn_class`, `session_type`, `path_diversity_ratio` and the health
//!   fields are computed by constructors, never set from input.
//! - Output order follows discovery order in the input.
//! - Field-level defects default to zero/empty/absent; only "no summary at
//!   all" is an error.
//!
//! # Examples
//! ```
//! use bgplens_core::{AnalysisOptions, analyze};
//! use time::OffsetDateTime;
//!
//! let raw = br#"{"TABLE_vrf": {"ROW_vrf": {
//!     "vrf-name-out": "default",
//!     "vrf-router-id": "10.0.0.1",
//!     "vrf-local-as": "65000"
//! }}}"#;
//! let entries = analyze(raw, &AnalysisOptions::default(), OffsetDateTime::UNIX_EPOCH)?;
//! assert_eq!(entries[0].message.vrf_name, "default");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod asn;
mod assemble;
mod duration;
mod formats;

pub use analysis::{
    AnalysisError, AnalysisOptions, AnomalyThresholds, Assessment, analyze, assess_neighbor,
    build_entries, detect_anomalies, detect_anomalies_with,
};
pub use asn::{PRIVATE_ASN_16, PRIVATE_ASN_32, classify_asn, parse_asn};
pub use assemble::{AddressFamilyFacts, NeighborFacts};
pub use duration::{NEVER, normalize_uptime};
pub use formats::json::{JsonError, summaries_from_json};
pub use formats::text::{TextError, summaries_from_text};
pub use formats::InputFormat;

/// `dataType` stamped on every entry.
pub const ENTRY_DATA_TYPE: &str = "bgp_all_summary";
/// Date used when the supplied timestamp cannot be rendered as RFC 3339.
pub const DEFAULT_DATE: &str = "1970-01-01T00:00:00Z";
/// FSM state name of a fully established session.
pub const ESTABLISHED: &str = "Established";

/// Envelope around one summary, ready for JSON Lines output.
///
/// # Examples
/// ```
/// use bgplens_core::{AnalysisOptions, analyze, ENTRY_DATA_TYPE};
/// use time::OffsetDateTime;
///
/// let raw = b"BGP summary information for VRF default, address family IPv4 Unicast\n";
/// let entries = analyze(raw, &AnalysisOptions::default(), OffsetDateTime::UNIX_EPOCH)?;
/// assert_eq!(entries[0].data_type, ENTRY_DATA_TYPE);
/// assert_eq!(entries[0].timestamp, 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Record kind; always [`ENTRY_DATA_TYPE`].
    pub data_type: String,
    /// Unix timestamp in seconds supplied by the caller.
    pub timestamp: i64,
    /// RFC 3339 (UTC) rendering of `timestamp`.
    pub date: String,
    /// The normalized summary.
    pub message: Summary,
    /// Cross-neighbor anomalies in emission order.
    pub anomalies: Vec<String>,
}

/// BGP state of one VRF.
///
/// `asn_class` always follows `local_asn`: [`Summary::new`] derives it and
/// deserialization recomputes it, ignoring any `asnClass` in the input.
/// Fields stay public for reading; code that mutates `local_asn` directly
/// owns keeping the pair consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SummaryFields")]
pub struct Summary {
    /// VRF context name (not unique within one input).
    pub vrf_name: String,
    /// Router identifier in dotted-quad form.
    pub router_id: String,
    /// Local autonomous system number.
    pub local_asn: u32,
    /// Classification of `local_asn`.
    pub asn_class: AsnClass,
    /// Address families in discovery order.
    pub address_families: Vec<AddressFamily>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryFields {
    vrf_name: String,
    router_id: String,
    local_asn: u32,
    address_families: Vec<AddressFamily>,
}

impl From<SummaryFields> for Summary {
    fn from(fields: SummaryFields) -> Self {
        Summary::new(
            fields.vrf_name,
            fields.router_id,
            fields.local_asn,
            fields.address_families,
        )
    }
}

/// Per-AFI/SAFI table counters and neighbor list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressFamily {
    /// Address family identifier (1 = IPv4, 2 = IPv6).
    pub af_id: i64,
    pub safi: i64,
    pub af_name: String,
    /// RIB generation counter.
    pub table_version: i64,
    pub configured_peers: i64,
    pub capable_peers: i64,
    pub total_networks: i64,
    pub total_paths: i64,
    /// `total_paths / total_networks`, or `0.0` for an empty table.
    pub path_diversity_ratio: f64,
    pub memory_used: i64,
    pub number_attrs: i64,
    pub bytes_attrs: i64,
    pub number_paths: i64,
    pub bytes_paths: i64,
    pub number_communities: i64,
    pub bytes_communities: i64,
    pub number_cluster_list: i64,
    pub bytes_cluster_list: i64,
    pub dampening: String,
    /// Neighbors in discovery order.
    pub neighbors: Vec<Neighbor>,
}

/// One BGP peer with its derived health assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighbor {
    /// Peer address.
    pub neighbor_id: String,
    pub neighbor_asn: u32,
    pub neighbor_version: i64,
    pub msg_received: i64,
    pub msg_sent: i64,
    pub neighbor_table_version: i64,
    pub in_queue_depth: i64,
    pub out_queue_depth: i64,
    pub prefixes_received: i64,
    /// Uptime exactly as the device printed it.
    pub uptime_raw: String,
    /// Parsed uptime; absent for empty, `never` or unrecognized input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime_parsed: Option<Uptime>,
    /// FSM state name. Kept as text since vendors print variants.
    pub state: String,
    pub session_type: SessionType,
    pub health_status: HealthStatus,
    /// Machine-readable issue codes; empty when healthy.
    pub health_issues: Vec<String>,
}

/// Structured uptime breakdown.
///
/// # Examples
/// ```
/// use bgplens_core::normalize_uptime;
///
/// let uptime = normalize_uptime("4d22h").unwrap();
/// assert_eq!(uptime.total_seconds, 4 * 86_400 + 22 * 3_600);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Uptime {
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Exact sum of all components in seconds.
    pub total_seconds: u64,
}

/// Private/public classification of an ASN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsnClass {
    Private,
    Public,
}

/// Internal vs. external session, by ASN equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "iBGP")]
    Ibgp,
    #[serde(rename = "eBGP")]
    Ebgp,
}

/// Neighbor health verdict, ordered by severity.
///
/// # Examples
/// ```
/// use bgplens_core::HealthStatus;
///
/// assert!(HealthStatus::Healthy < HealthStatus::Warning);
/// assert!(HealthStatus::Warning < HealthStatus::Critical);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[default]
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Raise to `level` if currently lower; never lowers.
    pub fn escalate(&mut self, level: HealthStatus) {
        if level > *self {
            *self = level;
        }
    }
}
