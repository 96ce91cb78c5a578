use crate::{ESTABLISHED, HealthStatus, NeighborFacts, SessionType};

/// Derived session type and health verdict for one neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub session_type: SessionType,
    pub status: HealthStatus,
    /// Issue codes in check order.
    pub issues: Vec<String>,
}

#[derive(Debug, Default)]
struct Verdict {
    status: HealthStatus,
    issues: Vec<String>,
}

impl Verdict {
    fn raise(&mut self, level: HealthStatus, issue: String) {
        self.status.escalate(level);
        self.issues.push(issue);
    }
}

type Check = fn(&NeighborFacts, i64, &mut Verdict);

const CHECKS: [Check; 5] = [
    check_session_state,
    check_input_queue,
    check_output_queue,
    check_prefixes_received,
    check_table_version,
];

/// Assess one neighbor against its address family table version and the
/// local ASN.
///
/// # Examples
/// ```
/// use bgplens_core::{HealthStatus, NeighborFacts, SessionType, assess_neighbor};
///
/// let facts = NeighborFacts {
///     neighbor_asn: 65001,
///     out_queue_depth: 3,
///     state: "Idle".to_string(),
///     ..NeighborFacts::default()
/// };
/// let assessment = assess_neighbor(&facts, 10, 65000);
/// assert_eq!(assessment.session_type, SessionType::Ebgp);
/// assert_eq!(assessment.status, HealthStatus::Critical);
/// assert_eq!(assessment.issues, vec!["session_state_idle", "output_queue_depth_3"]);
/// ```
pub fn assess_neighbor(facts: &NeighborFacts, af_table_version: i64, local_asn: u32) -> Assessment {
    let mut verdict = Verdict::default();
    for check in CHECKS {
        check(facts, af_table_version, &mut verdict);
    }
    Assessment {
        session_type: session_type(facts.neighbor_asn, local_asn),
        status: verdict.status,
        issues: verdict.issues,
    }
}

fn session_type(neighbor_asn: u32, local_asn: u32) -> SessionType {
    if neighbor_asn == local_asn {
        SessionType::Ibgp
    } else {
        SessionType::Ebgp
    }
}

fn is_established(facts: &NeighborFacts) -> bool {
    facts.state == ESTABLISHED
}

fn check_session_state(facts: &NeighborFacts, _: i64, verdict: &mut Verdict) {
    if !is_established(facts) {
        verdict.raise(
            HealthStatus::Critical,
            format!("session_state_{}", state_code(&facts.state)),
        );
    }
}

/// Lowercase state with whitespace runs collapsed to `_`.
fn state_code(state: &str) -> String {
    state
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

fn check_input_queue(facts: &NeighborFacts, _: i64, verdict: &mut Verdict) {
    if facts.in_queue_depth > 0 {
        verdict.raise(
            HealthStatus::Critical,
            format!("input_queue_depth_{}", facts.in_queue_depth),
        );
    }
}

fn check_output_queue(facts: &NeighborFacts, _: i64, verdict: &mut Verdict) {
    if facts.out_queue_depth > 0 {
        verdict.raise(
            HealthStatus::Warning,
            format!("output_queue_depth_{}", facts.out_queue_depth),
        );
    }
}

fn check_prefixes_received(facts: &NeighborFacts, _: i64, verdict: &mut Verdict) {
    if is_established(facts) && facts.prefixes_received == 0 {
        verdict.raise(HealthStatus::Warning, "no_prefixes_received".to_string());
    }
}

fn check_table_version(facts: &NeighborFacts, af_table_version: i64, verdict: &mut Verdict) {
    let neighbor_version = facts.neighbor_table_version;
    if is_established(facts) && neighbor_version != 0 && neighbor_version != af_table_version {
        verdict.raise(
            HealthStatus::Warning,
            format!("table_version_mismatch_local_{af_table_version}_neighbor_{neighbor_version}"),
        );
    }
}
