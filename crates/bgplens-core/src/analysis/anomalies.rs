use crate::{AddressFamily, ESTABLISHED, HealthStatus, Summary};

/// Limits applied by the cross-neighbor anomaly scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyThresholds {
    /// Share of an address family's networks, in percent, above which a
    /// single peer is flagged. The comparison is strict.
    pub peer_dependency_pct: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            peer_dependency_pct: 50.0,
        }
    }
}

/// Scan a summary for anomalies using the default thresholds.
///
/// # Examples
/// ```
/// use bgplens_core::{summaries_from_text, detect_anomalies};
///
/// let raw = "BGP summary information for VRF default, address family IPv4 Unicast\n\
///            BGP table version is 1, IPv4 Unicast config peers 2, capable peers 1\n";
/// let summaries = summaries_from_text(raw)?;
/// assert_eq!(
///     detect_anomalies(&summaries[0]),
///     vec!["IPv4 Unicast: capable_peers(1) < configured_peers(2)"]
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn detect_anomalies(summary: &Summary) -> Vec<String> {
    detect_anomalies_with(summary, &AnomalyThresholds::default())
}

pub fn detect_anomalies_with(summary: &Summary, thresholds: &AnomalyThresholds) -> Vec<String> {
    let mut anomalies = Vec::new();
    for af in &summary.address_families {
        peer_count_mismatch(af, &mut anomalies);
        peer_dependency(af, thresholds, &mut anomalies);
        critical_neighbors(af, &mut anomalies);
    }
    anomalies
}

fn peer_count_mismatch(af: &AddressFamily, out: &mut Vec<String>) {
    if af.capable_peers < af.configured_peers {
        out.push(format!(
            "{}: capable_peers({}) < configured_peers({})",
            af.af_name, af.capable_peers, af.configured_peers
        ));
    }
}

/// A lone neighbor carrying the whole table is expected and not flagged.
fn peer_dependency(af: &AddressFamily, thresholds: &AnomalyThresholds, out: &mut Vec<String>) {
    if af.neighbors.len() <= 1 || af.total_networks <= 0 {
        return;
    }
    let total = af.total_networks as f64;
    for neighbor in &af.neighbors {
        if neighbor.state != ESTABLISHED || neighbor.prefixes_received <= 0 {
            continue;
        }
        let dependency = neighbor.prefixes_received as f64 / total * 100.0;
        if dependency > thresholds.peer_dependency_pct {
            out.push(format!(
                "{}: excessive_dependency_on_peer_{}_{:.1}%",
                af.af_name, neighbor.neighbor_id, dependency
            ));
        }
    }
}

fn critical_neighbors(af: &AddressFamily, out: &mut Vec<String>) {
    let critical = af
        .neighbors
        .iter()
        .filter(|neighbor| neighbor.health_status == HealthStatus::Critical)
        .count();
    if critical > 0 {
        out.push(format!(
            "{}: {}_neighbors_in_critical_state",
            af.af_name, critical
        ));
    }
}
