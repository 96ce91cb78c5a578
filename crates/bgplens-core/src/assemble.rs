//! Construction of the canonical tree from decoded facts.
//!
//! Decoders fill the plain `*Facts` records; the constructors here derive
//! every computed field so no entity exists in a half-annotated state.

use crate::analysis::{Assessment, assess_neighbor};
use crate::{AddressFamily, Neighbor, Summary, classify_asn, normalize_uptime};

/// Neighbor columns as decoded from the input, before analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborFacts {
    pub neighbor_id: String,
    pub neighbor_asn: u32,
    pub neighbor_version: i64,
    pub msg_received: i64,
    pub msg_sent: i64,
    pub neighbor_table_version: i64,
    pub in_queue_depth: i64,
    pub out_queue_depth: i64,
    pub prefixes_received: i64,
    pub uptime_raw: String,
    pub state: String,
}

/// Address family counters as decoded from the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFamilyFacts {
    pub af_id: i64,
    pub safi: i64,
    pub af_name: String,
    pub table_version: i64,
    pub configured_peers: i64,
    pub capable_peers: i64,
    pub total_networks: i64,
    pub total_paths: i64,
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
}

impl Neighbor {
    /// Build a neighbor, normalizing its uptime and assessing its health
    /// against the owning address family and summary.
    ///
    /// # Examples
    /// ```
    /// use bgplens_core::{HealthStatus, Neighbor, NeighborFacts, SessionType};
    ///
    /// let facts = NeighborFacts {
    ///     neighbor_id: "10.0.0.2".to_string(),
    ///     neighbor_asn: 65000,
    ///     prefixes_received: 12,
    ///     uptime_raw: "P1D".to_string(),
    ///     state: "Established".to_string(),
    ///     ..NeighborFacts::default()
    /// };
    /// let neighbor = Neighbor::new(facts, 10, 65000);
    /// assert_eq!(neighbor.session_type, SessionType::Ibgp);
    /// assert_eq!(neighbor.health_status, HealthStatus::Healthy);
    /// ```
    pub fn new(facts: NeighborFacts, af_table_version: i64, local_asn: u32) -> Self {
        let Assessment {
            session_type,
            status,
            issues,
        } = assess_neighbor(&facts, af_table_version, local_asn);
        let uptime_parsed = normalize_uptime(&facts.uptime_raw);

        Neighbor {
            neighbor_id: facts.neighbor_id,
            neighbor_asn: facts.neighbor_asn,
            neighbor_version: facts.neighbor_version,
            msg_received: facts.msg_received,
            msg_sent: facts.msg_sent,
            neighbor_table_version: facts.neighbor_table_version,
            in_queue_depth: facts.in_queue_depth,
            out_queue_depth: facts.out_queue_depth,
            prefixes_received: facts.prefixes_received,
            uptime_raw: facts.uptime_raw,
            uptime_parsed,
            state: facts.state,
            session_type,
            health_status: status,
            health_issues: issues,
        }
    }
}

impl AddressFamily {
    pub fn new(facts: AddressFamilyFacts, neighbors: Vec<Neighbor>) -> Self {
        AddressFamily {
            path_diversity_ratio: path_diversity_ratio(facts.total_paths, facts.total_networks),
            af_id: facts.af_id,
            safi: facts.safi,
            af_name: facts.af_name,
            table_version: facts.table_version,
            configured_peers: facts.configured_peers,
            capable_peers: facts.capable_peers,
            total_networks: facts.total_networks,
            total_paths: facts.total_paths,
            memory_used: facts.memory_used,
            number_attrs: facts.number_attrs,
            bytes_attrs: facts.bytes_attrs,
            number_paths: facts.number_paths,
            bytes_paths: facts.bytes_paths,
            number_communities: facts.number_communities,
            bytes_communities: facts.bytes_communities,
            number_cluster_list: facts.number_cluster_list,
            bytes_cluster_list: facts.bytes_cluster_list,
            dampening: facts.dampening,
            neighbors,
        }
    }
}

impl Summary {
    pub fn new(
        vrf_name: String,
        router_id: String,
        local_asn: u32,
        address_families: Vec<AddressFamily>,
    ) -> Self {
        Summary {
            vrf_name,
            router_id,
            local_asn,
            asn_class: classify_asn(local_asn),
            address_families,
        }
    }
}

fn path_diversity_ratio(total_paths: i64, total_networks: i64) -> f64 {
    if total_networks > 0 {
        total_paths as f64 / total_networks as f64
    } else {
        0.0
    }
}
