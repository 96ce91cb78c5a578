//! Wire shape of `show bgp all summary | json`.
//!
//! Every container is a [`Rows`] so each level tolerates object-or-array.
//! Scalars go through the lenient readers and never fail decoding.

use serde::Deserialize;

use super::reader::{Rows, lenient_asn, lenient_i64, lenient_string};

#[derive(Debug, Default, Deserialize)]
pub struct RawRoot {
    #[serde(rename = "TABLE_vrf", default)]
    pub vrf_tables: Rows<RawVrfTable>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawVrfTable {
    #[serde(rename = "ROW_vrf", default)]
    pub rows: Rows<RawVrf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawVrf {
    #[serde(rename = "vrf-name-out", default, deserialize_with = "lenient_string")]
    pub vrf_name: String,
    #[serde(rename = "vrf-router-id", default, deserialize_with = "lenient_string")]
    pub router_id: String,
    #[serde(rename = "vrf-local-as", default, deserialize_with = "lenient_asn")]
    pub local_asn: u32,
    #[serde(rename = "TABLE_af", default)]
    pub af_tables: Rows<RawAfTable>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAfTable {
    #[serde(rename = "ROW_af", default)]
    pub rows: Rows<RawAf>,
}

/// Address family row. Counters normally live one level down in
/// `TABLE_saf`; some releases inline a single SAFI into the row itself,
/// which `inline` captures.
#[derive(Debug, Default, Deserialize)]
pub struct RawAf {
    #[serde(rename = "af-id", default, deserialize_with = "lenient_i64")]
    pub af_id: i64,
    #[serde(rename = "TABLE_saf", default)]
    pub saf_tables: Rows<RawSafTable>,
    #[serde(flatten)]
    pub inline: RawSaf,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSafTable {
    #[serde(rename = "ROW_saf", default)]
    pub rows: Rows<RawSaf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSaf {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub safi: i64,
    #[serde(rename = "af-name", default, deserialize_with = "lenient_string")]
    pub af_name: String,
    #[serde(rename = "tableversion", default, deserialize_with = "lenient_i64")]
    pub table_version: i64,
    #[serde(rename = "configuredpeers", default, deserialize_with = "lenient_i64")]
    pub configured_peers: i64,
    #[serde(rename = "capablepeers", default, deserialize_with = "lenient_i64")]
    pub capable_peers: i64,
    #[serde(rename = "totalnetworks", default, deserialize_with = "lenient_i64")]
    pub total_networks: i64,
    #[serde(rename = "totalpaths", default, deserialize_with = "lenient_i64")]
    pub total_paths: i64,
    #[serde(rename = "memoryused", default, deserialize_with = "lenient_i64")]
    pub memory_used: i64,
    #[serde(rename = "numberattrs", default, deserialize_with = "lenient_i64")]
    pub number_attrs: i64,
    #[serde(rename = "bytesattrs", default, deserialize_with = "lenient_i64")]
    pub bytes_attrs: i64,
    #[serde(rename = "numberpaths", default, deserialize_with = "lenient_i64")]
    pub number_paths: i64,
    #[serde(rename = "bytespaths", default, deserialize_with = "lenient_i64")]
    pub bytes_paths: i64,
    #[serde(rename = "numbercommunities", default, deserialize_with = "lenient_i64")]
    pub number_communities: i64,
    #[serde(rename = "bytescommunities", default, deserialize_with = "lenient_i64")]
    pub bytes_communities: i64,
    #[serde(rename = "numberclusterlist", default, deserialize_with = "lenient_i64")]
    pub number_cluster_list: i64,
    #[serde(rename = "bytesclusterlist", default, deserialize_with = "lenient_i64")]
    pub bytes_cluster_list: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dampening: String,
    #[serde(rename = "TABLE_neighbor", default)]
    pub neighbor_tables: Rows<RawNeighborTable>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawNeighborTable {
    #[serde(rename = "ROW_neighbor", default)]
    pub rows: Rows<RawNeighbor>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawNeighbor {
    #[serde(rename = "neighborid", default, deserialize_with = "lenient_string")]
    pub neighbor_id: String,
    #[serde(rename = "neighborversion", default, deserialize_with = "lenient_i64")]
    pub neighbor_version: i64,
    #[serde(rename = "msgrecvd", default, deserialize_with = "lenient_i64")]
    pub msg_received: i64,
    #[serde(rename = "msgsent", default, deserialize_with = "lenient_i64")]
    pub msg_sent: i64,
    #[serde(rename = "neighbortableversion", default, deserialize_with = "lenient_i64")]
    pub neighbor_table_version: i64,
    #[serde(rename = "inq", default, deserialize_with = "lenient_i64")]
    pub in_queue_depth: i64,
    #[serde(rename = "outq", default, deserialize_with = "lenient_i64")]
    pub out_queue_depth: i64,
    #[serde(rename = "neighboras", default, deserialize_with = "lenient_asn")]
    pub neighbor_asn: u32,
    #[serde(rename = "time", default, deserialize_with = "lenient_string")]
    pub uptime: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(rename = "prefixreceived", default, deserialize_with = "lenient_i64")]
    pub prefixes_received: i64,
}

impl RawSaf {
    /// Whether an inlined SAFI actually carries address family data.
    pub fn is_populated(&self) -> bool {
        !self.af_name.is_empty() || !self.neighbor_tables.is_empty()
    }
}
