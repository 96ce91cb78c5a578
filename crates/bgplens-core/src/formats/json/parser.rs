use serde_json::Value;
use tracing::{debug, trace};

use super::error::JsonError;
use super::layout::{
    RawAf, RawAfTable, RawNeighbor, RawNeighborTable, RawRoot, RawSaf, RawSafTable, RawVrf,
    RawVrfTable,
};
use super::reader::{Rows, shape_name};
use crate::formats::common::reader::address_family_ids;
use crate::{AddressFamily, AddressFamilyFacts, Neighbor, NeighborFacts, Summary};

/// Decode `show bgp all summary | json` output into one summary per VRF.
///
/// # Examples
/// ```
/// use bgplens_core::summaries_from_json;
///
/// let raw = br#"{"TABLE_vrf": {"ROW_vrf": {
///     "vrf-name-out": "default",
///     "vrf-router-id": "10.0.0.1",
///     "vrf-local-as": "65000",
///     "TABLE_af": {"ROW_af": {"af-id": "1", "TABLE_saf": {"ROW_saf": {
///         "safi": "1", "af-name": "IPv4 Unicast", "tableversion": "8",
///         "totalnetworks": "4", "totalpaths": "6"
///     }}}}
/// }}}"#;
/// let summaries = summaries_from_json(raw)?;
/// assert_eq!(summaries.len(), 1);
/// let af = &summaries[0].address_families[0];
/// assert_eq!(af.af_name, "IPv4 Unicast");
/// assert_eq!(af.path_diversity_ratio, 1.5);
/// # Ok::<(), bgplens_core::JsonError>(())
/// ```
pub fn summaries_from_json(raw: &[u8]) -> Result<Vec<Summary>, JsonError> {
    let value: Value = serde_json::from_slice(raw)?;
    if !value.is_object() {
        return Err(JsonError::NotAnObject {
            found: shape_name(&value),
        });
    }
    let root: RawRoot = serde_json::from_value(value)?;

    let summaries: Vec<Summary> = vrf_rows(root.vrf_tables).map(build_summary).collect();
    if summaries.is_empty() {
        return Err(JsonError::NoVrfData);
    }
    Ok(summaries)
}

fn vrf_rows(tables: Rows<RawVrfTable>) -> impl Iterator<Item = RawVrf> {
    tables.into_iter().flat_map(|table| table.rows)
}

fn af_rows(tables: Rows<RawAfTable>) -> impl Iterator<Item = RawAf> {
    tables.into_iter().flat_map(|table| table.rows)
}

fn saf_rows(tables: Rows<RawSafTable>) -> impl Iterator<Item = RawSaf> {
    tables.into_iter().flat_map(|table| table.rows)
}

fn neighbor_rows(tables: Rows<RawNeighborTable>) -> impl Iterator<Item = RawNeighbor> {
    tables.into_iter().flat_map(|table| table.rows)
}

fn build_summary(vrf: RawVrf) -> Summary {
    let local_asn = vrf.local_asn;
    let address_families: Vec<AddressFamily> = af_rows(vrf.af_tables)
        .flat_map(|af| build_address_families(af, local_asn))
        .collect();
    if address_families.is_empty() {
        debug!(vrf = %vrf.vrf_name, "VRF carries no address families");
    }
    Summary::new(vrf.vrf_name, vrf.router_id, local_asn, address_families)
}

fn build_address_families(af: RawAf, local_asn: u32) -> Vec<AddressFamily> {
    let af_id = af.af_id;
    let mut safs: Vec<RawSaf> = saf_rows(af.saf_tables).collect();
    if safs.is_empty() && af.inline.is_populated() {
        trace!(af_id, "address family row carries its SAFI inline");
        safs.push(af.inline);
    }
    safs.into_iter()
        .map(|saf| build_address_family(af_id, saf, local_asn))
        .collect()
}

fn build_address_family(af_id: i64, saf: RawSaf, local_asn: u32) -> AddressFamily {
    let (named_afi, named_safi) = address_family_ids(&saf.af_name);
    let table_version = saf.table_version;
    let neighbors = neighbor_rows(saf.neighbor_tables)
        .map(|row| Neighbor::new(neighbor_facts(row), table_version, local_asn))
        .collect();

    let facts = AddressFamilyFacts {
        af_id: if af_id != 0 { af_id } else { named_afi },
        safi: if saf.safi != 0 { saf.safi } else { named_safi },
        af_name: saf.af_name,
        table_version,
        configured_peers: saf.configured_peers,
        capable_peers: saf.capable_peers,
        total_networks: saf.total_networks,
        total_paths: saf.total_paths,
        memory_used: saf.memory_used,
        number_attrs: saf.number_attrs,
        bytes_attrs: saf.bytes_attrs,
        number_paths: saf.number_paths,
        bytes_paths: saf.bytes_paths,
        number_communities: saf.number_communities,
        bytes_communities: saf.bytes_communities,
        number_cluster_list: saf.number_cluster_list,
        bytes_cluster_list: saf.bytes_cluster_list,
        dampening: saf.dampening,
    };
    AddressFamily::new(facts, neighbors)
}

fn neighbor_facts(row: RawNeighbor) -> NeighborFacts {
    NeighborFacts {
        neighbor_id: row.neighbor_id,
        neighbor_asn: row.neighbor_asn,
        neighbor_version: row.neighbor_version,
        msg_received: row.msg_received,
        msg_sent: row.msg_sent,
        neighbor_table_version: row.neighbor_table_version,
        in_queue_depth: row.in_queue_depth,
        out_queue_depth: row.out_queue_depth,
        prefixes_received: row.prefixes_received,
        uptime_raw: row.uptime,
        state: row.state,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::summaries_from_json;
    use crate::{AsnClass, HealthStatus, JsonError, SessionType};

    fn decode(value: serde_json::Value) -> Result<Vec<crate::Summary>, JsonError> {
        summaries_from_json(value.to_string().as_bytes())
    }

    fn neighbor(id: &str, asn: &str, state: &str, prefixes: &str) -> serde_json::Value {
        json!({
            "neighborid": id,
            "neighborversion": "4",
            "msgrecvd": "120",
            "msgsent": "118",
            "neighbortableversion": "42",
            "inq": "0",
            "outq": "0",
            "neighboras": asn,
            "time": "P2W3D",
            "state": state,
            "prefixreceived": prefixes
        })
    }

    #[test]
    fn decodes_full_tree() {
        let summaries = decode(json!({
            "TABLE_vrf": {"ROW_vrf": [{
                "vrf-name-out": "default",
                "vrf-router-id": "10.0.0.1",
                "vrf-local-as": "65000",
                "TABLE_af": {"ROW_af": [{
                    "af-id": "1",
                    "TABLE_saf": {"ROW_saf": [{
                        "safi": "1",
                        "af-name": "IPv4 Unicast",
                        "tableversion": "42",
                        "configuredpeers": "2",
                        "capablepeers": "2",
                        "totalnetworks": "10",
                        "totalpaths": "15",
                        "memoryused": "4096",
                        "dampening": "Disabled",
                        "TABLE_neighbor": {"ROW_neighbor": [
                            neighbor("10.0.0.2", "65000", "Established", "6"),
                            neighbor("10.0.0.3", "65010", "Established", "4")
                        ]}
                    }]}
                }]}
            }]}
        }))
        .expect("decode");

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.router_id, "10.0.0.1");
        assert_eq!(summary.asn_class, AsnClass::Private);
        let af = &summary.address_families[0];
        assert_eq!((af.af_id, af.safi), (1, 1));
        assert_eq!(af.memory_used, 4096);
        assert_eq!(af.dampening, "Disabled");
        assert_eq!(af.path_diversity_ratio, 1.5);
        assert_eq!(af.neighbors.len(), 2);
        assert_eq!(af.neighbors[0].session_type, SessionType::Ibgp);
        assert_eq!(af.neighbors[1].session_type, SessionType::Ebgp);
        assert_eq!(af.neighbors[0].health_status, HealthStatus::Healthy);
        let uptime = af.neighbors[0].uptime_parsed.expect("uptime");
        assert_eq!(uptime.total_seconds, 17 * 86_400);
    }

    #[test]
    fn bare_objects_at_every_level() {
        let summaries = decode(json!({
            "TABLE_vrf": {"ROW_vrf": {
                "vrf-name-out": "default",
                "vrf-local-as": 65000,
                "TABLE_af": {"ROW_af": {
                    "af-id": 2,
                    "TABLE_saf": {"ROW_saf": {
                        "safi": 1,
                        "af-name": "IPv6 Unicast",
                        "TABLE_neighbor": {"ROW_neighbor":
                            neighbor("2001:db8::2", "65001", "Idle", "0")
                        }
                    }}
                }}
            }}
        }))
        .expect("decode");
        let af = &summaries[0].address_families[0];
        assert_eq!(af.af_id, 2);
        assert_eq!(af.neighbors.len(), 1);
        assert_eq!(af.neighbors[0].health_status, HealthStatus::Critical);
    }

    #[test]
    fn multiple_vrfs_keep_order() {
        let summaries = decode(json!({
            "TABLE_vrf": {"ROW_vrf": [
                {"vrf-name-out": "red", "vrf-local-as": "65000"},
                {"vrf-name-out": "blue", "vrf-local-as": "13335"}
            ]}
        }))
        .expect("decode");
        let names: Vec<_> = summaries.iter().map(|s| s.vrf_name.as_str()).collect();
        assert_eq!(names, vec!["red", "blue"]);
        assert_eq!(summaries[1].asn_class, AsnClass::Public);
        assert!(summaries[0].address_families.is_empty());
    }

    #[test]
    fn inline_safi_row_is_accepted() {
        let summaries = decode(json!({
            "TABLE_vrf": {"ROW_vrf": {
                "vrf-name-out": "default",
                "TABLE_af": {"ROW_af": {
                    "af-id": "1",
                    "af-name": "IPv4 Unicast",
                    "tableversion": "3",
                    "TABLE_neighbor": {"ROW_neighbor": neighbor("10.0.0.9", "65009", "Established", "2")}
                }}
            }}
        }))
        .expect("decode");
        let af = &summaries[0].address_families[0];
        assert_eq!(af.af_name, "IPv4 Unicast");
        assert_eq!(af.safi, 1);
        assert_eq!(af.table_version, 3);
        assert_eq!(af.neighbors[0].neighbor_id, "10.0.0.9");
    }

    #[test]
    fn several_safis_under_one_af() {
        let summaries = decode(json!({
            "TABLE_vrf": {"ROW_vrf": {
                "vrf-name-out": "default",
                "TABLE_af": {"ROW_af": {
                    "af-id": "1",
                    "TABLE_saf": {"ROW_saf": [
                        {"safi": "1", "af-name": "IPv4 Unicast"},
                        {"safi": "2", "af-name": "IPv4 Multicast"}
                    ]}
                }}
            }}
        }))
        .expect("decode");
        let afs = &summaries[0].address_families;
        assert_eq!(afs.len(), 2);
        assert_eq!((afs[1].af_id, afs[1].safi), (1, 2));
    }

    #[test]
    fn bad_numbers_default_to_zero() {
        let summaries = decode(json!({
            "TABLE_vrf": {"ROW_vrf": {
                "vrf-name-out": "default",
                "vrf-local-as": "not-an-asn",
                "TABLE_af": {"ROW_af": {"af-id": "1", "TABLE_saf": {"ROW_saf": {
                    "af-name": "IPv4 Unicast",
                    "totalnetworks": "lots",
                    "totalpaths": {"weird": true}
                }}}}
            }}
        }))
        .expect("decode");
        let summary = &summaries[0];
        assert_eq!(summary.local_asn, 0);
        let af = &summary.address_families[0];
        assert_eq!((af.total_networks, af.total_paths), (0, 0));
        assert_eq!(af.path_diversity_ratio, 0.0);
    }

    #[test]
    fn unrecognized_af_container_is_empty_not_fatal() {
        let summaries = decode(json!({
            "TABLE_vrf": {"ROW_vrf": {
                "vrf-name-out": "default",
                "TABLE_af": "unexpected"
            }}
        }))
        .expect("decode");
        assert!(summaries[0].address_families.is_empty());
    }

    #[test]
    fn empty_object_has_no_vrf_data() {
        assert!(matches!(decode(json!({})), Err(JsonError::NoVrfData)));
        assert!(matches!(
            decode(json!({"TABLE_vrf": {"ROW_vrf": []}})),
            Err(JsonError::NoVrfData)
        ));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = summaries_from_json(b"{\"TABLE_vrf\": ").unwrap_err();
        assert!(matches!(err, JsonError::Malformed(_)));
    }

    #[test]
    fn top_level_array_is_rejected() {
        let err = summaries_from_json(b"[]").unwrap_err();
        assert!(matches!(err, JsonError::NotAnObject { found: "an array" }));
    }
}
