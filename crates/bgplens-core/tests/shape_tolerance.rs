use bgplens_core::{Summary, summaries_from_json};
use serde_json::{Value, json};

fn neighbor() -> Value {
    json!({
        "neighborid": "10.0.0.2",
        "neighborversion": "4",
        "msgrecvd": "120",
        "msgsent": "118",
        "neighbortableversion": "9",
        "inq": "0",
        "outq": "0",
        "neighboras": "65001",
        "time": "P2DT3H",
        "state": "Established",
        "prefixreceived": "3"
    })
}

fn saf(neighbors: Value) -> Value {
    json!({
        "safi": "1",
        "af-name": "IPv4 Unicast",
        "tableversion": "9",
        "configuredpeers": "1",
        "capablepeers": "1",
        "totalnetworks": "5",
        "totalpaths": "5",
        "TABLE_neighbor": {"ROW_neighbor": neighbors}
    })
}

/// Build the same document, wrapping the row at `level` in an array when
/// `wrap` says so.
fn document(wrap: impl Fn(usize) -> bool) -> Value {
    let rows = |level: usize, row: Value| if wrap(level) { json!([row]) } else { row };
    let saf = saf(rows(4, neighbor()));
    let af = json!({"af-id": "1", "TABLE_saf": {"ROW_saf": rows(3, saf)}});
    let vrf = json!({
        "vrf-name-out": "default",
        "vrf-router-id": "10.0.0.1",
        "vrf-local-as": "65000",
        "TABLE_af": {"ROW_af": rows(2, af)}
    });
    json!({"TABLE_vrf": rows(0, json!({"ROW_vrf": rows(1, vrf)}))})
}

fn decode(value: &Value) -> Vec<Summary> {
    let raw = serde_json::to_vec(value).expect("serialize input");
    summaries_from_json(&raw).expect("decode summaries")
}

#[test]
fn bare_object_equals_single_element_array_at_every_level() {
    let all_objects = decode(&document(|_| false));
    let all_arrays = decode(&document(|_| true));
    assert_eq!(all_objects, all_arrays);

    for level in 0..5 {
        let mixed = decode(&document(|wrapped| wrapped == level));
        assert_eq!(mixed, all_objects, "array only at level {level}");
    }
}

#[test]
fn decoded_tree_is_complete() {
    let summaries = decode(&document(|level| level % 2 == 0));
    assert_eq!(summaries.len(), 1);
    let af = &summaries[0].address_families[0];
    assert_eq!(af.path_diversity_ratio, 1.0);
    let neighbor = &af.neighbors[0];
    assert_eq!(neighbor.neighbor_asn, 65_001);
    assert_eq!(
        neighbor.uptime_parsed.map(|uptime| uptime.total_seconds),
        Some(2 * 86_400 + 3 * 3_600)
    );
}

#[test]
fn empty_arrays_yield_empty_levels() {
    let raw = br#"{"TABLE_vrf": {"ROW_vrf": {
        "vrf-name-out": "default",
        "TABLE_af": {"ROW_af": []}
    }}}"#;
    let summaries = summaries_from_json(raw).expect("decode");
    assert!(summaries[0].address_families.is_empty());

    assert!(summaries_from_json(br#"{"TABLE_vrf": {"ROW_vrf": []}}"#).is_err());
}
