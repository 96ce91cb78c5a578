use regex::Captures;

use super::layout;
use crate::formats::common::reader::lenient_i64;
use crate::{ESTABLISHED, NeighborFacts, parse_asn};

/// One transcript line, classified by pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    VrfHeader { vrf: &'a str, af_name: &'a str },
    RouterId { router_id: &'a str, local_asn: u32 },
    TableVersion { table_version: i64, configured: i64, capable: i64 },
    NetworkEntries { networks: i64, paths: i64, memory: i64 },
    AttributeEntries { count: i64, bytes: i64, path_count: i64, path_bytes: i64 },
    CommunityEntries { count: i64, bytes: i64, cluster_count: i64, cluster_bytes: i64 },
    Dampening(&'a str),
    NeighborHeader,
    Other(&'a str),
}

pub fn classify_line(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(caps) = layout::VRF_AF_HEADER.captures(line) {
        return Line::VrfHeader {
            vrf: text(&caps, "vrf"),
            af_name: text(&caps, "af"),
        };
    }
    if let Some(caps) = layout::ROUTER_ID.captures(line) {
        return Line::RouterId {
            router_id: text(&caps, "id"),
            local_asn: parse_asn(text(&caps, "asn")).unwrap_or(0),
        };
    }
    if let Some(caps) = layout::TABLE_VERSION.captures(line) {
        return Line::TableVersion {
            table_version: number(&caps, "version"),
            configured: number(&caps, "configured"),
            capable: number(&caps, "capable"),
        };
    }
    if let Some(caps) = layout::NETWORK_ENTRIES.captures(line) {
        return Line::NetworkEntries {
            networks: number(&caps, "networks"),
            paths: number(&caps, "paths"),
            memory: number(&caps, "memory"),
        };
    }
    if let Some(caps) = layout::ATTRIBUTE_ENTRIES.captures(line) {
        return Line::AttributeEntries {
            count: number(&caps, "count"),
            bytes: number(&caps, "bytes"),
            path_count: number(&caps, "path_count"),
            path_bytes: number(&caps, "path_bytes"),
        };
    }
    if let Some(caps) = layout::COMMUNITY_ENTRIES.captures(line) {
        return Line::CommunityEntries {
            count: number(&caps, "count"),
            bytes: number(&caps, "bytes"),
            cluster_count: number(&caps, "cluster_count"),
            cluster_bytes: number(&caps, "cluster_bytes"),
        };
    }
    if let Some(caps) = layout::DAMPENING.captures(line) {
        return Line::Dampening(text(&caps, "state"));
    }
    if layout::NEIGHBOR_HEADER.is_match(line) {
        return Line::NeighborHeader;
    }
    Line::Other(line)
}

fn text<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn number(caps: &Captures<'_>, name: &str) -> i64 {
    lenient_i64(text(caps, name))
}

/// Split a neighbor table row into facts.
///
/// Returns `None` for rows shorter than [`layout::NEIGHBOR_COLUMNS`]. An
/// integer in the tenth column is the prefix count of an established
/// session. Otherwise the tenth column onward is the FSM state text, so
/// `Idle (Admin)` stays whole.
pub fn neighbor_row(fields: &[&str]) -> Option<NeighborFacts> {
    if fields.len() < layout::NEIGHBOR_COLUMNS {
        return None;
    }
    let state_column = layout::NEIGHBOR_COLUMNS - 1;
    let (state, prefixes_received) = match fields[state_column].parse::<i64>() {
        Ok(prefixes) => (ESTABLISHED.to_string(), prefixes),
        Err(_) => (fields[state_column..].join(" "), 0),
    };

    Some(NeighborFacts {
        neighbor_id: fields[0].to_string(),
        neighbor_version: lenient_i64(fields[1]),
        neighbor_asn: parse_asn(fields[2]).unwrap_or(0),
        msg_received: lenient_i64(fields[3]),
        msg_sent: lenient_i64(fields[4]),
        neighbor_table_version: lenient_i64(fields[5]),
        in_queue_depth: lenient_i64(fields[6]),
        out_queue_depth: lenient_i64(fields[7]),
        uptime_raw: fields[8].to_string(),
        state,
        prefixes_received,
    })
}

#[cfg(test)]
mod tests {
    use super::{Line, classify_line, neighbor_row};

    #[test]
    fn classify_header_and_router() {
        assert_eq!(
            classify_line("BGP summary information for VRF default, address family IPv4 Unicast"),
            Line::VrfHeader {
                vrf: "default",
                af_name: "IPv4 Unicast"
            }
        );
        assert_eq!(
            classify_line("BGP router identifier 10.0.0.1, local AS number 1.10"),
            Line::RouterId {
                router_id: "10.0.0.1",
                local_asn: 65_546
            }
        );
    }

    #[test]
    fn classify_metadata() {
        assert_eq!(
            classify_line("BGP table version is 42, IPv4 Unicast config peers 3, capable peers 2"),
            Line::TableVersion {
                table_version: 42,
                configured: 3,
                capable: 2
            }
        );
        assert_eq!(
            classify_line("10 network entries and 15 paths using 2480 bytes of memory"),
            Line::NetworkEntries {
                networks: 10,
                paths: 15,
                memory: 2480
            }
        );
        assert_eq!(
            classify_line("BGP attribute entries [4/656], BGP AS path entries [2/14]"),
            Line::AttributeEntries {
                count: 4,
                bytes: 656,
                path_count: 2,
                path_bytes: 14
            }
        );
        assert_eq!(
            classify_line("BGP community entries [1/32], BGP clusterlist entries [0/0]"),
            Line::CommunityEntries {
                count: 1,
                bytes: 32,
                cluster_count: 0,
                cluster_bytes: 0
            }
        );
        assert_eq!(classify_line("Dampening disabled"), Line::Dampening("disabled"));
    }

    #[test]
    fn classify_table_header_blank_and_other() {
        assert_eq!(
            classify_line(
                "Neighbor        V    AS MsgRcvd MsgSent   TblVer  InQ OutQ Up/Down  State/PfxRcd"
            ),
            Line::NeighborHeader
        );
        assert_eq!(classify_line("   \r"), Line::Blank);
        assert_eq!(classify_line("10.0.0.2 4 65001"), Line::Other("10.0.0.2 4 65001"));
    }

    #[test]
    fn row_with_prefix_count_is_established() {
        let fields: Vec<&str> = "10.0.0.2 4 65001 120 118 42 0 3 4d22h 17"
            .split_whitespace()
            .collect();
        let facts = neighbor_row(&fields).unwrap();
        assert_eq!(facts.neighbor_id, "10.0.0.2");
        assert_eq!(facts.neighbor_asn, 65_001);
        assert_eq!(facts.out_queue_depth, 3);
        assert_eq!(facts.uptime_raw, "4d22h");
        assert_eq!(facts.state, "Established");
        assert_eq!(facts.prefixes_received, 17);
    }

    #[test]
    fn row_with_state_name() {
        let fields: Vec<&str> = "10.0.0.3 4 65002 0 0 0 0 0 never Idle (Admin)"
            .split_whitespace()
            .collect();
        let facts = neighbor_row(&fields).unwrap();
        assert_eq!(facts.state, "Idle (Admin)");
        assert_eq!(facts.prefixes_received, 0);
    }

    #[test]
    fn integer_tenth_column_ignores_trailing_tokens() {
        let fields: Vec<&str> = "10.0.0.5 4 65005 9 9 3 0 0 00:01:00 5 extra"
            .split_whitespace()
            .collect();
        assert_eq!(fields.len(), 11);
        let facts = neighbor_row(&fields).unwrap();
        assert_eq!(facts.state, "Established");
        assert_eq!(facts.prefixes_received, 5);
    }

    #[test]
    fn short_row_is_skipped() {
        let fields: Vec<&str> = "10.0.0.4 4 65003 1 1 0 0 0 never"
            .split_whitespace()
            .collect();
        assert!(neighbor_row(&fields).is_none());
    }
}
