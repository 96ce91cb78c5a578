use std::sync::LazyLock;

use regex::Regex;

/// Number of whitespace-separated columns in a neighbor row.
pub const NEIGHBOR_COLUMNS: usize = 10;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("line pattern must compile")
}

pub static VRF_AF_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^BGP summary information for VRF (?P<vrf>[^,\s]+), address family (?P<af>.+?)\s*$")
});

pub static ROUTER_ID: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^BGP router identifier (?P<id>[^,\s]+), local AS number (?P<asn>\S+)")
});

pub static TABLE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"^BGP table version is (?P<version>\d+),.*config peers (?P<configured>\d+), capable peers (?P<capable>\d+)",
    )
});

pub static NETWORK_ENTRIES: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"^(?P<networks>\d+) network entries and (?P<paths>\d+) paths using (?P<memory>\d+) bytes of memory",
    )
});

pub static ATTRIBUTE_ENTRIES: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"^BGP attribute entries \[(?P<count>\d+)/(?P<bytes>\d+)\], BGP AS path entries \[(?P<path_count>\d+)/(?P<path_bytes>\d+)\]",
    )
});

pub static COMMUNITY_ENTRIES: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"^BGP community entries \[(?P<count>\d+)/(?P<bytes>\d+)\], BGP clusterlist entries \[(?P<cluster_count>\d+)/(?P<cluster_bytes>\d+)\]",
    )
});

pub static DAMPENING: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^Dampening (?P<state>\S+)"));

pub static NEIGHBOR_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^Neighbor\s+V\s+AS\s+MsgRcvd\s+MsgSent\s+TblVer\s+InQ\s+OutQ\s+Up/Down\s+State/PfxRcd")
});
