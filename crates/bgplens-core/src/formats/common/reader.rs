/// Parse an integer counter, truncating a fractional part and falling back
/// to `0` for anything unparseable.
pub(crate) fn lenient_i64(text: &str) -> i64 {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return value;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

/// `(afi, safi)` for a vendor address family label such as `IPv4 Unicast`.
/// Unknown parts map to `0`.
pub(crate) fn address_family_ids(af_name: &str) -> (i64, i64) {
    let lower = af_name.to_ascii_lowercase();
    let mut words = lower.split_whitespace();
    let family = words.next().unwrap_or("");
    let sub = words.next().unwrap_or("");

    let afi = match family {
        "ipv4" | "vpnv4" => 1,
        "ipv6" | "vpnv6" => 2,
        "l2vpn" => 25,
        _ => 0,
    };
    let safi = match (family, sub) {
        ("vpnv4" | "vpnv6", _) => 128,
        (_, "unicast") => 1,
        (_, "multicast") => 2,
        (_, "mvpn") => 5,
        (_, "evpn") => 70,
        (_, "labeled-unicast") => 4,
        _ => 0,
    };
    (afi, safi)
}
