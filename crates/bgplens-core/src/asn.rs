use std::ops::RangeInclusive;

use crate::AsnClass;

/// 16-bit private-use range (RFC 6996).
pub const PRIVATE_ASN_16: RangeInclusive<u32> = 64_512..=65_534;
/// 32-bit private-use range (RFC 6996).
pub const PRIVATE_ASN_32: RangeInclusive<u32> = 4_200_000_000..=4_294_967_294;

/// Classify an autonomous system number as private or public.
///
/// # Examples
/// ```
/// use bgplens_core::{AsnClass, classify_asn};
///
/// assert_eq!(classify_asn(65_000), AsnClass::Private);
/// assert_eq!(classify_asn(13_335), AsnClass::Public);
/// ```
pub fn classify_asn(asn: u32) -> AsnClass {
    if PRIVATE_ASN_16.contains(&asn) || PRIVATE_ASN_32.contains(&asn) {
        AsnClass::Private
    } else {
        AsnClass::Public
    }
}

/// Parse an ASN written in asplain (`65000`) or asdot (`1.10`) notation.
pub fn parse_asn(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.split_once('.') {
        Some((high, low)) => {
            let high: u16 = high.parse().ok()?;
            let low: u16 = low.parse().ok()?;
            Some((u32::from(high) << 16) | u32::from(low))
        }
        None => text.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_asn, parse_asn};
    use crate::AsnClass;

    #[test]
    fn private_16_bit_boundaries() {
        assert_eq!(classify_asn(64_511), AsnClass::Public);
        assert_eq!(classify_asn(64_512), AsnClass::Private);
        assert_eq!(classify_asn(65_534), AsnClass::Private);
        assert_eq!(classify_asn(65_535), AsnClass::Public);
    }

    #[test]
    fn private_32_bit_boundaries() {
        assert_eq!(classify_asn(4_199_999_999), AsnClass::Public);
        assert_eq!(classify_asn(4_200_000_000), AsnClass::Private);
        assert_eq!(classify_asn(4_294_967_294), AsnClass::Private);
        assert_eq!(classify_asn(u32::MAX), AsnClass::Public);
    }

    #[test]
    fn zero_is_public() {
        assert_eq!(classify_asn(0), AsnClass::Public);
    }

    #[test]
    fn parse_asplain_and_asdot() {
        assert_eq!(parse_asn("65000"), Some(65_000));
        assert_eq!(parse_asn(" 4200000001 "), Some(4_200_000_001));
        assert_eq!(parse_asn("1.10"), Some(65_546));
        assert_eq!(parse_asn("65535.65535"), Some(u32::MAX));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_asn(""), None);
        assert_eq!(parse_asn("AS65000"), None);
        assert_eq!(parse_asn("65536.1"), None);
        assert_eq!(parse_asn("4294967296"), None);
    }
}
