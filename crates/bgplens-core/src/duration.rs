//! Uptime normalization for vendor duration encodings.
//!
//! Two grammars are accepted, selected by the leading character:
//! - ISO-like (`P14W1D`, `P1DT2H3M4S`): weeks/days before `T`, hours,
//!   minutes and seconds after it.
//! - Compact (`4d22h`, `1w2d`, `00:01:02`): `w`/`d`/`h` tokens in any case,
//!   followed by an independent `HH:MM:SS` pass.
//!
//! Unknown tokens are skipped. A string in which no token is recognized
//! normalizes to `None`, the same as the `never` sentinel.

use tracing::debug;

use crate::Uptime;

const SECONDS_PER_WEEK: u64 = 604_800;
const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Sentinel printed by vendors for sessions that never came up.
pub const NEVER: &str = "never";

/// Normalize a vendor uptime string into a structured breakdown.
///
/// # Examples
/// ```
/// use bgplens_core::normalize_uptime;
///
/// let uptime = normalize_uptime("P14W1D").unwrap();
/// assert_eq!(uptime.weeks, 14);
/// assert_eq!(uptime.total_seconds, 8_553_600);
/// assert!(normalize_uptime("never").is_none());
/// ```
pub fn normalize_uptime(raw: &str) -> Option<Uptime> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(NEVER) {
        return None;
    }

    let parts = match raw.strip_prefix('P') {
        Some(rest) => parse_iso(rest),
        None => parse_compact(raw),
    };
    if !parts.matched {
        debug!(uptime = raw, "uptime matched neither grammar");
        return None;
    }
    Some(parts.into_uptime())
}

#[derive(Debug, Default)]
struct Parts {
    weeks: Option<u64>,
    days: Option<u64>,
    hours: Option<u64>,
    minutes: Option<u64>,
    seconds: Option<u64>,
    matched: bool,
}

impl Parts {
    /// First occurrence of a unit wins.
    fn set(slot: &mut Option<u64>, value: u64, matched: &mut bool) {
        if slot.is_none() {
            *slot = Some(value);
        }
        *matched = true;
    }

    fn into_uptime(self) -> Uptime {
        let weeks = self.weeks.unwrap_or(0);
        let days = self.days.unwrap_or(0);
        let hours = self.hours.unwrap_or(0);
        let minutes = self.minutes.unwrap_or(0);
        let seconds = self.seconds.unwrap_or(0);
        let total_seconds = weeks
            .saturating_mul(SECONDS_PER_WEEK)
            .saturating_add(days.saturating_mul(SECONDS_PER_DAY))
            .saturating_add(hours.saturating_mul(SECONDS_PER_HOUR))
            .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
            .saturating_add(seconds);
        Uptime {
            weeks,
            days,
            hours,
            minutes,
            seconds,
            total_seconds,
        }
    }
}

fn parse_iso(rest: &str) -> Parts {
    let mut parts = Parts::default();
    let (date, time) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };

    for (value, unit) in unit_tokens(date) {
        match unit {
            'W' => Parts::set(&mut parts.weeks, value, &mut parts.matched),
            'D' => Parts::set(&mut parts.days, value, &mut parts.matched),
            _ => {}
        }
    }
    if let Some(time) = time {
        for (value, unit) in unit_tokens(time) {
            match unit {
                'H' => Parts::set(&mut parts.hours, value, &mut parts.matched),
                'M' => Parts::set(&mut parts.minutes, value, &mut parts.matched),
                'S' => Parts::set(&mut parts.seconds, value, &mut parts.matched),
                _ => {}
            }
        }
    }
    parts
}

fn parse_compact(raw: &str) -> Parts {
    let mut parts = Parts::default();
    for (value, unit) in unit_tokens(raw) {
        match unit.to_ascii_lowercase() {
            'w' => Parts::set(&mut parts.weeks, value, &mut parts.matched),
            'd' => Parts::set(&mut parts.days, value, &mut parts.matched),
            'h' => Parts::set(&mut parts.hours, value, &mut parts.matched),
            _ => {}
        }
    }
    if let Some((hours, minutes, seconds)) = clock_triple(raw) {
        parts.hours = Some(hours);
        parts.minutes = Some(minutes);
        parts.seconds = Some(seconds);
        parts.matched = true;
    }
    parts
}

/// Yields `(number, unit)` pairs for every run of digits directly followed
/// by a letter. Digit runs that overflow `u64` are dropped.
fn unit_tokens(input: &str) -> impl Iterator<Item = (u64, char)> + '_ {
    let bytes = input.as_bytes();
    let mut pos = 0;
    std::iter::from_fn(move || {
        while pos < bytes.len() {
            if !bytes[pos].is_ascii_digit() {
                pos += 1;
                continue;
            }
            let start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            let Some(&unit) = bytes.get(pos) else {
                return None;
            };
            if !unit.is_ascii_alphabetic() {
                continue;
            }
            pos += 1;
            if let Ok(value) = input[start..pos - 1].parse::<u64>() {
                return Some((value, unit as char));
            }
        }
        None
    })
}

/// Finds the first `H:MM:SS` / `HH:MM:SS` group in the input.
fn clock_triple(input: &str) -> Option<(u64, u64, u64)> {
    input.split(|c: char| c.is_whitespace()).find_map(|word| {
        let mut fields = word.split(':');
        let hours = fields.next()?;
        let minutes = fields.next()?;
        let seconds = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        if ![hours, minutes, seconds].iter().all(|field| is_clock_field(field)) {
            return None;
        }
        Some((
            hours.parse().ok()?,
            minutes.parse().ok()?,
            seconds.parse().ok()?,
        ))
    })
}

fn is_clock_field(field: &str) -> bool {
    (1..=2).contains(&field.len()) && field.bytes().all(|b| b.is_ascii_digit())
}
