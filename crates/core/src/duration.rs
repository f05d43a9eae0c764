//! Human-readable duration parsing for interval and timeout settings.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration such as `10s`, `1m30s`, `1.5s`, `250us` or `2h`.
///
/// Components are `<number><unit>` and may be combined. The number may carry
/// a decimal fraction (`1.5`, `.5`). Units are `ns`, `us` (or `µs`), `ms`,
/// `s`, `m` and `h`. A bare integer is read as seconds. Returns `None` for
/// empty, negative or unparseable input.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok().map(Duration::from_secs);
    }

    let mut total: u128 = 0;
    let mut rest = s;

    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (frac, after) = match after.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after),
        };
        if whole.is_empty() && frac.is_empty() {
            return None;
        }

        let unit_end = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, tail) = after.split_at(unit_end);

        total = total.checked_add(component_nanos(whole, frac, unit_nanos(unit)?)?)?;
        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).ok()?;
    let nanos = u32::try_from(total % NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3_600 * NANOS_PER_SEC,
        _ => return None,
    };
    Some(nanos)
}

/// `whole.frac` scaled by `unit`, in nanoseconds. Fraction digits past the
/// eighteenth are ignored.
fn component_nanos(whole: &str, frac: &str, unit: u128) -> Option<u128> {
    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit)?;

    if !frac.is_empty() {
        let frac = &frac[..frac.len().min(18)];
        let value: u128 = frac.parse().ok()?;
        let scale = 10u128.pow(frac.len() as u32);
        nanos = nanos.checked_add(value * unit / scale)?;
    }

    Some(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seconds() {
        assert_eq!(parse_duration("10s"), Some(Duration::from_secs(10)));
    }

    #[test]
    fn parse_bare_integer_as_seconds() {
        assert_eq!(parse_duration("45"), Some(Duration::from_secs(45)));
        assert_eq!(parse_duration("0"), Some(Duration::ZERO));
    }

    #[test]
    fn parse_milliseconds() {
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
    }

    #[test]
    fn parse_combined() {
        assert_eq!(
            parse_duration("1h2m3s"),
            Some(Duration::from_secs(3_600 + 120 + 3))
        );
        assert_eq!(
            parse_duration("1m30s250ms"),
            Some(Duration::from_millis(90_250))
        );
    }

    #[test]
    fn parse_zero_with_unit() {
        assert_eq!(parse_duration("0s"), Some(Duration::ZERO));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_duration("  2m "), Some(Duration::from_secs(120)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration("10x"), None);
        assert_eq!(parse_duration("5m10"), None);
        assert_eq!(parse_duration("-5s"), None);
        assert_eq!(parse_duration("."), None);
        assert_eq!(parse_duration("1.5"), None);
        assert_eq!(parse_duration("1..5s"), None);
    }

    #[test]
    fn parse_fractional_components() {
        assert_eq!(parse_duration("1.5s"), Some(Duration::from_millis(1_500)));
        assert_eq!(parse_duration(".5s"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("2.5m"), Some(Duration::from_secs(150)));
        assert_eq!(
            parse_duration("1h0.5m"),
            Some(Duration::from_secs(3_600 + 30))
        );
    }

    #[test]
    fn parse_sub_millisecond_units() {
        assert_eq!(parse_duration("250us"), Some(Duration::from_micros(250)));
        assert_eq!(parse_duration("250µs"), Some(Duration::from_micros(250)));
        assert_eq!(parse_duration("42ns"), Some(Duration::from_nanos(42)));
        assert_eq!(
            parse_duration("1ms500us"),
            Some(Duration::from_micros(1_500))
        );
    }

    #[test]
    fn parse_rejects_overflow() {
        assert_eq!(parse_duration("99999999999999999999999999999999999999999h"), None);
    }
}
