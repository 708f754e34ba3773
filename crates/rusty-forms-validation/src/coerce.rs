//! Number coercion with browser semantics
//!
//! Form values arrive as strings. The number predicates compare them the way
//! a browser script would: `to_number` mirrors `Number(x)`, and the two prefix
//! parsers mirror `parseInt(x, 10)` and `parseFloat(x)`.

/// Strict conversion of a whole string to a number; `NaN` when it is not one.
pub fn to_number(input: &str) -> f64 {
    let s = input.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // f64::from_str also accepts "inf" and "nan", which are not numbers here
    let numeric = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !numeric {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Leading integer of a string, ignoring whatever follows it.
pub fn parse_int_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign_len..]);

    if digits == 0 {
        return None;
    }

    s[..sign_len + digits].parse::<f64>().ok()
}

/// Leading decimal literal of a string, ignoring whatever follows it.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[sign_len..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let mut end = sign_len;
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42.0)]
    #[case("  -3.5 ", -3.5)]
    #[case("1e3", 1000.0)]
    #[case("0x1F", 31.0)]
    #[case("", 0.0)]
    #[case("+Infinity", f64::INFINITY)]
    fn test_to_number(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(to_number(input), expected);
    }

    #[rstest]
    #[case("12abc")]
    #[case("inf")]
    #[case("NaN")]
    #[case("1e")]
    #[case(".")]
    #[case("0x")]
    fn test_to_number_rejects(#[case] input: &str) {
        assert!(to_number(input).is_nan());
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("12abc"), Some(12.0));
        assert_eq!(parse_int_prefix("-7.9"), Some(-7.0));
        assert_eq!(parse_int_prefix("1e3"), Some(1.0));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("3.25kg"), Some(3.25));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e+"), Some(1.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("x1"), None);
    }
}
