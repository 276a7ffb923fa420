use qartod_standards::NumericMode;

use super::CheckResult;

/// Optional leading `-`, at most one `.`, and at least one ASCII digit otherwise.
pub fn is_strict_number(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let digits: String = match unsigned.split_once('.') {
        Some((int, frac)) => {
            if frac.contains('.') {
                return false;
            }
            format!("{int}{frac}")
        }
        None => unsigned.to_string(),
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_lenient_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

pub fn check_numeric_or_empty(mode: NumericMode, value: &str) -> CheckResult {
    if value.is_empty() {
        return Ok(());
    }
    let ok = match mode {
        NumericMode::Strict => is_strict_number(value),
        NumericMode::Lenient => is_lenient_number(value),
    };
    if ok {
        Ok(())
    } else {
        Err("value is neither numeric nor empty".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_numbers() {
        for value in ["0", "-12.5", "12.", ".5", "-0.25", "100"] {
            assert!(is_strict_number(value), "{value}");
        }
        for value in ["1.2.3", "abc", "-", ".", "-.", "1e5", " 1", "+1", "--1", "nan"] {
            assert!(!is_strict_number(value), "{value}");
        }
    }

    #[test]
    fn lenient_accepts_float_syntax() {
        assert!(is_lenient_number(" 1e5 "));
        assert!(is_lenient_number("+1"));
        assert!(is_lenient_number("nan"));
        assert!(!is_lenient_number("1.2.3"));
    }

    #[test]
    fn empty_is_always_valid() {
        assert!(check_numeric_or_empty(NumericMode::Strict, "").is_ok());
        assert!(check_numeric_or_empty(NumericMode::Lenient, "").is_ok());
        assert!(check_numeric_or_empty(NumericMode::Strict, "abc").is_err());
    }
}
