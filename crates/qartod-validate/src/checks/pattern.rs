use regex::Regex;

use super::CheckResult;

/// The regex already carries its anchoring, see `MatchMode`.
pub fn check_pattern(regex: &Regex, source: &str, value: &str) -> CheckResult {
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(format!("value does not match pattern {source}"))
    }
}
