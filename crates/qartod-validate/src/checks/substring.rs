use super::{CheckResult, Row};

/// Characters `start..end` of `text`, clamped to its length.
pub fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

pub fn check_substring(
    row: &Row<'_>,
    column: &str,
    start: usize,
    end: usize,
    value: &str,
) -> CheckResult {
    let source = row.get(column).unwrap_or_default();
    let expected = char_slice(source, start, end);
    if value == expected {
        Ok(())
    } else {
        Err(format!(
            "expected '{expected}' (characters {start}..{end} of {column}), found '{value}'"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_designator_parts() {
        let designator = "CP01CNSM-RID27-04-DOSTAD000";
        assert_eq!(char_slice(designator, 0, 8), "CP01CNSM");
        assert_eq!(char_slice(designator, 9, 14), "RID27");
        assert_eq!(char_slice(designator, 18, 27), "DOSTAD000");
    }

    #[test]
    fn clamps_short_values() {
        assert_eq!(char_slice("CP01", 0, 8), "CP01");
        assert_eq!(char_slice("CP01", 9, 14), "");
        assert_eq!(char_slice("abc", 2, 1), "");
    }
}
