pub mod file_type;
pub mod report;
pub mod vocabulary;

pub use file_type::{Dialect, FileType};
pub use report::{Issue, IssueKind, Severity, TreeReport, ValidationReport};
pub use vocabulary::{DATA_LEVELS, LookupSet, Vocabularies, Vocabulary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts() {
        let mut report = ValidationReport::new(
            "ctdbp_qartod_gross_range_test_values.csv",
            FileType::GrossRange,
        );
        assert!(report.is_valid());
        report.push(Issue::field(2, "node", "SBD1", "does not match pattern"));
        report.push(Issue::column_count(3, 8, 7, "a,b,c"));
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 0);
        assert!(report.has_errors());
        assert_eq!(report.count_of(IssueKind::FieldFormatInvalid), 1);
    }

    #[test]
    fn report_serializes() {
        let mut report = ValidationReport::new("trend.csv", FileType::Trend);
        report.push(Issue::field(1, "TrendTest_nstd", "x", "not numeric"));
        let json = serde_json::to_string(&report).expect("serialize report");
        assert!(json.contains("\"file_type\":\"trend\""));
        assert!(json.contains("\"kind\":\"field_format_invalid\""));
        let round: ValidationReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round.issues, report.issues);
    }
}
