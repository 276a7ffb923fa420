use qartod_model::{Vocabularies, Vocabulary};

use super::CheckResult;

pub fn check_member(
    vocabularies: &Vocabularies,
    vocabulary: Vocabulary,
    value: &str,
) -> CheckResult {
    if vocabularies.contains(vocabulary, value) {
        Ok(())
    } else {
        Err(format!("value is not one of the known {vocabulary}"))
    }
}
