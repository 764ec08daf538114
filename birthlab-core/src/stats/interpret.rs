//! Human-readable verdicts for comparison results.

use super::compare::ComparisonResult;
use super::error::StatsError;

/// How numbers are printed in verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictFormat {
    /// Fixed decimals for alpha; `None` prints the shortest exact form (`0.05`).
    pub alpha_decimals: Option<usize>,
}

impl VerdictFormat {
    pub fn format_alpha(&self, alpha: f64) -> String {
        match self.alpha_decimals {
            Some(decimals) => format!("{alpha:.decimals$}"),
            None => format!("{alpha}"),
        }
    }
}

/// One-sentence verdict: p-value with 4 decimals, alpha per `format`.
pub fn interpret(result: &ComparisonResult, format: &VerdictFormat) -> Result<String, StatsError> {
    result.validate()?;
    let p = result.p_value;
    let alpha = format.format_alpha(result.alpha);
    Ok(if result.significant {
        format!("Statistically significant (p = {p:.4} < α = {alpha}). Reject the null hypothesis.")
    } else {
        format!(
            "Not statistically significant (p = {p:.4} ≥ α = {alpha}). Fail to reject the null hypothesis."
        )
    })
}

pub fn interpret_default(result: &ComparisonResult) -> Result<String, StatsError> {
    interpret(result, &VerdictFormat::default())
}

/// Verdict followed by the group means, t statistic and p-value.
pub fn report(result: &ComparisonResult, format: &VerdictFormat) -> Result<Vec<String>, StatsError> {
    let verdict = interpret(result, format)?;
    Ok(vec![
        verdict,
        format!(
            "Group {} mean: {:.2} (n = {})",
            result.group1, result.group1_mean, result.n1
        ),
        format!(
            "Group {} mean: {:.2} (n = {})",
            result.group2, result.group2_mean, result.n2
        ),
        format!(
            "T-statistic: {:.4} (df = {:.2}, {}, {} variance)",
            result.t_statistic, result.degrees_of_freedom, result.alternative, result.variance
        ),
        format!("P-value: {:.4}", result.p_value),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compare::{Alternative, VarianceAssumption};

    fn result(p_value: f64, alpha: f64) -> ComparisonResult {
        ComparisonResult {
            group1_mean: 11.5,
            group2_mean: 20.5,
            t_statistic: -2.7,
            p_value,
            significant: p_value < alpha,
            alpha,
            group1: "DE".into(),
            group2: "FR".into(),
            n1: 4,
            n2: 4,
            degrees_of_freedom: 6.0,
            alternative: Alternative::TwoSided,
            variance: VarianceAssumption::Pooled,
        }
    }

    #[test]
    fn significant_verdict_rejects_null() {
        let text = interpret_default(&result(0.0123, 0.05)).unwrap();
        assert!(text.contains("0.0123"));
        assert!(text.contains("0.05"));
        assert!(text.contains("Reject the null hypothesis"));
        assert!(!text.contains("Fail to reject"));
    }

    #[test]
    fn non_significant_verdict_fails_to_reject() {
        let text = interpret_default(&result(0.2, 0.05)).unwrap();
        assert!(text.contains("p = 0.2000"));
        assert!(text.contains("Fail to reject the null hypothesis"));
    }

    #[test]
    fn p_equal_to_alpha_is_not_significant() {
        let text = interpret_default(&result(0.05, 0.05)).unwrap();
        assert!(text.starts_with("Not statistically significant"));
    }

    #[test]
    fn alpha_decimals_are_configurable() {
        let format = VerdictFormat {
            alpha_decimals: Some(3),
        };
        let text = interpret(&result(0.0123, 0.05), &format).unwrap();
        assert!(text.contains("α = 0.050"));
    }

    #[test]
    fn inconsistent_flag_is_malformed() {
        let mut bad = result(0.0123, 0.05);
        bad.significant = false;
        assert!(matches!(
            interpret_default(&bad).unwrap_err(),
            StatsError::MalformedResult(_)
        ));
    }

    #[test]
    fn nan_p_value_is_malformed() {
        let mut bad = result(0.5, 0.05);
        bad.p_value = f64::NAN;
        bad.significant = false;
        assert!(matches!(
            interpret_default(&bad).unwrap_err(),
            StatsError::MalformedResult(_)
        ));
    }

    #[test]
    fn report_lists_details() {
        let lines = report(&result(0.0123, 0.05), &VerdictFormat::default()).unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("Group DE mean: 11.50"));
        assert!(lines[2].contains("Group FR mean: 20.50"));
        assert!(lines[3].starts_with("T-statistic: -2.7000"));
        assert_eq!(lines[4], "P-value: 0.0123");
    }
}
