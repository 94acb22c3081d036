use thiserror::Error;

/// Failures the projection engine reports to its caller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// One or more input fields violate a constraint
    #[error("invalid calculation input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    #[error("unknown battery strategy: {0}")]
    UnknownStrategy(String),

    #[error("no peak period supplied for battery strategy {0}")]
    MissingPeakPeriod(String),

    #[error("no Off-Peak period found among the supplied peak periods")]
    MissingOffPeakPeriod,
}

impl CalculationError {
    /// Lookup failures are the caller's server-side problem, not bad input
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            CalculationError::UnknownStrategy(_)
                | CalculationError::MissingPeakPeriod(_)
                | CalculationError::MissingOffPeakPeriod
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalculationError::InvalidInput(vec![
            "System cost must be positive".to_string(),
            "Loan term cannot be negative".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid calculation input: System cost must be positive; Loan term cannot be negative"
        );
        assert!(!err.is_lookup());

        let err = CalculationError::UnknownStrategy("triple-peak".to_string());
        assert_eq!(err.to_string(), "unknown battery strategy: triple-peak");
        assert!(err.is_lookup());
        assert!(CalculationError::MissingOffPeakPeriod.is_lookup());
    }
}
