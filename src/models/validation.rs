use serde::{Deserialize, Serialize};

/// Outcome of validating one input. `valid` is true iff `errors` is empty.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitized: Option<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn with_sanitized(mut self, sanitized: impl Into<String>) -> Self {
        self.sanitized = Some(sanitized.into());
        self
    }

    /// Union another result's messages into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.error(error);
        }
        self.warnings.extend(other.warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_invalidate() {
        let mut result = ValidationResult::new();
        result.warning("careful");
        assert!(result.valid);
        result.error("broken");
        assert!(!result.valid);
    }

    #[test]
    fn merge_unions_messages() {
        let mut left = ValidationResult::new();
        left.warning("w1");
        let mut right = ValidationResult::new();
        right.error("e1");
        right.warning("w2");
        left.merge(right);
        assert!(!left.valid);
        assert_eq!(left.errors, vec!["e1"]);
        assert_eq!(left.warnings, vec!["w1", "w2"]);
    }
}
