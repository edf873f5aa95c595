use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

/// A single rejected field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Structured list of validation failures. A request fails as a whole:
/// nothing is persisted when this is non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationFailures(pub Vec<FieldError>);

impl ValidationFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Referential check: the supplied id was not in the target entity's
    /// id set.
    pub fn push_unknown_id(&mut self, field: &str, id: i32) {
        self.push(field, format!("{} {} does not exist", field, id));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut failures = Self::new();
        failures.push(field, message);
        failures
    }
}

impl fmt::Display for ValidationFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for ValidationFailures {
    fn from(errors: ValidationErrors) -> Self {
        let mut failures = ValidationFailures::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed {} check", error.code));
                failures.push(field, message);
            }
        }
        failures
    }
}

/// Phone numbers are stored as text but must be integer-valued.
pub fn digits_only(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        let mut error = ValidationError::new("digits_only");
        error.message = Some("Phone number must contain digits only".into());
        return Err(error);
    }
    Ok(())
}

/// Money columns (price, cost) must not be negative. The `validator` range
/// check only speaks f64, so decimals get their own check.
pub fn non_negative_decimal(value: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Amount must not be negative".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(custom = "super::digits_only")]
        phone: String,
    }

    #[test]
    fn collects_every_failed_field() {
        let probe = Probe {
            name: String::new(),
            phone: "12a4".into(),
        };
        let failures: ValidationFailures = probe.validate().unwrap_err().into();
        assert_eq!(failures.0.len(), 2);
        assert!(failures.0.iter().any(|e| e.field == "name"));
        assert!(failures.0.iter().any(|e| e.field == "phone"));
    }

    #[test]
    fn digits_only_accepts_leading_zero() {
        assert!(digits_only("0123456789").is_ok());
        assert!(digits_only("").is_err());
        assert!(digits_only("+12345").is_err());
    }

    #[test]
    fn decimal_check_rejects_negatives_only() {
        use rust_decimal_macros::dec;
        assert!(non_negative_decimal(&dec!(0)).is_ok());
        assert!(non_negative_decimal(&dec!(19.99)).is_ok());
        assert!(non_negative_decimal(&dec!(-0.01)).is_err());
    }

    #[test]
    fn display_joins_fields() {
        let mut failures = ValidationFailures::new();
        failures.push("quantity", "must not exceed available stock");
        failures.push_unknown_id("product_id", 9);
        let rendered = failures.to_string();
        assert!(rendered.contains("quantity: must not exceed available stock"));
        assert!(rendered.contains("product_id 9 does not exist"));
    }
}
