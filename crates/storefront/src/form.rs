//! Shared checks for submission forms.

use saho_core::Email;

use crate::error::SubmissionError;

/// A trimmed, non-empty required field.
pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, SubmissionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(SubmissionError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// An optional field, with blank input treated as absent.
pub(crate) fn optional(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Parse the contact email, reporting an empty field as missing.
pub(crate) fn contact_email(value: &str) -> Result<Email, SubmissionError> {
    required("email", value)?;
    Ok(Email::parse(value)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("fullName", "  Awa Diop ").unwrap(), "Awa Diop");
        assert!(matches!(
            required("fullName", "   "),
            Err(SubmissionError::MissingField("fullName"))
        ));
    }

    #[test]
    fn test_optional_drops_blank_values() {
        let blank = " ".to_string();
        let city = "Dakar".to_string();
        assert_eq!(optional(Some(&blank)), None);
        assert_eq!(optional(Some(&city)), Some("Dakar"));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_contact_email() {
        assert!(matches!(contact_email(""), Err(SubmissionError::MissingField("email"))));
        assert!(matches!(contact_email("nope"), Err(SubmissionError::InvalidEmail(_))));
        assert_eq!(contact_email("awa@saho.sn").unwrap().as_str(), "awa@saho.sn");
    }
}
