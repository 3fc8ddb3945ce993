//! Pure validators for the two stages.
//!
//! The wizard uses these to gate "Next" and "Submit". They never fail; an
//! invalid form just keeps the controls disabled.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// `local@domain.tld`: no whitespace, exactly one `@`, and a `.` in the
/// domain part.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

/// All four stage 1 fields are non-blank and the email is valid.
pub fn is_stage1_valid(full_name: &str, email: &str, department: &str, job_role: &str) -> bool {
    filled(full_name) && is_valid_email(email) && filled(department) && filled(job_role)
}

/// All four stage 2 fields are present and non-blank. A form with notes
/// but no photo is invalid, and vice versa.
pub fn is_stage2_valid(
    photo: Option<&str>,
    employment_type: Option<&str>,
    office_location: Option<&str>,
    notes: Option<&str>,
) -> bool {
    [photo, employment_type, office_location, notes]
        .into_iter()
        .all(|field| field.is_some_and(filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in ["jane@x.co", "a.b+tag@mail.example.com", "x@y.z"] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "not-an-email",
            "jane@",
            "@x.co",
            "jane@x",
            "jane doe@x.co",
            "jane@@x.co",
            "jane@x@y.co",
            " jane@x.co",
        ] {
            assert!(!is_valid_email(email), "{email:?} should be invalid");
        }
    }

    #[test]
    fn test_stage1_validation() {
        assert!(is_stage1_valid("Jane", "jane@x.co", "Eng", "Engineer"));
        assert!(!is_stage1_valid("Jane", "not-an-email", "Eng", "Engineer"));
        assert!(!is_stage1_valid("   ", "jane@x.co", "Eng", "Engineer"));
        assert!(!is_stage1_valid("Jane", "jane@x.co", "", "Engineer"));
        assert!(!is_stage1_valid("Jane", "jane@x.co", "Eng", " "));
    }

    #[test]
    fn test_stage2_requires_all_four_fields() {
        assert!(is_stage2_valid(
            Some("abc"),
            Some("Full-time"),
            Some("Berlin"),
            Some("hi")
        ));
        assert!(!is_stage2_valid(
            Some("abc"),
            Some("Full-time"),
            Some(""),
            Some("hi")
        ));
        assert!(!is_stage2_valid(
            None,
            Some("Full-time"),
            Some("Berlin"),
            Some("hi")
        ));
        assert!(!is_stage2_valid(
            Some("abc"),
            Some("Full-time"),
            Some("Berlin"),
            Some("  ")
        ));
        assert!(!is_stage2_valid(None, None, None, None));
    }
}
