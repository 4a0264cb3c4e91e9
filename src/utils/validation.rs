use once_cell::sync::Lazy;
use regex::Regex;

static ROLL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^7181\d{7}$").unwrap());
static MOBILE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+91[6-9]\d{9}$").unwrap());

/// Institutional roll numbers: 7181 followed by seven digits.
pub fn is_valid_roll(roll: &str) -> bool {
    ROLL_PATTERN.is_match(roll)
}

/// Prefixes +91 when missing and drops spaces.
pub fn normalize_mobile(mobile: &str) -> String {
    let compact: String = mobile.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.starts_with("+91") {
        compact
    } else {
        format!("+91{compact}")
    }
}

/// Indian mobile number in +91 form, starting with 6-9.
pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_PATTERN.is_match(mobile)
}

pub fn is_institution_email(email: &str, domain: &str) -> bool {
    email.len() > domain.len() && email.to_lowercase().ends_with(&domain.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_numbers() {
        assert!(is_valid_roll("71810010001"));
        assert!(!is_valid_roll("7181001000"));
        assert!(!is_valid_roll("81810010001"));
        assert!(!is_valid_roll("7181001000a"));
    }

    #[test]
    fn mobiles_are_normalized_before_validation() {
        assert_eq!(normalize_mobile("98765 43210"), "+919876543210");
        assert_eq!(normalize_mobile("+919876543210"), "+919876543210");
        assert!(is_valid_mobile(&normalize_mobile("9876543210")));
        assert!(!is_valid_mobile(&normalize_mobile("1876543210")));
        assert!(!is_valid_mobile(&normalize_mobile("98765")));
    }

    #[test]
    fn staff_emails_need_the_institution_domain() {
        assert!(is_institution_email("t1@srec.ac.in", "@srec.ac.in"));
        assert!(is_institution_email("T1@SREC.AC.IN", "@srec.ac.in"));
        assert!(!is_institution_email("t1@gmail.com", "@srec.ac.in"));
        assert!(!is_institution_email("@srec.ac.in", "@srec.ac.in"));
    }
}
