//! Target well-formedness validation
//!
//! An audit target is either a URL or a business identity. Validation is
//! deliberately shallow — the engine never fetches the target, it only
//! refuses identifiers that cannot possibly name anything. Failure here is
//! fatal to the audit and surfaced before any probe is awaited.

use crate::error::AuditError;
use regex::Regex;
use std::sync::OnceLock;

const MAX_TARGET_LEN: usize = 2048;

fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // scheme://host[:port][/path] — host must look like a hostname
        Regex::new(r"^https?://[A-Za-z0-9][A-Za-z0-9.-]*(:\d{1,5})?(/\S*)?$")
            .expect("url pattern is valid")
    })
}

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // business identity: word-ish, allows spaces and light punctuation
        Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} .,'&()-]*$").expect("name pattern is valid")
    })
}

/// Validate a target identifier, returning the trimmed form.
pub fn validate_target(target: &str) -> Result<String, AuditError> {
    let trimmed = target.trim();

    let reject = |reason: &str| {
        Err(AuditError::InvalidTarget {
            target: target.to_string(),
            reason: reason.to_string(),
        })
    };

    if trimmed.is_empty() {
        return reject("empty target");
    }
    if trimmed.len() > MAX_TARGET_LEN {
        return reject("target too long");
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return reject("control characters in target");
    }

    if trimmed.contains("://") {
        if !url_pattern().is_match(trimmed) {
            return reject("not a valid http(s) URL");
        }
    } else if !name_pattern().is_match(trimmed) {
        return reject("not a URL or business name");
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        for target in [
            "https://example.com",
            "http://example.com/path?q=1",
            "https://sub.example.co.uk:8443/",
            "https://localhost:3000",
        ] {
            assert!(validate_target(target).is_ok(), "{target} rejected");
        }
    }

    #[test]
    fn test_valid_business_names() {
        for target in ["Joe's Plumbing & Heating", "Acme Corp.", "Café 42 (Downtown)"] {
            assert!(validate_target(target).is_ok(), "{target} rejected");
        }
    }

    #[test]
    fn test_invalid_targets() {
        for target in [
            "",
            "   ",
            "ftp://example.com",
            "https://",
            "http://bad host/",
            "evil\ntarget",
        ] {
            assert!(
                matches!(validate_target(target), Err(AuditError::InvalidTarget { .. })),
                "{target:?} accepted"
            );
        }
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(validate_target("  https://example.com  ").unwrap(), "https://example.com");
    }

    #[test]
    fn test_length_limit() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_TARGET_LEN));
        assert!(validate_target(&long).is_err());
    }
}
