use crate::error::GatewayError;

pub const MAX_OCCUPATION_ID_LENGTH: usize = 16;
pub const MAX_STATE_LENGTH: usize = 64;

/// State values the upstream API emits that never appear in any output.
pub const EXCLUDED_STATES: &[&str] = &["#null", "Puerto Rico"];

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, GatewayError> {
    if input.len() > max_len {
        return Err(GatewayError::Validation(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(GatewayError::Validation(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate the occupation code of a wage request. A missing code is an
/// error, never a default.
pub fn validate_occupation_id(input: Option<&str>) -> Result<String, GatewayError> {
    let raw = input.ok_or_else(|| {
        GatewayError::Validation("missing required parameter 'id'".to_string())
    })?;
    let id = sanitize_text(raw, MAX_OCCUPATION_ID_LENGTH)
        .map_err(|e| GatewayError::Validation(format!("invalid occupation id: {}", e)))?;
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(GatewayError::Validation(format!(
            "invalid occupation id '{}': only letters, digits and '-' are allowed",
            id
        )));
    }
    Ok(id)
}

/// Validate a full state name as used by the upstream API (e.g. "New York").
pub fn validate_state_name(input: &str) -> Result<String, GatewayError> {
    sanitize_text(input, MAX_STATE_LENGTH)
        .map_err(|e| GatewayError::Validation(format!("invalid state: {}", e)))
}

pub fn is_excluded_state(state: &str) -> bool {
    EXCLUDED_STATES.contains(&state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupation_id_valid() {
        assert_eq!(validate_occupation_id(Some("152011")).unwrap(), "152011");
        assert_eq!(validate_occupation_id(Some(" 11-1011 ")).unwrap(), "11-1011");
    }

    #[test]
    fn occupation_id_missing() {
        let err = validate_occupation_id(None).unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
        assert!(err.to_string().contains("'id'"));
    }

    #[test]
    fn occupation_id_blank() {
        assert!(validate_occupation_id(Some("")).is_err());
        assert!(validate_occupation_id(Some("   ")).is_err());
        assert!(validate_occupation_id(Some("\t\n")).is_err());
    }

    #[test]
    fn occupation_id_rejects_query_injection() {
        assert!(validate_occupation_id(Some("152011&limit=1")).is_err());
        assert!(validate_occupation_id(Some("15 2011")).is_err());
    }

    #[test]
    fn occupation_id_too_long() {
        assert!(validate_occupation_id(Some(&"1".repeat(17))).is_err());
    }

    #[test]
    fn state_name_trimmed() {
        assert_eq!(validate_state_name("  New York ").unwrap(), "New York");
    }

    #[test]
    fn state_name_empty() {
        assert!(validate_state_name("").is_err());
    }

    #[test]
    fn sentinel_states() {
        assert!(is_excluded_state("#null"));
        assert!(is_excluded_state("Puerto Rico"));
        assert!(!is_excluded_state("Texas"));
    }

    #[test]
    fn sanitize_strips_control_chars() {
        assert_eq!(sanitize_text("Ohio\u{0007}", 10).unwrap(), "Ohio");
    }
}
