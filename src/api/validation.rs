use super::ApiError;

/// Require a non-blank request field. The error names the missing field.
pub fn require_field(value: Option<&str>, name: &str) -> Result<String, ApiError> {
    let trimmed = value.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} is required", name)));
    }
    Ok(trimmed.to_string())
}

/// Require a positive record identifier.
pub fn require_id(value: Option<i32>, name: &str) -> Result<i32, ApiError> {
    match value {
        Some(id) if id > 0 => Ok(id),
        Some(id) => Err(ApiError::validation(format!(
            "Invalid {}: {}. ID must be a positive integer",
            name, id
        ))),
        None => Err(ApiError::validation(format!("{} is required", name))),
    }
}

/// Condition ratings are percentages bounded to [0, 100].
pub fn validate_condition_rating(rating: i32) -> Result<i32, ApiError> {
    if !(0..=100).contains(&rating) {
        return Err(ApiError::validation(format!(
            "Invalid conditionRating: {}. Rating must be between 0 and 100",
            rating
        )));
    }
    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some("Camry"), "model").unwrap(), "Camry");
        assert_eq!(require_field(Some("  Camry  "), "model").unwrap(), "Camry");
        assert!(require_field(Some(""), "model").is_err());
        assert!(require_field(Some("   "), "model").is_err());
        assert!(require_field(None, "model").is_err());
    }

    #[test]
    fn test_require_field_names_the_field() {
        let err = require_field(None, "partSearch").unwrap_err();
        assert!(err.to_string().contains("partSearch"));
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(Some(1), "userId").unwrap(), 1);
        assert_eq!(require_id(Some(12345), "userId").unwrap(), 12345);
        assert!(require_id(Some(0), "userId").is_err());
        assert!(require_id(Some(-1), "userId").is_err());
        assert!(require_id(None, "userId").is_err());
    }

    #[test]
    fn test_validate_condition_rating() {
        assert!(validate_condition_rating(0).is_ok());
        assert!(validate_condition_rating(85).is_ok());
        assert!(validate_condition_rating(100).is_ok());
        assert!(validate_condition_rating(101).is_err());
        assert!(validate_condition_rating(-1).is_err());
    }
}
