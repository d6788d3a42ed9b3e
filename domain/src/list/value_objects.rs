//! List value objects

use crate::core::error::DomainError;

/// A normalized share code (Value Object)
///
/// Invite codes are short alphanumeric tokens. Users paste them with
/// stray whitespace and arbitrary casing, so construction trims and
/// uppercases before validating.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareCode(String);

impl ShareCode {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::Validation("share code is empty".to_string()));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::Validation(format!(
                "share code contains invalid characters: {code}"
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShareCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
