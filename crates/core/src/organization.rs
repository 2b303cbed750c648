//! Organizations (classes) and class-code handling.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a class code as handed out by teachers.
pub const MAX_CLASS_CODE_LEN: usize = 6;

/// A class or group that students join with a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    /// Stored uppercase.
    pub code: String,
    pub is_active: bool,
}

/// Normalize a user-entered class code: trim and uppercase.
///
/// Codes must be 1 to [`MAX_CLASS_CODE_LEN`] ASCII alphanumerics.
pub fn normalize_class_code(raw: &str) -> Result<String, CoreError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.is_empty() {
        return Err(CoreError::InvalidInput("Class code is required".into()));
    }
    if code.len() > MAX_CLASS_CODE_LEN {
        return Err(CoreError::InvalidInput(format!(
            "Class code must be at most {MAX_CLASS_CODE_LEN} characters"
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::InvalidInput(
            "Class code must contain only letters and digits".into(),
        ));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn code_is_trimmed_and_uppercased() {
        assert_eq!(normalize_class_code("  ab12x ").unwrap(), "AB12X");
    }

    #[test]
    fn empty_code_is_rejected() {
        assert_matches!(normalize_class_code("   "), Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn long_code_is_rejected() {
        assert_matches!(
            normalize_class_code("ABCDEFG"),
            Err(CoreError::InvalidInput(msg)) if msg.contains("at most 6")
        );
    }

    #[test]
    fn punctuation_is_rejected() {
        assert_matches!(normalize_class_code("AB-12"), Err(CoreError::InvalidInput(_)));
    }
}
