//! Externally exposed shape of a point

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{TITLE_MAX_LEN, TITLE_MIN_LEN};

/// A DTO for the [`crate::domain::Point`] entity.
///
/// Every field is optional on the wire: a merge-patch body carries only the
/// fields it changes. Derived `PartialEq` compares all fields; entity identity
/// is [`PointDto::same_identity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PointDto {
    pub id: Option<i64>,

    #[validate(required, length(min = 5, max = 20))]
    pub title: Option<String>,

    pub description: Option<String>,
}

impl PointDto {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            description,
        }
    }

    /// Same rule as the entity: both ids present and equal
    pub fn same_identity(&self, other: &PointDto) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }

    /// Validation for merge-patch bodies: only fields that are present are
    /// checked, so a missing title is fine but a short one is not.
    pub fn validate_patch(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(title) = &self.title {
            let len = title.chars().count();
            if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
                errors.add("title", ValidationError::new("length"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_length_bounds() {
        assert!(PointDto::new("AAAAA", None).validate().is_ok());
        assert!(PointDto::new("A".repeat(20), None).validate().is_ok());
        assert!(PointDto::new("AAAA", None).validate().is_err());
        assert!(PointDto::new("A".repeat(21), None).validate().is_err());
    }

    #[test]
    fn test_title_counts_characters() {
        // 5 characters, 10 bytes
        assert!(PointDto::new("ééééé", None).validate().is_ok());
    }

    #[test]
    fn test_title_required() {
        let dto = PointDto {
            description: Some("no title".into()),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_patch_validation() {
        let only_description = PointDto {
            id: Some(1),
            title: None,
            description: Some("x".into()),
        };
        assert!(only_description.validate_patch().is_ok());

        let short_title = PointDto {
            id: Some(1),
            title: Some("abc".into()),
            description: None,
        };
        assert!(short_title.validate_patch().is_err());
    }

    #[test]
    fn test_identity() {
        let mut a = PointDto::new("AAAAAAAAAA", None);
        let mut b = PointDto::new("BBBBBBBBBB", None);
        assert!(!a.same_identity(&b));
        assert!(!a.same_identity(&a.clone()));

        a.id = Some(4);
        b.id = Some(4);
        assert!(a.same_identity(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_wire_format() {
        let dto: PointDto = serde_json::from_str(r#"{"title":"BBBBBBBBBB"}"#).unwrap();
        assert_eq!(dto.id, None);
        assert_eq!(dto.title.as_deref(), Some("BBBBBBBBBB"));
        assert_eq!(dto.description, None);

        let json = serde_json::to_value(PointDto {
            id: Some(3),
            title: Some("AAAAAAAAAA".into()),
            description: None,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "title": "AAAAAAAAAA", "description": null})
        );
    }
}
