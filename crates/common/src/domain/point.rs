//! Point entity

use std::fmt;

/// Name used for points in error details and alert headers
pub const ENTITY_NAME: &str = "point";

/// Minimum title length, in characters
pub const TITLE_MIN_LEN: usize = 5;

/// Maximum title length, in characters
pub const TITLE_MAX_LEN: usize = 20;

/// A Point.
///
/// Transient while `id` is `None`; the storage layer assigns the id on first
/// save and it never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Point {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
}

impl Point {
    /// Create a transient point
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description,
        }
    }

    /// Whether the storage layer has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Entity identity: both ids present and equal.
    ///
    /// A transient point is never the same entity as anything, itself
    /// included.
    pub fn same_identity(&self, other: &Point) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point{{id=")?;
        match self.id {
            Some(id) => write!(f, "{}", id)?,
            None => write!(f, "null")?,
        }
        write!(
            f,
            ", title='{}', description='{}'}}",
            self.title,
            self.description.as_deref().unwrap_or("null")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_by_id_only() {
        let mut a = Point::new("AAAAAAAAAA", None);
        let mut b = Point::new("BBBBBBBBBB", Some("other".into()));
        a.id = Some(1);
        b.id = Some(1);
        assert!(a.same_identity(&b));

        b.id = Some(2);
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn test_transient_points_never_match() {
        let a = Point::new("AAAAAAAAAA", None);
        assert!(!a.same_identity(&a));
        assert!(!a.same_identity(&a.clone()));

        let mut persisted = a.clone();
        persisted.id = Some(7);
        assert!(!a.same_identity(&persisted));
        assert!(!persisted.same_identity(&a));
    }

    #[test]
    fn test_lifecycle() {
        let mut point = Point::new("AAAAAAAAAA", None);
        assert!(!point.is_persisted());
        point.id = Some(3);
        assert!(point.is_persisted());
    }

    #[test]
    fn test_display() {
        let mut point = Point::new("AAAAAAAAAA", Some("desc".into()));
        point.id = Some(5);
        assert_eq!(
            point.to_string(),
            "Point{id=5, title='AAAAAAAAAA', description='desc'}"
        );
    }
}
