//! Domain entities
//!
//! In-memory representations of persisted records, independent of the ORM
//! row models in [`crate::db::models`].

mod point;

pub use point::{Point, ENTITY_NAME, TITLE_MAX_LEN, TITLE_MIN_LEN};
