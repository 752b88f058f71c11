//! SeaORM entity models
//!
//! Row models for the khreact schema

mod point;

pub use point::{
    Entity as PointEntity,
    Model as PointRow,
    ActiveModel as PointActiveModel,
    Column as PointColumn,
};
