//! Use-case layer: DTOs, entity mapping, and the point service

mod dto;
mod mapper;
mod point_service;

pub use dto::PointDto;
pub use mapper::{EntityMapper, PointMapper};
pub use point_service::PointService;
