//! Entity <-> DTO mapping

use crate::domain::Point;
use crate::errors::{AppError, Result};
use crate::service::PointDto;

/// Contract for converting between a DTO `D` and an entity `E`
pub trait EntityMapper<D, E> {
    fn to_entity(&self, dto: D) -> Result<E>;

    fn to_dto(&self, entity: E) -> D;

    /// Copy every field present in `dto` onto `entity`, leaving the rest
    /// untouched. Identifiers are never copied.
    fn partial_update(&self, entity: &mut E, dto: &D);

    fn to_entities(&self, dtos: Vec<D>) -> Result<Vec<E>> {
        dtos.into_iter().map(|dto| self.to_entity(dto)).collect()
    }

    fn to_dtos(&self, entities: Vec<E>) -> Vec<D> {
        entities.into_iter().map(|entity| self.to_dto(entity)).collect()
    }
}

/// Mapper for the entity [`Point`] and its DTO [`PointDto`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PointMapper;

impl EntityMapper<PointDto, Point> for PointMapper {
    fn to_entity(&self, dto: PointDto) -> Result<Point> {
        let title = dto.title.ok_or_else(|| AppError::MissingField {
            field: "title".to_string(),
        })?;

        Ok(Point {
            id: dto.id,
            title,
            description: dto.description,
        })
    }

    fn to_dto(&self, entity: Point) -> PointDto {
        PointDto {
            id: entity.id,
            title: Some(entity.title),
            description: entity.description,
        }
    }

    fn partial_update(&self, entity: &mut Point, dto: &PointDto) {
        if let Some(title) = &dto.title {
            entity.title = title.clone();
        }
        if let Some(description) = &dto.description {
            entity.description = Some(description.clone());
        }
    }
}
