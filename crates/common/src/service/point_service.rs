//! Service for managing points
//!
//! Every use case runs inside one storage transaction. Reads and writes of a
//! merge-patch share that transaction and the read takes a row lock, so no
//! other writer can interleave between them.

use tracing::debug;

use crate::db::{DbPool, PointRepository};
use crate::domain::ENTITY_NAME;
use crate::errors::{AppError, Result};
use crate::metrics::{record_point_read, record_point_write, PointOperation};
use crate::pagination::{Page, PageRequest};
use crate::service::{EntityMapper, PointDto, PointMapper};

/// Point use cases over a connection pool
#[derive(Clone)]
pub struct PointService {
    db: DbPool,
    mapper: PointMapper,
}

impl PointService {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            mapper: PointMapper,
        }
    }

    /// Save a point.
    ///
    /// A DTO without id is inserted and comes back with its assigned id.
    pub async fn save(&self, dto: PointDto) -> Result<PointDto> {
        debug!(point = ?dto, "Request to save Point");
        let operation = if dto.id.is_some() {
            PointOperation::Updated
        } else {
            PointOperation::Created
        };

        let point = self.mapper.to_entity(dto)?;

        let txn = self.db.begin().await?;
        let saved = PointRepository::new(&txn).save(point).await?;
        txn.commit().await?;

        record_point_write(operation);
        Ok(self.mapper.to_dto(saved))
    }

    /// Update a point, replacing every field.
    ///
    /// The row is locked before it is overwritten; when no row has the DTO's
    /// id the result is an `idnotfound` bad request.
    pub async fn update(&self, dto: PointDto) -> Result<PointDto> {
        debug!(point = ?dto, "Request to update Point");
        let id = dto
            .id
            .ok_or_else(|| AppError::bad_request("Invalid id", ENTITY_NAME, "idnull"))?;

        let point = self.mapper.to_entity(dto)?;

        let txn = self.db.begin().await?;
        let repo = PointRepository::new(&txn);

        if repo.find_by_id_for_update(id).await?.is_none() {
            txn.rollback().await?;
            return Err(id_not_found());
        }
        let saved = match repo.save(point).await {
            Err(AppError::NotFound { .. }) => return Err(id_not_found()),
            other => other?,
        };
        txn.commit().await?;

        record_point_write(PointOperation::Updated);
        Ok(self.mapper.to_dto(saved))
    }

    /// Partially update a point: only fields present in the DTO change.
    ///
    /// Returns `None` when no row has the DTO's id.
    pub async fn partial_update(&self, dto: PointDto) -> Result<Option<PointDto>> {
        debug!(point = ?dto, "Request to partially update Point");
        let id = dto
            .id
            .ok_or_else(|| AppError::bad_request("Invalid id", ENTITY_NAME, "idnull"))?;

        let txn = self.db.begin().await?;
        let repo = PointRepository::new(&txn);

        let Some(mut existing) = repo.find_by_id_for_update(id).await? else {
            txn.rollback().await?;
            return Ok(None);
        };
        self.mapper.partial_update(&mut existing, &dto);
        let saved = repo.save(existing).await?;
        txn.commit().await?;

        record_point_write(PointOperation::Patched);
        Ok(Some(self.mapper.to_dto(saved)))
    }

    /// Get one page of points
    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<PointDto>> {
        debug!(page = request.page, size = request.size, "Request to get all Points");

        let txn = self.db.begin().await?;
        let page = PointRepository::new(&txn).find_all(request).await?;
        txn.commit().await?;

        record_point_read("page");
        Ok(page.map(|point| self.mapper.to_dto(point)))
    }

    /// Get the point with the given id
    pub async fn find_one(&self, id: i64) -> Result<Option<PointDto>> {
        debug!(id, "Request to get Point");

        let txn = self.db.begin().await?;
        let point = PointRepository::new(&txn).find_by_id(id).await?;
        txn.commit().await?;

        record_point_read("one");
        Ok(point.map(|p| self.mapper.to_dto(p)))
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let exists = PointRepository::new(&txn).exists_by_id(id).await?;
        txn.commit().await?;

        Ok(exists)
    }

    /// Delete the point with the given id. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: i64) -> Result<()> {
        debug!(id, "Request to delete Point");

        let txn = self.db.begin().await?;
        let removed = PointRepository::new(&txn).delete_by_id(id).await?;
        txn.commit().await?;

        if removed {
            record_point_write(PointOperation::Deleted);
        }
        Ok(())
    }
}

fn id_not_found() -> AppError {
    AppError::bad_request("Entity not found", ENTITY_NAME, "idnotfound")
}
