//! Repository pattern for point persistence
//!
//! The repository borrows any SeaORM connection, so the same code runs on the
//! pool directly or inside a transaction opened by the service layer.

use std::str::FromStr;

use crate::db::models::*;
use crate::domain::{Point, ENTITY_NAME};
use crate::errors::{AppError, Result};
use crate::pagination::{Direction, Page, PageRequest};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ConnectionTrait, DbErr, EntityTrait, Order, PaginatorTrait, QueryOrder, QuerySelect, Select,
};

impl From<PointRow> for Point {
    fn from(row: PointRow) -> Self {
        Point {
            id: Some(row.id),
            title: row.title,
            description: row.description,
        }
    }
}

/// Repository for point data access
pub struct PointRepository<'c, C: ConnectionTrait> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> PointRepository<'c, C> {
    /// Create a repository over the given connection or transaction
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// List points for one page, in the requested order.
    ///
    /// `id ASC` is appended as a tie-breaker so pages are stable.
    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<Point>> {
        let query = ordered(PointEntity::find(), request)?;
        let paginator = query.paginate(self.conn, request.size);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(request.page).await?;

        Ok(Page::new(
            rows.into_iter().map(Point::from).collect(),
            request,
            total,
        ))
    }

    /// Find point by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Point>> {
        Ok(PointEntity::find_by_id(id)
            .one(self.conn)
            .await?
            .map(Point::from))
    }

    /// Find point by ID, locking the row until the transaction ends
    pub async fn find_by_id_for_update(&self, id: i64) -> Result<Option<Point>> {
        Ok(PointEntity::find_by_id(id)
            .lock_exclusive()
            .one(self.conn)
            .await?
            .map(Point::from))
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let count = PointEntity::find_by_id(id).count(self.conn).await?;
        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        PointEntity::find().count(self.conn).await.map_err(Into::into)
    }

    /// Insert a transient point or overwrite a persisted one.
    ///
    /// Inserts let the database assign the id. Updating a row that does not
    /// exist is a `NotFound` error.
    pub async fn save(&self, point: Point) -> Result<Point> {
        match point.id {
            None => {
                let active = PointActiveModel {
                    id: NotSet,
                    title: Set(point.title),
                    description: Set(point.description),
                };
                let row = active.insert(self.conn).await?;
                Ok(row.into())
            }
            Some(id) => {
                let active = PointActiveModel {
                    id: Unchanged(id),
                    title: Set(point.title),
                    description: Set(point.description),
                };
                match active.update(self.conn).await {
                    Ok(row) => Ok(row.into()),
                    Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound {
                        resource_type: "Point".to_string(),
                        id: id.to_string(),
                    }),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    /// Delete point by ID; returns whether a row was removed
    pub async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = PointEntity::delete_by_id(id).exec(self.conn).await?;

        Ok(result.rows_affected > 0)
    }
}

fn ordered(mut query: Select<PointEntity>, request: &PageRequest) -> Result<Select<PointEntity>> {
    let mut sorted_by_id = false;

    for order in &request.sort {
        let column = PointColumn::from_str(&order.property).map_err(|_| {
            AppError::bad_request(
                format!("Unknown sort property: {}", order.property),
                ENTITY_NAME,
                "sortinvalid",
            )
        })?;
        sorted_by_id |= matches!(column, PointColumn::Id);

        let direction = match order.direction {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        };
        query = query.order_by(column, direction);
    }

    if !sorted_by_id {
        query = query.order_by_asc(PointColumn::Id);
    }

    Ok(query)
}
