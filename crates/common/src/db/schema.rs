//! Explicit schema definition
//!
//! The `point` table is described here with sea-query statements rather than
//! derived from the row model, so the DDL is reviewable in one place.

use sea_orm::sea_query::{ColumnDef, Table, TableCreateStatement};
use sea_orm::ConnectionTrait;
use tracing::info;

use super::models::{PointColumn, PointEntity};
use crate::domain::TITLE_MAX_LEN;
use crate::errors::Result;

/// `CREATE TABLE IF NOT EXISTS point (...)`
pub fn create_point_table() -> TableCreateStatement {
    Table::create()
        .table(PointEntity)
        .if_not_exists()
        .col(
            ColumnDef::new(PointColumn::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(PointColumn::Title)
                .string_len(TITLE_MAX_LEN as u32)
                .not_null(),
        )
        .col(ColumnDef::new(PointColumn::Description).string().null())
        .to_owned()
}

/// Create every table that does not exist yet
pub async fn apply<C: ConnectionTrait>(conn: &C) -> Result<()> {
    let backend = conn.get_database_backend();
    conn.execute(backend.build(&create_point_table())).await?;

    info!("Database schema ready");
    Ok(())
}
