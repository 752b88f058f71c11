//! Point REST handlers
//!
//! `/api/points` collection and `/api/points/{id}` item endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    Json,
};
use validator::Validate;

use crate::headers::pagination_headers;
use crate::AppState;
use khreact_common::{
    alert,
    domain::ENTITY_NAME,
    errors::{AppError, Result},
    pagination::PageRequest,
    service::PointDto,
};

/// Create a new point
pub async fn create_point(
    State(state): State<AppState>,
    body: std::result::Result<Json<PointDto>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<PointDto>)> {
    let Json(dto) = body.map_err(invalid_body)?;
    tracing::debug!(point = ?dto, "REST request to save Point");

    dto.validate()?;
    if dto.id.is_some() {
        return Err(AppError::bad_request(
            "A new point cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let saved = state.points.save(dto).await?;
    let id = saved.id.ok_or_else(|| AppError::Internal {
        message: "saved point has no id".to_string(),
    })?;

    let mut headers = alert::entity_created(ENTITY_NAME, &id.to_string());
    if let Ok(location) = HeaderValue::from_str(&format!("/api/points/{}", id)) {
        headers.insert(header::LOCATION, location);
    }

    tracing::info!(point_id = id, "Point created");

    Ok((StatusCode::CREATED, headers, Json(saved)))
}

/// Replace every field of an existing point
pub async fn update_point(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<PointDto>, JsonRejection>,
) -> Result<(HeaderMap, Json<PointDto>)> {
    let Path(id) = path.map_err(invalid_path)?;
    let Json(dto) = body.map_err(invalid_body)?;
    tracing::debug!(id, point = ?dto, "REST request to update Point");

    dto.validate()?;
    check_body_id(id, &dto)?;

    let updated = state.points.update(dto).await?;

    Ok((
        alert::entity_updated(ENTITY_NAME, &id.to_string()),
        Json(updated),
    ))
}

/// Merge-patch an existing point: only fields present in the body change
pub async fn partial_update_point(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<PointDto>, JsonRejection>,
) -> Result<(HeaderMap, Json<PointDto>)> {
    let Path(id) = path.map_err(invalid_path)?;
    let Json(dto) = body.map_err(invalid_body)?;
    tracing::debug!(id, point = ?dto, "REST request to partial update Point");

    check_body_id(id, &dto)?;
    dto.validate_patch()?;

    let updated = state
        .points
        .partial_update(dto)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok((
        alert::entity_updated(ENTITY_NAME, &id.to_string()),
        Json(updated),
    ))
}

/// List one page of points, with `X-Total-Count` and `Link` headers
pub async fn list_points(
    State(state): State<AppState>,
    uri: Uri,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<(HeaderMap, Json<Vec<PointDto>>)> {
    let Query(params) = query.map_err(|e| AppError::InvalidFormat {
        message: e.body_text(),
    })?;
    let request = PageRequest::from_query(&params, &state.config.pagination)?;
    tracing::debug!(page = request.page, size = request.size, "REST request to get a page of Points");

    let page = state.points.find_all(&request).await?;
    let headers = pagination_headers(&uri, &page);

    Ok((headers, Json(page.content)))
}

/// Get a point by ID
pub async fn get_point(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<PointDto>> {
    let Path(id) = path.map_err(invalid_path)?;
    tracing::debug!(id, "REST request to get Point");

    state
        .points
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Delete a point; 204 whether or not it existed
pub async fn delete_point(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, HeaderMap)> {
    let Path(id) = path.map_err(invalid_path)?;
    tracing::debug!(id, "REST request to delete Point");

    state.points.delete(id).await?;

    tracing::info!(point_id = id, "Point deleted");

    Ok((
        StatusCode::NO_CONTENT,
        alert::entity_deleted(ENTITY_NAME, &id.to_string()),
    ))
}

/// The body must carry an id, and it must be the one in the path
fn check_body_id(path_id: i64, dto: &PointDto) -> Result<()> {
    match dto.id {
        None => Err(AppError::bad_request("Invalid id", ENTITY_NAME, "idnull")),
        Some(body_id) if body_id != path_id => {
            Err(AppError::bad_request("Invalid ID", ENTITY_NAME, "idinvalid"))
        }
        Some(_) => Ok(()),
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound {
        resource_type: "Point".to_string(),
        id: id.to_string(),
    }
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::InvalidFormat {
        message: rejection.body_text(),
    }
}

fn invalid_path(rejection: PathRejection) -> AppError {
    AppError::InvalidFormat {
        message: rejection.body_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_body_id() {
        let mut dto = PointDto::new("AAAAAAAAAA", None);
        assert!(matches!(
            check_body_id(1, &dto),
            Err(AppError::BadRequest { ref error_key, .. }) if error_key == "idnull"
        ));

        dto.id = Some(2);
        assert!(matches!(
            check_body_id(1, &dto),
            Err(AppError::BadRequest { ref error_key, .. }) if error_key == "idinvalid"
        ));

        dto.id = Some(1);
        assert!(check_body_id(1, &dto).is_ok());
    }
}
