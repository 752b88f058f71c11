use khreact_common::config::DatabaseConfig;
use khreact_common::pagination::SortOrder;
use khreact_common::{AppError, DbPool, PageRequest, PointDto, PointRepository, PointService};

const DEFAULT_TITLE: &str = "AAAAAAAAAA";
const UPDATED_TITLE: &str = "BBBBBBBBBB";
const DEFAULT_DESCRIPTION: &str = "AAAAAAAAAA";
const UPDATED_DESCRIPTION: &str = "BBBBBBBBBB";

async fn setup() -> (PointService, DbPool) {
    let pool = DbPool::new(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");
    (PointService::new(pool.clone()), pool)
}

fn default_point() -> PointDto {
    PointDto::new(DEFAULT_TITLE, Some(DEFAULT_DESCRIPTION.to_string()))
}

async fn count(pool: &DbPool) -> u64 {
    PointRepository::new(pool.conn()).count().await.unwrap()
}

#[tokio::test]
async fn save_assigns_id_and_round_trips() {
    let (service, pool) = setup().await;

    for title in ["AAAAA", "A title of 20 chars", DEFAULT_TITLE] {
        let saved = service
            .save(PointDto::new(title, Some("desc".to_string())))
            .await
            .unwrap();
        let id = saved.id.expect("id assigned on insert");

        let found = service.find_one(id).await.unwrap().expect("saved point");
        assert_eq!(found, saved);
        assert_eq!(found.title.as_deref(), Some(title));
    }

    assert_eq!(count(&pool).await, 3);
}

#[tokio::test]
async fn save_assigns_distinct_ids() {
    let (service, _pool) = setup().await;

    let a = service.save(default_point()).await.unwrap();
    let b = service.save(default_point()).await.unwrap();

    assert_ne!(a.id, b.id);
    assert!(!a.same_identity(&b));
}

#[tokio::test]
async fn save_without_title_persists_nothing() {
    let (service, pool) = setup().await;

    let err = service.save(PointDto::default()).await.unwrap_err();
    assert!(matches!(err, AppError::MissingField { .. }));
    assert_eq!(count(&pool).await, 0);
}

#[tokio::test]
async fn update_replaces_every_field() {
    let (service, pool) = setup().await;
    let saved = service.save(default_point()).await.unwrap();

    let updated = service
        .update(PointDto {
            id: saved.id,
            title: Some(UPDATED_TITLE.to_string()),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.id, saved.id);
    let found = service.find_one(saved.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found.title.as_deref(), Some(UPDATED_TITLE));
    assert_eq!(found.description, None);
    assert_eq!(count(&pool).await, 1);
}

#[tokio::test]
async fn update_of_missing_row_is_rejected() {
    let (service, pool) = setup().await;

    let err = service
        .update(PointDto {
            id: Some(4242),
            ..default_point()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BadRequest { ref error_key, .. } if error_key == "idnotfound"));
    assert_eq!(count(&pool).await, 0);
}

#[tokio::test]
async fn update_after_delete_is_rejected() {
    let (service, pool) = setup().await;
    let saved = service.save(default_point()).await.unwrap();
    let id = saved.id.unwrap();

    assert!(service.exists(id).await.unwrap());
    service.delete(id).await.unwrap();
    assert!(!service.exists(id).await.unwrap());

    let err = service
        .update(PointDto {
            title: Some(UPDATED_TITLE.to_string()),
            ..saved
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BadRequest { ref error_key, .. } if error_key == "idnotfound"));
    assert_eq!(count(&pool).await, 0);
}

#[tokio::test]
async fn update_without_id_is_rejected() {
    let (service, _pool) = setup().await;

    let err = service.update(default_point()).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest { ref error_key, .. } if error_key == "idnull"));
}

#[tokio::test]
async fn partial_update_title_keeps_description() {
    let (service, _pool) = setup().await;
    let saved = service.save(default_point()).await.unwrap();

    let patched = service
        .partial_update(PointDto {
            id: saved.id,
            title: Some(UPDATED_TITLE.to_string()),
            description: None,
        })
        .await
        .unwrap()
        .expect("existing point");

    assert_eq!(patched.title.as_deref(), Some(UPDATED_TITLE));
    assert_eq!(patched.description.as_deref(), Some(DEFAULT_DESCRIPTION));

    let found = service.find_one(saved.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found, patched);
}

#[tokio::test]
async fn partial_update_description_keeps_title() {
    let (service, _pool) = setup().await;
    let saved = service.save(default_point()).await.unwrap();

    let patched = service
        .partial_update(PointDto {
            id: saved.id,
            title: None,
            description: Some(UPDATED_DESCRIPTION.to_string()),
        })
        .await
        .unwrap()
        .expect("existing point");

    assert_eq!(patched.title.as_deref(), Some(DEFAULT_TITLE));
    assert_eq!(patched.description.as_deref(), Some(UPDATED_DESCRIPTION));
}

#[tokio::test]
async fn partial_update_of_missing_row_is_none() {
    let (service, pool) = setup().await;

    let result = service
        .partial_update(PointDto {
            id: Some(77),
            title: Some(UPDATED_TITLE.to_string()),
            description: None,
        })
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(count(&pool).await, 0);

    // The rolled back transaction leaves the connection usable
    assert!(service.save(default_point()).await.is_ok());
}

#[tokio::test]
async fn delete_removes_point() {
    let (service, pool) = setup().await;
    let saved = service.save(default_point()).await.unwrap();
    let id = saved.id.unwrap();

    assert!(service.exists(id).await.unwrap());
    service.delete(id).await.unwrap();

    assert!(service.find_one(id).await.unwrap().is_none());
    assert!(!service.exists(id).await.unwrap());
    assert_eq!(count(&pool).await, 0);
}

#[tokio::test]
async fn delete_of_missing_id_is_a_no_op() {
    let (service, _pool) = setup().await;

    assert!(service.delete(123_456).await.is_ok());
    assert!(service.delete(123_456).await.is_ok());
}

#[tokio::test]
async fn find_all_pages_in_requested_order() {
    let (service, _pool) = setup().await;
    let mut ids = Vec::new();
    for title in ["Point one", "Point two", "Point three", "Point four", "Point five"] {
        ids.push(service.save(PointDto::new(title, None)).await.unwrap().id.unwrap());
    }

    let first = service.find_all(&PageRequest::new(0, 2)).await.unwrap();
    assert_eq!(first.total_elements, 5);
    assert_eq!(first.total_pages(), 3);
    assert_eq!(
        first.content.iter().map(|p| p.id.unwrap()).collect::<Vec<_>>(),
        ids[..2].to_vec()
    );

    let desc = service
        .find_all(&PageRequest::new(1, 2).with_sort(SortOrder::desc("id")))
        .await
        .unwrap();
    assert_eq!(
        desc.content.iter().map(|p| p.id.unwrap()).collect::<Vec<_>>(),
        vec![ids[2], ids[1]]
    );

    let by_title = service
        .find_all(&PageRequest::new(0, 5).with_sort(SortOrder::asc("title")))
        .await
        .unwrap();
    let titles: Vec<_> = by_title
        .content
        .iter()
        .map(|p| p.title.clone().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Point five", "Point four", "Point one", "Point three", "Point two"]
    );
}

#[tokio::test]
async fn find_all_rejects_unknown_sort_property() {
    let (service, _pool) = setup().await;

    let err = service
        .find_all(&PageRequest::new(0, 20).with_sort(SortOrder::asc("password")))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BadRequest { .. }));
}

#[tokio::test]
async fn find_all_past_the_end_is_empty() {
    let (service, _pool) = setup().await;
    service.save(default_point()).await.unwrap();

    let page = service.find_all(&PageRequest::new(3, 20)).await.unwrap();
    assert!(page.content.is_empty());
    assert_eq!(page.total_elements, 1);
}
