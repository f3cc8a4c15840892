use crate::core::errors::PortalError;
use crate::core::models::{ContentKind, NewContent};
use crate::core::services::{ContentListQuery, ContentUpdate};
use crate::tests::{content_fields, create_test_service};
use uuid::Uuid;

#[tokio::test]
async fn test_add_content() {
    let service = create_test_service();
    let item = service
        .add_content(content_fields(
            "Indian Polity - M. Laxmikanth",
            "book",
            "upsc",
            "https://cdn.example.com/polity.pdf",
        ))
        .await
        .unwrap();
    assert_eq!(item.kind, ContentKind::Book);
    assert_eq!(item.exam, "upsc");

    let fetched = service.get_content(item.id).await.unwrap();
    assert_eq!(fetched.id, item.id);
    assert_eq!(fetched.title, "Indian Polity - M. Laxmikanth");
}

#[tokio::test]
async fn test_add_content_rejects_missing_fields() {
    let service = create_test_service();
    let result = service
        .add_content(content_fields("Title", "book", "upsc", ""))
        .await;
    assert!(matches!(result, Err(PortalError::Validation(_))));
}

#[tokio::test]
async fn test_add_content_rejects_unknown_type() {
    let service = create_test_service();
    let result = service
        .add_content(content_fields("Title", "podcast", "upsc", "https://x"))
        .await;
    assert!(matches!(result, Err(PortalError::InvalidContentType(_))));
}

#[tokio::test]
async fn test_limit_zero_returns_everything_on_one_page() {
    let service = create_test_service();
    for i in 0..25 {
        service
            .add_content(content_fields(
                &format!("Book {i}"),
                "book",
                "upsc",
                &format!("https://cdn.example.com/{i}.pdf"),
            ))
            .await
            .unwrap();
    }

    let page = service
        .list_content(ContentListQuery {
            limit: Some(0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.content.len(), 25);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_pagination_reports_page_count() {
    let service = create_test_service();
    for i in 0..25 {
        service
            .add_content(content_fields(
                &format!("Book {i}"),
                "book",
                "upsc",
                &format!("https://cdn.example.com/{i}.pdf"),
            ))
            .await
            .unwrap();
    }

    let page = service
        .list_content(ContentListQuery {
            page: Some(3),
            limit: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.content.len(), 5);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn test_search_matches_title_case_insensitively() {
    let service = create_test_service();
    service
        .add_content(content_fields("Indian Polity", "book", "upsc", "https://a"))
        .await
        .unwrap();
    service
        .add_content(content_fields("Economy Basics", "book", "upsc", "https://b"))
        .await
        .unwrap();

    let page = service
        .list_content(ContentListQuery {
            search: Some("POLITY".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].title, "Indian Polity");
}

#[tokio::test]
async fn test_filters_by_type_and_exam() {
    let service = create_test_service();
    service
        .add_content(content_fields("Polity Book", "book", "upsc", "https://a"))
        .await
        .unwrap();
    service
        .add_content(content_fields("Polity - Video 1", "video", "upsc", "https://b"))
        .await
        .unwrap();
    service
        .add_content(content_fields("Maths Book", "book", "ssc", "https://c"))
        .await
        .unwrap();

    let books = service
        .list_content(ContentListQuery {
            kind: Some("book".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(books.content.len(), 2);

    let upsc_videos = service
        .list_content(ContentListQuery {
            kind: Some("video".to_string()),
            exam: Some("upsc".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(upsc_videos.content.len(), 1);
    assert_eq!(upsc_videos.content[0].url, "https://b");

    let bad_filter = service
        .list_content(ContentListQuery {
            kind: Some("podcast".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(bad_filter, Err(PortalError::InvalidContentType(_))));
}

#[tokio::test]
async fn test_sorts_by_requested_field() {
    let service = create_test_service();
    for title in ["Charlie", "Alpha", "Bravo"] {
        service
            .add_content(content_fields(title, "book", "upsc", &format!("https://{title}")))
            .await
            .unwrap();
    }

    let page = service
        .list_content(ContentListQuery {
            sort_by: Some("title".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let titles: Vec<&str> = page.content.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Bravo", "Charlie"]);

    let page = service
        .list_content(ContentListQuery {
            sort_by: Some("title".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.content[0].title, "Charlie");
}

#[tokio::test]
async fn test_update_preserves_id_and_unspecified_fields() {
    let service = create_test_service();
    let item = service
        .add_content(content_fields("Old Title", "video", "cds", "https://v"))
        .await
        .unwrap();

    let updated = service
        .update_content(
            item.id,
            ContentUpdate {
                title: Some("New Title".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, item.id);
    assert_eq!(updated.title, "New Title");
    assert_eq!(updated.kind, ContentKind::Video);
    assert_eq!(updated.exam, "cds");
    assert_eq!(updated.url, "https://v");
    assert_eq!(updated.created_at, item.created_at);
}

#[tokio::test]
async fn test_update_rejects_unknown_type() {
    let service = create_test_service();
    let item = service
        .add_content(content_fields("Title", "book", "upsc", "https://x"))
        .await
        .unwrap();

    let result = service
        .update_content(
            item.id,
            ContentUpdate {
                kind: Some("podcast".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(PortalError::InvalidContentType(_))));

    // Still the original kind.
    let fetched = service.get_content(item.id).await.unwrap();
    assert_eq!(fetched.kind, ContentKind::Book);
}

#[tokio::test]
async fn test_update_missing_item_is_not_found() {
    let service = create_test_service();
    let result = service
        .update_content(Uuid::new_v4(), ContentUpdate::default())
        .await;
    assert!(matches!(result, Err(PortalError::ContentNotFound)));
}

#[tokio::test]
async fn test_bulk_insert_grows_collection_by_batch_size() {
    let service = create_test_service();
    let batch = vec![
        content_fields("B1", "book", "upsc", "https://1"),
        content_fields("B2", "book", "cds", "https://2"),
        content_fields("V1", "video", "ssc", "https://3"),
    ];
    let count = service.add_content_bulk(batch).await.unwrap();
    assert_eq!(count, 3);

    let all = service
        .list_content(ContentListQuery {
            limit: Some(0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.content.len(), 3);
}

#[tokio::test]
async fn test_bulk_insert_is_all_or_nothing() {
    let service = create_test_service();
    let batch = vec![
        content_fields("B1", "book", "upsc", "https://1"),
        content_fields("Broken", "book", "upsc", ""),
        content_fields("B3", "book", "upsc", "https://3"),
    ];
    let result = service.add_content_bulk(batch).await;
    assert!(matches!(result, Err(PortalError::Validation(_))));

    // Nothing from the batch landed.
    let all = service
        .list_content(ContentListQuery {
            limit: Some(0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(all.content.is_empty());
}

#[tokio::test]
async fn test_bulk_insert_rejects_empty_batch() {
    let service = create_test_service();
    let result = service.add_content_bulk(Vec::new()).await;
    assert!(matches!(result, Err(PortalError::Validation(_))));
}

#[tokio::test]
async fn test_delete_content() {
    let service = create_test_service();
    let item = service
        .add_content(content_fields("Title", "book", "upsc", "https://x"))
        .await
        .unwrap();

    service.delete_content(item.id).await.unwrap();
    let result = service.get_content(item.id).await;
    assert!(matches!(result, Err(PortalError::ContentNotFound)));
    let result = service.delete_content(item.id).await;
    assert!(matches!(result, Err(PortalError::ContentNotFound)));
}

#[tokio::test]
async fn test_stats_counts_distinct_exams() {
    let service = create_test_service();
    service
        .register("Asha", "asha@example.com", "secret123")
        .await
        .unwrap();
    for (exam, url) in [("upsc", "https://1"), ("upsc", "https://2"), ("cds", "https://3")] {
        service
            .add_content(content_fields("Title", "book", exam, url))
            .await
            .unwrap();
    }

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.active_exams, 2);
    assert_eq!(stats.content_uploads, 3);
}

#[tokio::test]
async fn test_seeding_dedupes_by_url_and_runs_once() {
    let service = create_test_service();
    let new = |title: &str, url: &str| NewContent {
        title: title.to_string(),
        kind: ContentKind::Book,
        exam: "upsc".to_string(),
        url: url.to_string(),
    };

    let count = service
        .seed_content(vec![
            new("First", "https://1"),
            new("Duplicate of first", "https://1"),
            new("Second", "https://2"),
        ])
        .await
        .unwrap();
    assert_eq!(count, 2);

    // A second pass sees existing content and skips itself.
    let count = service
        .seed_content(vec![new("Third", "https://3")])
        .await
        .unwrap();
    assert_eq!(count, 0);

    let all = service
        .list_content(ContentListQuery {
            limit: Some(0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.content.len(), 2);
}
