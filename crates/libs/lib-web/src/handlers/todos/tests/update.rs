//! # Update Tests

use super::*;

#[tokio::test]
async fn test_update_todo() {
    // Arrange
    let app = test_app().await;
    let token = register(&app, "a", "p").await;
    let id = create(&app, &token, "x").await;

    // Act
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/todos?id={id}"),
        Some(&token),
        Some(json!({ "title": "y", "done": true })),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Todo updated successfully");

    let (_, list) = send(&app, "GET", "/todos", Some(&token), None).await;
    let item = item_by_id(&list, &id).unwrap();
    assert_eq!(item["title"], "y");
    assert_eq!(item["done"], true);
}

#[tokio::test]
async fn test_update_bad_id() {
    let app = test_app().await;
    let token = register(&app, "a", "p").await;

    for uri in ["/todos?id=nope", "/todos"] {
        let (status, body) = send(
            &app,
            "PUT",
            uri,
            Some(&token),
            Some(json!({ "title": "y", "done": true })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "InvalidId", "{uri}");
    }
}

#[tokio::test]
async fn test_update_empty_title() {
    let app = test_app().await;
    let token = register(&app, "a", "p").await;
    let id = create(&app, &token, "x").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/todos?id={id}"),
        Some(&token),
        Some(json!({ "title": "", "done": true })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");
}

#[tokio::test]
async fn test_update_other_users_todo() {
    let app = test_app().await;
    let alice = register(&app, "alice", "p").await;
    let bob = register(&app, "bob", "p").await;
    let id = create(&app, &alice, "x").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/todos?id={id}"),
        Some(&bob),
        Some(json!({ "title": "hijacked", "done": true })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Todo not found or unauthorized");

    let (_, list) = send(&app, "GET", "/todos", Some(&alice), None).await;
    assert_eq!(item_by_id(&list, &id).unwrap()["title"], "x");
}

#[tokio::test]
async fn test_update_status_only() {
    let app = test_app().await;
    let token = register(&app, "a", "p").await;
    let id = create(&app, &token, "x").await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/todos/status?id={id}"),
        Some(&token),
        Some(json!({ "done": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let (_, list) = send(&app, "GET", "/todos", Some(&token), None).await;
    let item = item_by_id(&list, &id).unwrap();
    assert_eq!(item["title"], "x");
    assert_eq!(item["done"], true);
}

#[tokio::test]
async fn test_update_status_requires_done() {
    let app = test_app().await;
    let token = register(&app, "a", "p").await;
    let id = create(&app, &token, "x").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/todos/status?id={id}"),
        Some(&token),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ValidationError");
}
