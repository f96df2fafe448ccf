//! # Integration Tests
//!
//! The full register → create → update → list flow.

use super::*;

#[tokio::test]
async fn test_full_flow() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "a", "password": "p" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, created) = send(&app, "POST", "/todos", Some(&token), Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["data"]["done"], false);
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/todos?id={id}"),
        Some(&token),
        Some(json!({ "title": "y", "done": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, list) = send(&app, "GET", "/todos", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let item = item_by_id(&list, &id).unwrap();
    assert_eq!(item["title"], "y");
    assert_eq!(item["done"], true);
    assert_eq!(item["ownerId"], created["data"]["ownerId"]);
}

#[tokio::test]
async fn test_token_from_login_works_like_register_token() {
    let app = test_app().await;
    let registered = register(&app, "a", "p").await;
    create(&app, &registered, "x").await;

    let (_, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "a", "password": "p" })),
    )
    .await;
    let logged_in = body["token"].as_str().unwrap();

    assert_eq!(titles(&app, logged_in, "/todos").await, ["x"]);
}
