mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn created_session_links_caller_and_student() -> Result<()> {
    let app = common::test_app();
    let token = common::register_and_login(&app, "alice").await?;
    let bob = common::create_student(&app, &token, "Bob").await?;

    let session = common::create_session(&app, &token, bob["id"].as_str().unwrap()).await?;
    assert_eq!(session["student_id"], bob["id"]);
    assert_eq!(session["tutor_id"], bob["tutor_id"]);
    assert_eq!(session["duration"], 60);
    assert_eq!(session["topic"], "algebra");
    Ok(())
}

#[tokio::test]
async fn session_for_foreign_student_fails_and_persists_nothing() -> Result<()> {
    let app = common::test_app();
    let alice = common::register_and_login(&app, "alice").await?;
    let carol = common::register_and_login(&app, "carol").await?;
    let bob = common::create_student(&app, &alice, "Bob").await?;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/sessions/",
        Some(&carol),
        Some(json!({
            "student_id": bob["id"],
            "date": "2026-01-15T10:00:00Z",
            "duration": 60,
            "topic": "algebra"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "Student not found or not assigned to the current tutor"
    );

    let (_, all) =
        common::request(&app, Method::GET, "/sessions/unprotected", None, None).await?;
    assert!(all.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn session_listing_is_scoped_to_the_owner() -> Result<()> {
    let app = common::test_app();
    let alice = common::register_and_login(&app, "alice").await?;
    let carol = common::register_and_login(&app, "carol").await?;
    let bob = common::create_student(&app, &alice, "Bob").await?;
    common::create_session(&app, &alice, bob["id"].as_str().unwrap()).await?;

    let (_, alice_list) =
        common::request(&app, Method::GET, "/sessions/", Some(&alice), None).await?;
    assert_eq!(alice_list.as_array().unwrap().len(), 1);

    let (_, carol_list) =
        common::request(&app, Method::GET, "/sessions/", Some(&carol), None).await?;
    assert!(carol_list.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn unprotected_session_listing_needs_no_auth() -> Result<()> {
    let app = common::test_app();
    let alice = common::register_and_login(&app, "alice").await?;
    let bob = common::create_student(&app, &alice, "Bob").await?;
    common::create_session(&app, &alice, bob["id"].as_str().unwrap()).await?;

    let (status, body) =
        common::request(&app, Method::GET, "/sessions/unprotected", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn owner_can_update_session_within_own_roster() -> Result<()> {
    let app = common::test_app();
    let token = common::register_and_login(&app, "alice").await?;
    let bob = common::create_student(&app, &token, "Bob").await?;
    let session = common::create_session(&app, &token, bob["id"].as_str().unwrap()).await?;

    let path = format!("/sessions/{}/", session["id"].as_str().unwrap());
    let (status, updated) = common::request(
        &app,
        Method::PUT,
        &path,
        Some(&token),
        Some(json!({
            "student_id": bob["id"],
            "date": "2026-01-16T14:00:00Z",
            "duration": 90,
            "topic": "geometry"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["duration"], 90);
    assert_eq!(updated["topic"], "geometry");
    assert_eq!(updated["tutor_id"], session["tutor_id"]);
    Ok(())
}

#[tokio::test]
async fn update_cannot_repoint_session_to_foreign_student() -> Result<()> {
    let app = common::test_app();
    let alice = common::register_and_login(&app, "alice").await?;
    let carol = common::register_and_login(&app, "carol").await?;
    let bob = common::create_student(&app, &alice, "Bob").await?;
    let dana = common::create_student(&app, &carol, "Dana").await?;
    let session = common::create_session(&app, &alice, bob["id"].as_str().unwrap()).await?;

    let path = format!("/sessions/{}/", session["id"].as_str().unwrap());
    let (status, _) = common::request(
        &app,
        Method::PUT,
        &path,
        Some(&alice),
        Some(json!({
            "student_id": dana["id"],
            "date": "2026-01-16T14:00:00Z",
            "duration": 60,
            "topic": "algebra"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Session still points at Bob
    let (_, list) = common::request(&app, Method::GET, "/sessions/", Some(&alice), None).await?;
    assert_eq!(list[0]["student_id"], bob["id"]);
    Ok(())
}

#[tokio::test]
async fn foreign_and_missing_session_mutations_are_indistinguishable() -> Result<()> {
    let app = common::test_app();
    let alice = common::register_and_login(&app, "alice").await?;
    let carol = common::register_and_login(&app, "carol").await?;
    let bob = common::create_student(&app, &alice, "Bob").await?;
    let session = common::create_session(&app, &alice, bob["id"].as_str().unwrap()).await?;

    let foreign_path = format!("/sessions/{}/", session["id"].as_str().unwrap());
    let (foreign_status, foreign_body) =
        common::request(&app, Method::DELETE, &foreign_path, Some(&carol), None).await?;

    let missing_path = format!("/sessions/{}/", uuid::Uuid::new_v4());
    let (missing_status, missing_body) =
        common::request(&app, Method::DELETE, &missing_path, Some(&carol), None).await?;

    assert_eq!(foreign_status, StatusCode::NOT_FOUND);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(foreign_body["message"], missing_body["message"]);
    Ok(())
}

#[tokio::test]
async fn owner_can_delete_session() -> Result<()> {
    let app = common::test_app();
    let token = common::register_and_login(&app, "alice").await?;
    let bob = common::create_student(&app, &token, "Bob").await?;
    let session = common::create_session(&app, &token, bob["id"].as_str().unwrap()).await?;

    let path = format!("/sessions/{}/", session["id"].as_str().unwrap());
    let (status, body) = common::request(&app, Method::DELETE, &path, Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Session deleted successfully");

    let (_, list) = common::request(&app, Method::GET, "/sessions/", Some(&token), None).await?;
    assert!(list.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn non_positive_duration_is_a_validation_error() -> Result<()> {
    let app = common::test_app();
    let token = common::register_and_login(&app, "alice").await?;
    let bob = common::create_student(&app, &token, "Bob").await?;

    let (status, _) = common::request(
        &app,
        Method::POST,
        "/sessions/",
        Some(&token),
        Some(json!({
            "student_id": bob["id"],
            "date": "2026-01-15T10:00:00Z",
            "duration": 0,
            "topic": "algebra"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
