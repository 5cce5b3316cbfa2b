mod common;

use axum::http::StatusCode;
use common::{send, setup_test_app, token_for};
use enrollment_core::Role;
use enrollment_models::StudentId;
use serde_json::json;

#[tokio::test]
async fn test_link_then_student_sees_own_record() {
    let (app, repo) = setup_test_app();
    let admin = repo.seed_user("admin", Role::Admin, None);
    let admin_token = token_for(admin, Role::Admin);
    let student_id = repo.seed_student("Ada Lovelace", "ada@example.com", Some("MA101"));
    let user = repo.seed_user("ada", Role::Student, None);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{}/student", user),
        Some(&admin_token),
        Some(json!({ "student_id": student_id.into_inner() })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Linked");
    assert_eq!(repo.user("ada").unwrap().linked_student_id, Some(student_id));

    let student_token = token_for(user, Role::Student);
    let (status, body) = send(&app, "GET", "/students", Some(&student_token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student_id"], student_id.into_inner());
    assert_eq!(body["course_code"], "MA101");
}

#[tokio::test]
async fn test_link_forbidden_for_student() {
    let (app, repo) = setup_test_app();
    let student_id = repo.seed_student("Ada Lovelace", "ada@example.com", None);
    let user = repo.seed_user("ada", Role::Student, None);
    let token = token_for(user, Role::Student);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{}/student", user),
        Some(&token),
        Some(json!({ "student_id": student_id.into_inner() })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(repo.user("ada").unwrap().linked_student_id, None);
}

#[tokio::test]
async fn test_link_forbidden_for_student_with_mistyped_body() {
    let (app, repo) = setup_test_app();
    let user = repo.seed_user("ada", Role::Student, None);
    let token = token_for(user, Role::Student);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{}/student", user),
        Some(&token),
        Some(json!({ "student_id": "seven" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_link_unknown_user_not_found() {
    let (app, repo) = setup_test_app();
    let admin = repo.seed_user("admin", Role::Admin, None);
    let token = token_for(admin, Role::Admin);
    let student_id = repo.seed_student("Ada Lovelace", "ada@example.com", None);

    let (status, body) = send(
        &app,
        "PUT",
        "/users/99/student",
        Some(&token),
        Some(json!({ "student_id": student_id.into_inner() })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_link_unknown_student_not_found() {
    let (app, repo) = setup_test_app();
    let admin = repo.seed_user("admin", Role::Admin, None);
    let token = token_for(admin, Role::Admin);
    let user = repo.seed_user("ada", Role::Student, None);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{}/student", user),
        Some(&token),
        Some(json!({ "student_id": StudentId(42).into_inner() })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found");
}

#[tokio::test]
async fn test_link_admin_account_rejected() {
    let (app, repo) = setup_test_app();
    let admin = repo.seed_user("admin", Role::Admin, None);
    let token = token_for(admin, Role::Admin);
    let student_id = repo.seed_student("Ada Lovelace", "ada@example.com", None);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{}/student", admin),
        Some(&token),
        Some(json!({ "student_id": student_id.into_inner() })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(repo.user("admin").unwrap().linked_student_id, None);
}
