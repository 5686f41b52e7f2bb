mod support;

use checkupcli::{
    Error,
    api::{auth, health_info, recommendation, report, user, user_portrait, user_profile},
    events::{ClientEvent, Level, NavigationReason},
    session::Session,
    types::Upload,
};
use serde_json::json;
use support::FakeBackend;

#[tokio::test]
async fn test_login_stores_token_for_later_calls() {
    let backend = FakeBackend::start().await;
    backend
        .reply("POST", "/api/v1/auth/token", 200, json!({"access_token": "X"}))
        .reply("GET", "/api/v1/auth/me", 200, json!({"id": 1, "username": "jxw123"}));
    let client = backend.client();
    let mut rx = client.events().subscribe();

    let token = auth::login(&client, "jxw123", "123456").await.unwrap();
    assert_eq!(token.access_token, "X");

    let login = backend.last();
    assert_eq!(
        login.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(login.body, "username=jxw123&password=123456");
    assert_eq!(login.authorization, None);

    auth::current_user(&client).await.unwrap();
    assert_eq!(backend.last().authorization.as_deref(), Some("Bearer X"));
    assert_eq!(client.session().username().await.as_deref(), Some("jxw123"));
    assert_eq!(
        rx.try_recv().unwrap(),
        ClientEvent::LoggedIn {
            username: Some("jxw123".to_string())
        }
    );
}

#[tokio::test]
async fn test_login_keeps_user_id_from_token_response() {
    let backend = FakeBackend::start().await;
    backend.reply(
        "POST",
        "/api/v1/auth/token",
        200,
        json!({"access_token": "Y", "token_type": "bearer", "user_id": 12, "username": "amy"}),
    );
    let client = backend.client();

    auth::login(&client, "amy", "pw").await.unwrap();
    assert_eq!(client.session().user_id().await, Some(12));
}

#[tokio::test]
async fn test_rejected_login_has_no_redirect() {
    let backend = FakeBackend::start().await;
    backend.reply(
        "POST",
        "/api/v1/auth/token",
        401,
        json!({"detail": "Incorrect username or password"}),
    );
    let client = backend.client();
    let mut rx = client.events().subscribe();

    let err = auth::login(&client, "jxw123", "wrong").await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    assert!(rx.try_recv().is_err());
    assert!(!client.session().is_authenticated().await);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let backend = FakeBackend::start().await;
    let session = Session::in_memory();
    session
        .sign_in("X".to_string(), Some("jxw123".to_string()), None)
        .await
        .unwrap();
    let client = backend.client_with(session.clone());
    let mut rx = client.events().subscribe();

    auth::logout(&client).await.unwrap();
    auth::logout(&client).await.unwrap();

    assert!(!session.is_authenticated().await);
    for _ in 0..2 {
        assert_eq!(
            rx.try_recv().unwrap(),
            ClientEvent::Navigate {
                to: "/login".to_string(),
                reason: NavigationReason::LoggedOut,
            }
        );
    }
}

#[tokio::test]
async fn test_refresh_replaces_token() {
    let backend = FakeBackend::start().await;
    backend.reply("POST", "/api/v1/auth/refresh", 200, json!({"access_token": "new"}));
    let session = Session::in_memory();
    session
        .sign_in("old".to_string(), Some("jxw123".to_string()), Some(5))
        .await
        .unwrap();
    let client = backend.client_with(session.clone());

    assert_eq!(auth::refresh_token(&client).await.unwrap(), "new");
    assert_eq!(backend.last().authorization.as_deref(), Some("Bearer old"));
    assert_eq!(session.token().await.as_deref(), Some("new"));
    assert_eq!(session.user_id().await, Some(5));
}

#[tokio::test]
async fn test_failed_refresh_logs_out() {
    let backend = FakeBackend::start().await;
    backend.reply("POST", "/api/v1/auth/refresh", 500, json!({}));
    let session = Session::in_memory();
    session.set_token("old".to_string()).await.unwrap();
    let client = backend.client_with(session.clone());

    let err = auth::refresh_token(&client).await.unwrap_err();
    assert!(matches!(err, Error::Server { status: 500, .. }));
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn test_rejected_refresh_navigates_once() {
    let backend = FakeBackend::start().await;
    backend.reply("POST", "/api/v1/auth/refresh", 401, json!({"detail": "expired"}));
    let session = Session::in_memory();
    session.set_token("old".to_string()).await.unwrap();
    let client = backend.client_with(session.clone());
    let mut rx = client.events().subscribe();

    let err = auth::refresh_token(&client).await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    assert!(!session.is_authenticated().await);
    assert_eq!(
        rx.try_recv().unwrap(),
        ClientEvent::Navigate {
            to: "/login".to_string(),
            reason: NavigationReason::SessionExpired,
        }
    );
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_refresh_with_unexpected_body_is_announced() {
    let backend = FakeBackend::start().await;
    backend.reply("POST", "/api/v1/auth/refresh", 200, json!({"token": "new"}));
    let session = Session::in_memory();
    session.set_token("old".to_string()).await.unwrap();
    let client = backend.client_with(session.clone());
    let mut rx = client.events().subscribe();

    let err = auth::refresh_token(&client).await.unwrap_err();
    assert!(matches!(err, Error::Server { status: 200, .. }));

    match rx.try_recv().unwrap() {
        ClientEvent::Notify { level, message } => {
            assert_eq!(level, Level::Error);
            assert!(message.starts_with("unexpected response shape"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        rx.try_recv().unwrap(),
        ClientEvent::Navigate {
            to: "/login".to_string(),
            reason: NavigationReason::LoggedOut,
        }
    );
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn test_password_endpoints_send_json() {
    let backend = FakeBackend::start().await;
    backend
        .reply("POST", "/api/v1/auth/password-reset-request", 200, json!({}))
        .reply("POST", "/api/v1/auth/password-reset", 200, json!({}))
        .reply("POST", "/api/v1/auth/change-password", 200, json!({}));
    let client = backend.client();

    auth::request_password_reset(&client, "a@b.c").await.unwrap();
    auth::reset_password(&client, "rt", "n3w").await.unwrap();
    auth::change_password(&client, "old", "n3w").await.unwrap();

    let bodies: Vec<_> = backend.seen().iter().map(|s| s.json()).collect();
    assert_eq!(
        bodies,
        vec![
            json!({"email": "a@b.c"}),
            json!({"token": "rt", "new_password": "n3w"}),
            json!({"old_password": "old", "new_password": "n3w"}),
        ]
    );
}

#[tokio::test]
async fn test_user_portrait_unwraps_nested_envelope() {
    let backend = FakeBackend::start().await;
    backend.reply(
        "GET",
        "/api/v1/user-profile/",
        200,
        json!({"status": "success", "data": {"status": "success", "data": {"age": "30-40"}}}),
    );
    let client = backend.client();

    assert_eq!(
        user_portrait::get_user_portrait(&client).await.unwrap(),
        json!({"age": "30-40"})
    );
}

#[tokio::test]
async fn test_user_portrait_falls_back_to_data() {
    let backend = FakeBackend::start().await;
    backend.reply(
        "GET",
        "/api/v1/user-profile/",
        200,
        json!({"status": "success", "data": {"basic_info": {"gender": "m"}}}),
    );
    let client = backend.client();

    assert_eq!(
        user_portrait::get_user_portrait(&client).await.unwrap(),
        json!({"basic_info": {"gender": "m"}})
    );
}

#[tokio::test]
async fn test_questionnaire_calls() {
    let backend = FakeBackend::start().await;
    backend
        .reply("POST", "/api/v1/user-portrait/step", 200, json!({"next_step": "lifestyle"}))
        .reply("POST", "/api/v1/user-portrait/dynamic-question", 200, json!({}))
        .reply("POST", "/api/v1/user-portrait/reset", 200, json!({}));
    let client = backend.client();

    let next = user_portrait::submit_step(&client, "basic_info", json!({"age": 30}))
        .await
        .unwrap();
    assert_eq!(next, json!({"next_step": "lifestyle"}));
    assert_eq!(
        backend.last().json(),
        json!({"step": "basic_info", "data": {"age": 30}})
    );

    user_portrait::submit_dynamic_answer(&client, "twice a week")
        .await
        .unwrap();
    assert_eq!(backend.last().json(), json!({"answer": "twice a week"}));

    user_portrait::reset_questionnaire(&client).await.unwrap();
    assert_eq!(backend.last().body, "");
}

#[tokio::test]
async fn test_feedback_merges_user_id() {
    let backend = FakeBackend::start().await;
    backend.reply("POST", "/api/v1/recommendation/feedback", 200, json!({}));
    let client = backend.client();

    recommendation::save_recommendation_feedback(
        &client,
        4,
        &json!({"item_id": 9, "rating": 5}),
    )
    .await
    .unwrap();
    assert_eq!(
        backend.last().json(),
        json!({"user_id": 4, "item_id": 9, "rating": 5})
    );
}

#[tokio::test]
async fn test_id_interpolation() {
    let backend = FakeBackend::start().await;
    backend
        .reply("GET", "/api/v1/recommendation/personalized/4", 200, json!([]))
        .reply("GET", "/api/v1/user/4/reports", 200, json!([]))
        .reply("GET", "/api/v1/report/11", 200, json!({}))
        .reply("GET", "/api/v1/user/4/profile", 200, json!({}))
        .reply("POST", "/api/v1/user/4/profile/update", 200, json!({}))
        .reply("PUT", "/api/v1/user-profile/4", 200, json!({}))
        .reply("POST", "/api/v1/health-info/update", 200, json!({}));
    let client = backend.client();

    recommendation::get_personalized_recommendations(&client, 4)
        .await
        .unwrap();
    report::get_user_reports(&client, 4).await.unwrap();
    report::get_report_detail(&client, 11).await.unwrap();
    user::get_user_profile(&client, 4).await.unwrap();
    user::update_user_profile(&client, 4, &json!({"email": "x@y.z"}))
        .await
        .unwrap();
    user_profile::update_profile(&client, 4, &json!({})).await.unwrap();
    health_info::update_user_health_info(&client, 4, &json!({"height": 170}))
        .await
        .unwrap();

    let paths: Vec<String> = backend.seen().into_iter().map(|s| s.path).collect();
    assert_eq!(
        paths,
        vec![
            "/api/v1/recommendation/personalized/4",
            "/api/v1/user/4/reports",
            "/api/v1/report/11",
            "/api/v1/user/4/profile",
            "/api/v1/user/4/profile/update",
            "/api/v1/user-profile/4",
            "/api/v1/health-info/update",
        ]
    );
}

#[tokio::test]
async fn test_symptom_is_percent_encoded() {
    let backend = FakeBackend::start().await;
    backend.reply(
        "GET",
        "/api/v1/user-profile/symptom-questions/chest%20pain%2Fleft",
        200,
        json!(["How long?"]),
    );
    let client = backend.client();

    let questions = user_profile::get_symptom_follow_up_questions(&client, "chest pain/left")
        .await
        .unwrap();
    assert_eq!(questions, json!(["How long?"]));
}

#[tokio::test]
async fn test_report_upload_is_multipart_with_user_id() {
    let backend = FakeBackend::start().await;
    backend.reply(
        "POST",
        "/api/v1/report/upload",
        200,
        json!({"status": "success", "data": {"report_id": 3}}),
    );
    let client = backend.client();

    let upload = Upload::new("checkup.pdf", b"%PDF-1.4".to_vec()).with_mime("application/pdf");
    let data = report::upload_report(&client, 8, upload).await.unwrap();
    assert_eq!(data, json!({"report_id": 3}));

    let seen = backend.last();
    assert!(
        seen.content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data; boundary=")
    );
    assert!(seen.body.contains("name=\"user_id\""));
    assert!(seen.body.contains("filename=\"checkup.pdf\""));
    assert!(seen.body.contains("%PDF-1.4"));
}

#[tokio::test]
async fn test_medical_report_upload_is_multipart() {
    let backend = FakeBackend::start().await;
    backend.reply("POST", "/api/v1/health-info/upload-report", 200, json!({}));
    let client = backend.client();

    health_info::upload_medical_report(&client, Upload::new("scan.png", vec![1, 2, 3]))
        .await
        .unwrap();
    let seen = backend.last();
    assert!(
        seen.content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data")
    );
    assert!(seen.body.contains("name=\"file\""));
}

#[tokio::test]
async fn test_upload_from_path_guesses_mime() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.PDF");
    std::fs::write(&path, b"data").unwrap();

    let upload = Upload::from_path(&path).await.unwrap();
    assert_eq!(upload.file_name, "report.PDF");
    assert_eq!(upload.mime.as_deref(), Some("application/pdf"));
    assert_eq!(upload.bytes, b"data");
}

#[tokio::test]
async fn test_domain_failures_propagate_unchanged() {
    let backend = FakeBackend::start().await;
    backend.reply("GET", "/api/v1/user-portrait/progress", 403, json!({}));
    let client = backend.client();

    assert!(matches!(
        user_portrait::get_progress(&client).await,
        Err(Error::Forbidden)
    ));
    assert!(matches!(
        user_profile::get_conversation_history(&client).await,
        Err(Error::NotFound)
    ));
}
