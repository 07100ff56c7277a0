use crate::common::{eventually, init, test_config, MockBackend};
use petopia_lib::application::PetopiaApp;
use petopia_lib::domain::repositories::TokenStore;
use petopia_lib::infrastructure::repositories::SqliteTokenStore;
use petopia_lib::presentation::dtos::{LoginRequest, NotificationFilterRequest};
use petopia_lib::domain::entities::{PetStatus, ReadStatus};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_sync_and_mutate_feed() -> anyhow::Result<()> {
    init();
    let backend = MockBackend::start().await;
    backend.accept_login("mochi", "hunter2").await;
    backend.serve_user("Mochi Owner").await;
    backend.serve_unread(&[1, 2, 3]).await;
    backend.accept_mark_read().await;
    backend.accept_delete().await;

    let dir = tempdir()?;
    let store = Arc::new(SqliteTokenStore::new(dir.path().join("session.db"))?);
    let app = PetopiaApp::new(test_config(&backend.uri()), store.clone()).await?;
    app.start();
    assert!(!app.notifications().is_polling());

    let status = app
        .session_controller()
        .login(LoginRequest {
            username: "mochi".into(),
            password: "hunter2".into(),
        })
        .await?;
    assert!(status.authenticated);
    assert_eq!(status.user.map(|u| u.display_name).as_deref(), Some("Mochi Owner"));

    let notifications = app.notifications();
    assert!(eventually(|| notifications.unread_count() == 3).await);

    let controller = app.notification_controller();
    let feed = controller.mark_as_read(2).await?;
    assert_eq!(feed.unread_count, 2);
    assert_eq!(
        feed.notifications.iter().map(|n| n.id).collect::<Vec<_>>(),
        vec![1, 3]
    );

    let feed = controller.delete_notification(3).await?;
    assert_eq!(feed.unread_count, 1);

    app.shutdown().await;
    assert!(store.get().await?.is_present());
    Ok(())
}

#[tokio::test]
async fn test_expired_token_forces_logout_everywhere() -> anyhow::Result<()> {
    init();
    let backend = MockBackend::start().await;
    backend.serve_unread(&[7]).await;

    let dir = tempdir()?;
    let path = dir.path().join("session.db");
    let store = Arc::new(SqliteTokenStore::new(&path)?);
    store
        .set(crate::common::ACCESS_TOKEN.into(), Some("R".into()))
        .await?;

    let app = PetopiaApp::new(test_config(&backend.uri()), store).await?;
    app.start();
    let notifications = app.notifications();
    assert!(eventually(|| notifications.unread_count() == 1).await);

    backend.expire_tokens().await;
    let notice = app
        .notification_controller()
        .mark_as_read(7)
        .await
        .unwrap_err();
    assert_eq!(notice.code, "SESSION_EXPIRED");
    assert!(notice.redirect_to_login);

    let session = app.session();
    assert!(!session.is_authenticated());
    assert!(eventually(|| !notifications.is_polling() && notifications.unread_count() == 0).await);

    let persisted = SqliteTokenStore::new(&path)?.get().await?;
    assert!(!persisted.is_present());

    let status = app.session_controller().status().await?;
    assert!(!status.authenticated);
    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_filtered_listing_does_not_touch_feed() -> anyhow::Result<()> {
    init();
    let backend = MockBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notifications/"))
        .and(query_param("pet_status", "adopt"))
        .and(query_param("read_status", "read"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [crate::common::notification_json(9, "adopt", true)]
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let store = Arc::new(petopia_lib::infrastructure::repositories::InMemoryTokenStore::with_tokens(
        crate::common::ACCESS_TOKEN,
        "R",
    ));
    let app = PetopiaApp::new(test_config(&backend.uri()), store).await?;

    let list = app
        .notification_controller()
        .list_notifications(Some(NotificationFilterRequest {
            pet_status: Some(PetStatus::Adopt),
            read_status: Some(ReadStatus::Read),
        }))
        .await?;
    assert_eq!(list.total, 1);
    assert_eq!(list.notifications[0].pet_status, PetStatus::Adopt);
    assert_eq!(app.notifications().unread_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_rejected_login_reports_api_error() -> anyhow::Result<()> {
    init();
    let backend = MockBackend::start().await;
    backend.reject_login().await;

    let store = Arc::new(petopia_lib::infrastructure::repositories::InMemoryTokenStore::new());
    let app = PetopiaApp::new(test_config(&backend.uri()), store).await?;

    let notice = app
        .session_controller()
        .login(LoginRequest {
            username: "mochi".into(),
            password: "nope".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(notice.code, "API_ERROR");
    assert!(!notice.redirect_to_login);
    assert!(!app.session().is_authenticated());
    Ok(())
}
