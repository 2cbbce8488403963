//! Tests for the notification service.

use std::sync::Arc;

use uuid::Uuid;

use super::*;
use crate::domain::ports::MockNotificationRepository;
use crate::domain::test_support::fixture_timestamp;
use crate::domain::{ErrorCode, Notification, NotificationKind};

fn sample_notification(user_id: UserId) -> Notification {
    Notification::new(
        Uuid::new_v4(),
        user_id,
        NotificationKind::Delivery,
        "Order delivered",
        "Your order was delivered",
        Some(Uuid::new_v4()),
        fixture_timestamp(),
    )
}

#[tokio::test]
async fn lists_the_callers_log() {
    let user_id = UserId::random();
    let notification = sample_notification(user_id);
    let expected_id = notification.id();

    let mut repo = MockNotificationRepository::new();
    repo.expect_list_for_user()
        .returning(move |_| Ok(vec![notification.clone()]));

    let service = NotificationService::new(Arc::new(repo));
    let listed = service
        .list_notifications(user_id)
        .await
        .expect("list succeeds");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, expected_id);
    assert!(!listed[0].read);
}

#[tokio::test]
async fn marks_own_notifications_read() {
    let user_id = UserId::random();
    let notification = sample_notification(user_id);
    let id = notification.id();

    let mut repo = MockNotificationRepository::new();
    let found = notification.clone();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));
    repo.expect_mark_read().times(1).returning(move |_| {
        let mut updated = notification.clone();
        updated.mark_read();
        Ok(Some(updated))
    });

    let service = NotificationService::new(Arc::new(repo));
    let payload = service
        .mark_read(MarkNotificationReadRequest {
            notification_id: id,
            user_id,
        })
        .await
        .expect("mark read succeeds");
    assert!(payload.read);
}

#[tokio::test]
async fn rejects_marking_someone_elses_notification() {
    let recipient = UserId::random();
    let intruder = UserId::random();
    let notification = sample_notification(recipient);
    let id = notification.id();

    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(notification.clone())));
    repo.expect_mark_read().times(0);

    let service = NotificationService::new(Arc::new(repo));
    let error = service
        .mark_read(MarkNotificationReadRequest {
            notification_id: id,
            user_id: intruder,
        })
        .await
        .expect_err("not the recipient");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn reports_unknown_notifications() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = NotificationService::new(Arc::new(repo));
    let error = service
        .mark_read(MarkNotificationReadRequest {
            notification_id: Uuid::new_v4(),
            user_id: UserId::random(),
        })
        .await
        .expect_err("nothing stored");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
