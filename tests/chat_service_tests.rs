use alert_app::chat::ChatService;
use alert_app::error::{AlertError, GuardError};

mod common;
use common::*;

#[tokio::test]
async fn send_persists_only_valid_messages() {
    let mut store = MemoryStore::with_incident("ICD_1", 7);
    store.add_student(8);
    let service = ChatService::new(store);

    let accepted = service
        .send_message(admin_to_student("ICD_1", 100, 7))
        .await
        .unwrap();
    assert_eq!(accepted.message_id, 1);
    assert!(!accepted.is_read);

    // Student 8 exists but did not report ICD_1; nothing may be stored.
    let rejected = service
        .send_message(admin_to_student("ICD_1", 100, 8))
        .await;
    assert!(matches!(
        rejected,
        Err(AlertError::Guard(GuardError::RoleMismatch { .. }))
    ));

    let conversation = service.conversation("ICD_1").await.unwrap();
    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation[0].receiver_id, 7);
}

#[tokio::test]
async fn send_against_unknown_incident_stores_nothing() {
    let store = MemoryStore::with_incident("ICD_1", 7);
    let service = ChatService::new(store);

    let result = service
        .send_message(admin_to_student("ICD_GONE", 100, 7))
        .await;
    assert!(matches!(
        result,
        Err(AlertError::Guard(GuardError::UnknownIncident { .. }))
    ));

    assert!(service.conversation("ICD_GONE").await.unwrap().is_empty());
}

#[tokio::test]
async fn mark_read_flips_the_flag_and_nothing_else() {
    let store = MemoryStore::with_incident("ICD_1", 7);
    let service = ChatService::new(store);

    let sent = service
        .send_message(student_to_admin("ICD_1", 7, 100))
        .await
        .unwrap();
    assert!(!sent.is_read);

    let read = service.mark_read(sent.message_id).await.unwrap();
    assert!(read.is_read);
    assert_eq!(read.message, sent.message);
    assert_eq!(read.sender_id, sent.sender_id);

    // Marking twice is harmless; the record still passes validation.
    let again = service.mark_read(sent.message_id).await.unwrap();
    assert!(again.is_read);
}

#[tokio::test]
async fn mark_read_on_unknown_message_is_not_found() {
    let store = MemoryStore::with_incident("ICD_1", 7);
    let service = ChatService::new(store);

    match service.mark_read(42).await {
        Err(AlertError::NotFound(what)) => assert!(what.contains("42")),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn conversations_are_scoped_to_their_incident() {
    let mut store = MemoryStore::with_incident("ICD_1", 7);
    store.add_incident("ICD_2", 9);
    let service = ChatService::new(store);

    service
        .send_message(admin_to_student("ICD_1", 100, 7))
        .await
        .unwrap();
    service
        .send_message(admin_to_student("ICD_2", 100, 9))
        .await
        .unwrap();
    service
        .send_message(student_to_admin("ICD_1", 7, 100))
        .await
        .unwrap();

    let first = service.conversation("ICD_1").await.unwrap();
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|m| m.incident_id == "ICD_1"));

    let second = service.conversation("ICD_2").await.unwrap();
    assert_eq!(second.len(), 1);
}
