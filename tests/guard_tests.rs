use alert_app::database::models::Role;
use alert_app::error::{AlertError, GuardError, Participant};
use alert_app::validation::check_reporter_identity;

mod common;
use common::*;

// Incident ICD_1 is reported by student 1; student 2 also exists; admins use
// ids in the hundreds. Mirrors the shape of the production data: one
// reporter per incident, several admins working it.

#[tokio::test]
async fn admin_and_reporter_may_exchange_messages() {
    let store = MemoryStore::with_incident("ICD_1", 1);

    let down = admin_to_student("ICD_1", 100, 1);
    assert!(check_reporter_identity(&down, &store, &store).await.is_ok());

    let up = student_to_admin("ICD_1", 1, 100);
    assert!(check_reporter_identity(&up, &store, &store).await.is_ok());
}

#[tokio::test]
async fn other_registered_student_is_rejected_with_expected_reporter() {
    let mut store = MemoryStore::with_incident("ICD_1", 1);
    store.add_student(2);

    let candidate = admin_to_student("ICD_1", 100, 2);
    match check_reporter_identity(&candidate, &store, &store).await {
        Err(AlertError::Guard(GuardError::RoleMismatch {
            participant,
            user_id,
            expected,
            ..
        })) => {
            assert_eq!(participant, Participant::Receiver);
            assert_eq!(user_id, 2);
            assert_eq!(expected, 1);
        }
        other => panic!("expected RoleMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn mismatch_reason_names_both_identities() {
    let mut store = MemoryStore::with_incident("ICD_1", 1);
    store.add_student(2);

    let candidate = admin_to_student("ICD_1", 100, 2);
    let err = check_reporter_identity(&candidate, &store, &store)
        .await
        .unwrap_err();

    let reason = err.to_string();
    assert!(reason.contains("receiver 2"), "got: {}", reason);
    assert!(reason.contains("expected student 1"), "got: {}", reason);
    assert!(reason.contains("ICD_1"), "got: {}", reason);
}

#[tokio::test]
async fn missing_incident_wins_over_any_participant_problem() {
    let store = MemoryStore::with_incident("ICD_1", 1);

    // Even a message whose participants would themselves be invalid reports
    // the incident problem first.
    let candidate = admin_to_student("ICD_MISSING", 100, 999);
    match check_reporter_identity(&candidate, &store, &store).await {
        Err(AlertError::Guard(GuardError::UnknownIncident { incident_id })) => {
            assert_eq!(incident_id, "ICD_MISSING");
        }
        other => panic!("expected UnknownIncident, got {:?}", other),
    }
}

#[tokio::test]
async fn admin_only_messages_skip_student_validation() {
    let store = MemoryStore::with_incident("ICD_1", 1);

    let mut candidate = admin_to_student("ICD_1", 100, 101);
    candidate.receiver_role = Role::Admin;

    assert!(check_reporter_identity(&candidate, &store, &store)
        .await
        .is_ok());
}

#[tokio::test]
async fn sender_is_checked_before_receiver() {
    let mut store = MemoryStore::with_incident("ICD_1", 1);
    store.add_student(2);
    store.add_student(3);

    // Both sides violate the invariant; the sender's violation is the one
    // reported.
    let candidate = student_to_admin("ICD_1", 2, 0);
    let candidate = alert_app::database::models::NewChatMessage {
        receiver_id: 3,
        receiver_role: Role::Student,
        ..candidate
    };

    match check_reporter_identity(&candidate, &store, &store).await {
        Err(AlertError::Guard(GuardError::RoleMismatch { participant, .. })) => {
            assert_eq!(participant, Participant::Sender);
        }
        other => panic!("expected sender RoleMismatch, got {:?}", other),
    }
}
