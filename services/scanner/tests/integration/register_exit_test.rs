use chrono::Duration;
use futures::future::join_all;

use exitgate_domain::id::DoorId;
use exitgate_domain::operator::OperatorRole;
use exitgate_scanner::error::ScannerServiceError;

use crate::helpers::{
    TestClock, ana, exit_of, luis, register_usecase, school_morning, school_store,
};

#[tokio::test]
async fn should_enforce_sixty_minute_cooldown_between_exits() {
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 60);

    let first = uc.execute(exit_of(&ana(), DoorId(1))).await.unwrap();
    assert_eq!(first.student_name, "Ana Rojas");
    assert_eq!(first.exit_log.recorded_at, school_morning());

    clock.advance(Duration::minutes(10));
    let result = uc.execute(exit_of(&ana(), DoorId(1))).await;
    match result {
        Err(e @ ScannerServiceError::CooldownViolation { .. }) => assert_eq!(
            e.to_string(),
            "exit already registered for Ana Rojas less than 60 minutes ago"
        ),
        other => panic!("expected CooldownViolation, got {other:?}"),
    }
    assert_eq!(store.logs().len(), 1, "rejected attempt must not write");

    clock.advance(Duration::minutes(50));
    uc.execute(exit_of(&ana(), DoorId(1))).await.unwrap();
    assert_eq!(store.logs().len(), 2);
}

#[tokio::test]
async fn should_register_again_sixty_one_minutes_later() {
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 60);

    uc.execute(exit_of(&ana(), DoorId(1))).await.unwrap();
    clock.advance(Duration::minutes(61));
    let second = uc.execute(exit_of(&ana(), DoorId(1))).await.unwrap();

    assert_eq!(
        second.exit_log.recorded_at,
        school_morning() + Duration::minutes(61)
    );
    let logs = store.logs();
    assert_eq!(logs.len(), 2);
    assert_ne!(logs[0].id, logs[1].id);
}

#[tokio::test]
async fn should_reject_closed_door_without_writing() {
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 60);

    let result = uc.execute(exit_of(&ana(), DoorId(2))).await;

    match result {
        Err(e @ ScannerServiceError::GateClosed { .. }) => {
            assert_eq!(e.to_string(), "door Cafeteria is not open")
        }
        other => panic!("expected GateClosed, got {other:?}"),
    }
    assert!(store.logs().is_empty());
}

#[tokio::test]
async fn should_reject_unknown_student_and_door() {
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 60);

    let mut ghost = exit_of(&ana(), DoorId(1));
    ghost.student_id = "9999".parse().unwrap();
    let result = uc.execute(ghost).await;
    assert!(
        matches!(result, Err(ScannerServiceError::StudentNotFound)),
        "expected StudentNotFound, got {result:?}"
    );

    let result = uc.execute(exit_of(&ana(), DoorId(77))).await;
    assert!(
        matches!(result, Err(ScannerServiceError::DoorNotFound)),
        "expected DoorNotFound, got {result:?}"
    );
    assert!(store.logs().is_empty());
}

#[tokio::test]
async fn should_record_exit_for_student_not_authorized_to_leave() {
    // The authorization flag is informational; the operator decides.
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 60);

    let registered = uc.execute(exit_of(&luis(), DoorId(1))).await.unwrap();
    assert_eq!(registered.exit_log.student_id, luis().id);
}

#[tokio::test]
async fn should_allow_admin_to_register_exits() {
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 60);

    let mut input = exit_of(&ana(), DoorId(1));
    input.role = OperatorRole::Admin;
    let operator_id = input.operator_id;
    let registered = uc.execute(input).await.unwrap();

    let logs = store.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0], registered.exit_log);
    assert_eq!(logs[0].operator_id, operator_id);
}

#[tokio::test]
async fn should_keep_students_independent() {
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 60);

    uc.execute(exit_of(&ana(), DoorId(1))).await.unwrap();
    uc.execute(exit_of(&luis(), DoorId(1))).await.unwrap();
    assert_eq!(store.logs().len(), 2);
}

#[tokio::test]
async fn should_never_reject_with_zero_cooldown() {
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 0);

    uc.execute(exit_of(&ana(), DoorId(1))).await.unwrap();
    clock.advance(Duration::seconds(1));
    uc.execute(exit_of(&ana(), DoorId(1))).await.unwrap();
    assert_eq!(store.logs().len(), 2);
}

#[tokio::test]
async fn should_accept_exactly_one_of_concurrent_attempts_for_same_student() {
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 60);

    let attempts = (0..8).map(|_| uc.execute(exit_of(&ana(), DoorId(1))));
    let results = join_all(attempts).await;

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one attempt must win: {results:?}");
    for result in results.iter().filter(|r| r.is_err()) {
        match result {
            Err(
                e @ (ScannerServiceError::CooldownViolation { .. }
                | ScannerServiceError::Conflict { .. }),
            ) => assert_eq!(
                e.to_string(),
                "exit already registered for Ana Rojas less than 60 minutes ago"
            ),
            other => panic!("losers must see cooldown or conflict, got {other:?}"),
        }
    }
    assert_eq!(store.logs().len(), 1);
}

#[tokio::test]
async fn should_accept_concurrent_attempts_for_different_students() {
    let store = school_store();
    let clock = TestClock::at(school_morning());
    let uc = register_usecase(&store, &clock, 60);

    let (a, b) = tokio::join!(
        uc.execute(exit_of(&ana(), DoorId(1))),
        uc.execute(exit_of(&luis(), DoorId(1))),
    );
    a.unwrap();
    b.unwrap();
    assert_eq!(store.logs().len(), 2);
}
