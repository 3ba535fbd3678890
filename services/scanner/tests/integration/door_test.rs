use exitgate_domain::door::DoorStatus;
use exitgate_domain::id::DoorId;
use exitgate_domain::operator::OperatorRole;
use exitgate_scanner::error::ScannerServiceError;
use exitgate_scanner::usecase::door::{ListOpenDoorsUseCase, SetDoorStatusUseCase};

use crate::helpers::{TestClock, ana, exit_of, register_usecase, school_morning, school_store};

#[tokio::test]
async fn should_list_open_doors_by_name() {
    let store = school_store();
    let admin = SetDoorStatusUseCase {
        repo: store.clone(),
    };
    admin
        .execute(OperatorRole::Admin, DoorId(2), DoorStatus::Open)
        .await
        .unwrap();

    let doors = ListOpenDoorsUseCase { repo: store }.execute().await.unwrap();
    let names: Vec<_> = doors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Cafeteria", "Principal"]);
}

#[tokio::test]
async fn should_block_registration_after_door_is_closed() {
    let store = school_store();
    let clock = TestClock::at(school_morning());

    SetDoorStatusUseCase {
        repo: store.clone(),
    }
    .execute(OperatorRole::Admin, DoorId(1), DoorStatus::Closed)
    .await
    .unwrap();

    let result = register_usecase(&store, &clock, 60)
        .execute(exit_of(&ana(), DoorId(1)))
        .await;
    assert!(
        matches!(result, Err(ScannerServiceError::GateClosed { .. })),
        "expected GateClosed, got {result:?}"
    );
    assert!(store.logs().is_empty());
}

#[tokio::test]
async fn should_forbid_operator_from_closing_door() {
    let store = school_store();
    let result = SetDoorStatusUseCase {
        repo: store.clone(),
    }
    .execute(OperatorRole::Operator, DoorId(1), DoorStatus::Closed)
    .await;
    assert!(matches!(result, Err(ScannerServiceError::Forbidden)));

    let open = ListOpenDoorsUseCase { repo: store }.execute().await.unwrap();
    assert_eq!(open.len(), 1);
}
