use exitgate_scanner::error::ScannerServiceError;
use exitgate_scanner::usecase::verify::VerifyScanUseCase;

use crate::helpers::{ANA_SCAN_CODE, LUIS_SCAN_CODE, photos, school_store};

#[tokio::test]
async fn should_resolve_scan_code_repeatably_without_side_effects() {
    let store = school_store();
    let uc = VerifyScanUseCase {
        repo: store.clone(),
        photos: photos(),
    };

    let first = uc.execute(ANA_SCAN_CODE).await.unwrap();
    let second = uc.execute(ANA_SCAN_CODE).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.name, "Ana Rojas");
    assert_eq!(first.photo_url, "/static/uploads/photos/1001.jpg");
    assert!(store.logs().is_empty(), "verify must never write an exit");
}

#[tokio::test]
async fn should_return_card_for_student_not_authorized_to_leave() {
    let uc = VerifyScanUseCase {
        repo: school_store(),
        photos: photos(),
    };
    let card = uc.execute(LUIS_SCAN_CODE).await.unwrap();
    assert!(!card.authorized);
    assert_eq!(card.photo_url, "/static/img/avatar.png");
}

#[tokio::test]
async fn should_not_fold_case_or_trim_scan_code() {
    let uc = VerifyScanUseCase {
        repo: school_store(),
        photos: photos(),
    };
    let upper = ANA_SCAN_CODE.to_uppercase();
    let result = uc.execute(&upper).await;
    assert!(
        matches!(result, Err(ScannerServiceError::ScanCodeNotFound)),
        "expected ScanCodeNotFound, got {result:?}"
    );

    let padded = format!(" {ANA_SCAN_CODE}");
    let result = uc.execute(&padded).await;
    assert!(matches!(result, Err(ScannerServiceError::ScanCodeNotFound)));
}
