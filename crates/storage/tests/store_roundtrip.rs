use quickcheck_core::model::{
    EmailAddress, HealthBand, NewContact, NewResult, ReportStatus, SessionToken,
};
use quickcheck_core::time::fixed_now;
use storage::repository::Store;

#[tokio::test]
async fn full_check_writes_all_three_record_kinds() {
    let store = Store::in_memory();
    let now = fixed_now();
    let token = SessionToken::mint();

    let session_id = store.sessions.create_session(&token, now).await.unwrap();
    store
        .sessions
        .finalize_session(session_id, 63, HealthBand::AtRisk, now)
        .await
        .unwrap();

    let email = EmailAddress::parse("you@company.com").unwrap();
    let contact_id = store
        .contacts
        .create_contact(&NewContact::from_email(email.clone(), now))
        .await
        .unwrap();
    assert_eq!(
        store.contacts.find_contact_by_email(&email).await.unwrap(),
        Some(contact_id)
    );

    let result_id = store
        .results
        .create_result(&NewResult {
            contact: contact_id,
            session: Some(session_id),
            session_token: token,
            overall_score: 63,
            max_score: 100,
            band: HealthBand::AtRisk,
            breakdown: vec![20, 14, 7, 14, 8],
            report_status: ReportStatus::Requested,
            created_at: now,
        })
        .await
        .unwrap();

    assert_ne!(result_id.value(), contact_id.value());
}

#[tokio::test]
async fn lookup_for_unknown_email_returns_none_not_error() {
    let store = Store::in_memory();
    let email = EmailAddress::parse("nobody@nowhere.example").unwrap();
    assert_eq!(
        store.contacts.find_contact_by_email(&email).await.unwrap(),
        None
    );
}
