use std::sync::Arc;

use quickcheck_core::model::{HealthBand, QuestionBank};
use quickcheck_core::time::fixed_now;
use services::{CheckFlowService, Clock, EmailCapture, Page, ResultsPageView};
use storage::repository::InMemoryStore;

fn flow_with_store() -> (CheckFlowService, InMemoryStore) {
    let store = InMemoryStore::new();
    let flow = CheckFlowService::new(
        Clock::fixed(fixed_now()),
        Arc::new(QuestionBank::inventory_health()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    );
    (flow, store)
}

#[tokio::test]
async fn best_answers_end_to_end() {
    let (flow, store) = flow_with_store();

    let mut run = flow.start().await;
    assert_eq!(run.state().page(), Page::Quiz);
    assert!(run.session().remote_id().is_some());

    // Session row exists as soon as the quiz starts.
    let sessions = store.session_rows();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].token, *run.session().token());
    assert!(!sessions[0].completed);

    while run.state().page() == Page::Quiz {
        let label = run.state().current_question().unwrap().options()[0]
            .label()
            .to_string();
        flow.answer(&mut run, label);
    }
    assert_eq!(run.state().page(), Page::Results);

    let entry = flow.enter_results(&mut run).await.unwrap();
    assert!(entry.finalize_error.is_none());
    assert_eq!(entry.report.outcome.percentage(), 100);
    assert_eq!(entry.report.band, HealthBand::Healthy);

    let sessions = store.session_rows();
    assert!(sessions[0].completed);
    assert_eq!(sessions[0].final_score, Some(100));
    assert_eq!(sessions[0].band, Some(HealthBand::Healthy));

    let view = ResultsPageView::new(&entry.report, run.state().email_submitted());
    assert_eq!(view.band_label, "Healthy");
    assert_eq!(view.percentage, 100);
    assert!(!view.email_submitted);

    let capture = flow.submit_email(&mut run, "you@company.com").await.unwrap();
    let EmailCapture::Submitted {
        contact,
        result_error,
    } = capture
    else {
        panic!("expected a fresh submission");
    };
    assert!(result_error.is_none());
    assert_eq!(run.state().page(), Page::Booking);

    let contacts = store.contact_rows();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].id, contact);
    assert_eq!(contacts[0].contact.email.as_str(), "you@company.com");

    let results = store.result_rows();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result.contact, contact);
    assert_eq!(results[0].result.session, run.session().remote_id());
    assert_eq!(results[0].result.overall_score, 100);
    assert_eq!(results[0].result.breakdown, vec![20, 20, 20, 20, 20]);
}

#[tokio::test]
async fn mixed_answers_score_63_at_risk_and_record_breakdown() {
    let (flow, store) = flow_with_store();
    let mut run = flow.start().await;

    // Second-best on Q2 and Q4, third on Q3 and Q5, best on Q1.
    for pick in [0usize, 1, 2, 1, 2] {
        let label = run.state().current_question().unwrap().options()[pick]
            .label()
            .to_string();
        flow.answer(&mut run, label);
    }

    let entry = flow.enter_results(&mut run).await.unwrap();
    assert_eq!(entry.report.outcome.percentage(), 63);
    assert_eq!(entry.report.band, HealthBand::AtRisk);

    flow.submit_email(&mut run, "ops@plant.example").await.unwrap();
    let results = store.result_rows();
    assert_eq!(results[0].result.breakdown, vec![20, 14, 7, 14, 8]);
    assert_eq!(results[0].result.band, HealthBand::AtRisk);
}

#[tokio::test]
async fn unanswered_quiz_reports_zero_critical() {
    let (flow, _store) = flow_with_store();
    let run = flow.start().await;

    let report = flow.report(&run).unwrap();
    assert_eq!(report.outcome.percentage(), 0);
    assert_eq!(report.band, HealthBand::Critical);
}

#[tokio::test]
async fn direct_finish_reaches_booking_without_email() {
    let (flow, store) = flow_with_store();
    let mut run = flow.start().await;
    while run.state().page() == Page::Quiz {
        let label = run.state().current_question().unwrap().options()[3]
            .label()
            .to_string();
        flow.answer(&mut run, label);
    }

    flow.finish(&mut run).await.unwrap();
    assert_eq!(run.state().page(), Page::Booking);
    assert!(run.session().is_finalized());
    assert_eq!(run.session().final_score(), Some(0));

    // No email was captured, so no contact or result rows exist.
    assert!(store.contact_rows().is_empty());
    assert!(store.result_rows().is_empty());
    let sessions = store.session_rows();
    assert!(sessions[0].completed);
    assert_eq!(sessions[0].band, Some(HealthBand::Critical));
}

#[tokio::test]
async fn second_email_submission_is_acknowledged_not_resent() {
    let (flow, store) = flow_with_store();
    let mut run = flow.start().await;
    while run.state().page() == Page::Quiz {
        let label = run.state().current_question().unwrap().options()[0]
            .label()
            .to_string();
        flow.answer(&mut run, label);
    }
    flow.enter_results(&mut run).await.unwrap();

    flow.submit_email(&mut run, "you@company.com").await.unwrap();
    let second = flow.submit_email(&mut run, "you@company.com").await.unwrap();
    assert!(matches!(second, EmailCapture::AlreadySubmitted));

    assert_eq!(store.contact_rows().len(), 1);
    assert_eq!(store.result_rows().len(), 1);
}
