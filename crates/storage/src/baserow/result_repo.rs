use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use quickcheck_core::model::{NewResult, ResultRowId, ASSESSMENT_VERSION};

use super::wire::date_string;
use super::BaserowStore;
use crate::repository::{ResultStore, StorageError};

/// Result rows link to their contact and session rows through list-valued
/// link fields; an absent session link is written as an empty list.
#[derive(Debug, Serialize)]
struct CreateResultPayload<'a> {
    contact: Vec<i64>,
    assessment_sessions: Vec<i64>,
    session_token: &'a str,
    overall_score: u8,
    max_score_possible: u32,
    health_band: &'static str,
    assessment_version: &'static str,
    report_status: &'static str,
    created_date: String,
    #[serde(flatten)]
    question_scores: BTreeMap<String, u32>,
}

fn question_scores(breakdown: &[u32]) -> BTreeMap<String, u32> {
    breakdown
        .iter()
        .enumerate()
        .map(|(ordinal, points)| (format!("q{}_score", ordinal + 1), *points))
        .collect()
}

#[async_trait]
impl ResultStore for BaserowStore {
    async fn create_result(&self, result: &NewResult) -> Result<ResultRowId, StorageError> {
        let payload = CreateResultPayload {
            contact: vec![result.contact.value()],
            assessment_sessions: result
                .session
                .map(|id| vec![id.value()])
                .unwrap_or_default(),
            session_token: result.session_token.as_str(),
            overall_score: result.overall_score,
            max_score_possible: result.max_score,
            health_band: result.band.label(),
            assessment_version: ASSESSMENT_VERSION,
            report_status: result.report_status.as_str(),
            created_date: date_string(result.created_at),
            question_scores: question_scores(&result.breakdown),
        };
        let id = self.create_row(&self.config.results_table, &payload).await?;
        Ok(ResultRowId::new(id))
    }
}
