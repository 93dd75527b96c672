use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use quickcheck_core::model::{HealthBand, SessionRowId, SessionToken};

use super::wire::date_string;
use super::BaserowStore;
use crate::repository::{SessionStore, StorageError};

#[derive(Debug, Serialize)]
struct CreateSessionPayload<'a> {
    session_token: &'a str,
    created_date: String,
}

#[derive(Debug, Serialize)]
struct FinalizeSessionPayload {
    completed: bool,
    final_score: u8,
    health_band: &'static str,
    completed_at: String,
}

#[async_trait]
impl SessionStore for BaserowStore {
    async fn create_session(
        &self,
        token: &SessionToken,
        created_at: DateTime<Utc>,
    ) -> Result<SessionRowId, StorageError> {
        let payload = CreateSessionPayload {
            session_token: token.as_str(),
            created_date: date_string(created_at),
        };
        let id = self.create_row(&self.config.sessions_table, &payload).await?;
        Ok(SessionRowId::new(id))
    }

    async fn finalize_session(
        &self,
        id: SessionRowId,
        score: u8,
        band: HealthBand,
        completed_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let payload = FinalizeSessionPayload {
            completed: true,
            final_score: score,
            health_band: band.label(),
            completed_at: date_string(completed_at),
        };
        self.update_row(&self.config.sessions_table, id.value(), &payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_core::time::fixed_now;

    #[test]
    fn create_payload_carries_token_and_day() {
        let token = SessionToken::mint();
        let payload = CreateSessionPayload {
            session_token: token.as_str(),
            created_date: date_string(fixed_now()),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["session_token"], token.as_str());
        assert_eq!(json["created_date"], "2024-01-15");
    }

    #[test]
    fn finalize_payload_uses_band_label() {
        let payload = FinalizeSessionPayload {
            completed: true,
            final_score: 63,
            health_band: HealthBand::AtRisk.label(),
            completed_at: date_string(fixed_now()),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["completed"], true);
        assert_eq!(json["final_score"], 63);
        assert_eq!(json["health_band"], "At Risk");
    }
}
