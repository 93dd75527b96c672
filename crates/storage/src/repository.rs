use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quickcheck_core::model::{
    ContactId, EmailAddress, HealthBand, NewContact, NewResult, ResultRowId, SessionRowId,
    SessionToken,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by store adapters.
///
/// Remote calls are never retried here; callers decide whether a failure
/// blocks the flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("request failed with status {status}")]
    Status { status: u16 },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of a session row, as the backends see it.
#[derive(Debug, Clone)]
pub struct SessionRow {
    pub id: SessionRowId,
    pub token: SessionToken,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
    pub final_score: Option<u8>,
    pub band: Option<HealthBand>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A stored contact with its assigned identifier.
#[derive(Debug, Clone)]
pub struct ContactRow {
    pub id: ContactId,
    pub contact: NewContact,
}

/// A stored result with its assigned identifier.
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub id: ResultRowId,
    pub result: NewResult,
}

/// Store contract for assessment session rows.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create the remote session row at quiz start.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be created.
    async fn create_session(
        &self,
        token: &SessionToken,
        created_at: DateTime<Utc>,
    ) -> Result<SessionRowId, StorageError>;

    /// Mark a session row completed with its final outcome.
    ///
    /// The at-most-once guarantee lives with the caller (the session's
    /// finalized flag), not here.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for an unknown row, or other
    /// storage errors.
    async fn finalize_session(
        &self,
        id: SessionRowId,
        score: u8,
        band: HealthBand,
        completed_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

/// Store contract for contact rows, keyed by email.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Look up a contact by exact email match.
    ///
    /// A failed query surfaces the failure rather than guessing "absent".
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup itself fails.
    async fn find_contact_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<ContactId>, StorageError>;

    /// Create a contact row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be created.
    async fn create_contact(&self, contact: &NewContact) -> Result<ContactId, StorageError>;
}

/// Store contract for result rows.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Create a result row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be created.
    async fn create_result(&self, result: &NewResult) -> Result<ResultRowId, StorageError>;
}

/// Simple in-memory store implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<InMemoryInner>>,
}

#[derive(Default)]
struct InMemoryInner {
    next_id: i64,
    sessions: Vec<SessionRow>,
    contacts: Vec<ContactRow>,
    results: Vec<ResultRow>,
}

impl InMemoryInner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryInner>, StorageError> {
        self.inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// Snapshot of all session rows, for assertions in tests.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn session_rows(&self) -> Vec<SessionRow> {
        self.inner.lock().expect("store lock poisoned").sessions.clone()
    }

    /// Snapshot of all contact rows, for assertions in tests.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn contact_rows(&self) -> Vec<ContactRow> {
        self.inner.lock().expect("store lock poisoned").contacts.clone()
    }

    /// Snapshot of all result rows, for assertions in tests.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn result_rows(&self) -> Vec<ResultRow> {
        self.inner.lock().expect("store lock poisoned").results.clone()
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn create_session(
        &self,
        token: &SessionToken,
        created_at: DateTime<Utc>,
    ) -> Result<SessionRowId, StorageError> {
        let mut guard = self.lock()?;
        let id = SessionRowId::new(guard.next_id());
        guard.sessions.push(SessionRow {
            id,
            token: token.clone(),
            created_at,
            completed: false,
            final_score: None,
            band: None,
            completed_at: None,
        });
        Ok(id)
    }

    async fn finalize_session(
        &self,
        id: SessionRowId,
        score: u8,
        band: HealthBand,
        completed_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        let row = guard
            .sessions
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StorageError::NotFound)?;
        row.completed = true;
        row.final_score = Some(score);
        row.band = Some(band);
        row.completed_at = Some(completed_at);
        Ok(())
    }
}

#[async_trait]
impl ContactStore for InMemoryStore {
    async fn find_contact_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<ContactId>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .contacts
            .iter()
            .find(|row| row.contact.email == *email)
            .map(|row| row.id))
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<ContactId, StorageError> {
        let mut guard = self.lock()?;
        let id = ContactId::new(guard.next_id());
        guard.contacts.push(ContactRow {
            id,
            contact: contact.clone(),
        });
        Ok(id)
    }
}

#[async_trait]
impl ResultStore for InMemoryStore {
    async fn create_result(&self, result: &NewResult) -> Result<ResultRowId, StorageError> {
        let mut guard = self.lock()?;
        let id = ResultRowId::new(guard.next_id());
        guard.results.push(ResultRow {
            id,
            result: result.clone(),
        });
        Ok(id)
    }
}

/// Aggregates the three record stores behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Store {
    pub sessions: Arc<dyn SessionStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub results: Arc<dyn ResultStore>,
}

impl Store {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryStore::new();
        let sessions: Arc<dyn SessionStore> = Arc::new(repo.clone());
        let contacts: Arc<dyn ContactStore> = Arc::new(repo.clone());
        let results: Arc<dyn ResultStore> = Arc::new(repo);
        Self {
            sessions,
            contacts,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_core::time::fixed_now;

    #[test]
    fn store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryStore>();
    }

    #[tokio::test]
    async fn finalize_unknown_session_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .finalize_session(SessionRowId::new(7), 50, HealthBand::AtRisk, fixed_now())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn created_session_can_be_finalized() {
        let store = InMemoryStore::new();
        let token = SessionToken::mint();
        let id = store.create_session(&token, fixed_now()).await.unwrap();

        store
            .finalize_session(id, 63, HealthBand::AtRisk, fixed_now())
            .await
            .unwrap();

        let rows = store.session_rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].completed);
        assert_eq!(rows[0].final_score, Some(63));
        assert_eq!(rows[0].band, Some(HealthBand::AtRisk));
    }

    #[tokio::test]
    async fn contact_lookup_distinguishes_absent_from_present() {
        let store = InMemoryStore::new();
        let email = EmailAddress::parse("you@company.com").unwrap();
        assert_eq!(store.find_contact_by_email(&email).await.unwrap(), None);

        let id = store
            .create_contact(&NewContact::from_email(email.clone(), fixed_now()))
            .await
            .unwrap();
        assert_eq!(store.find_contact_by_email(&email).await.unwrap(), Some(id));
    }
}
