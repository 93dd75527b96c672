use async_trait::async_trait;
use serde::Serialize;

use quickcheck_core::model::{ContactId, EmailAddress, NewContact};

use super::wire::date_string;
use super::BaserowStore;
use crate::repository::{ContactStore, StorageError};

#[derive(Debug, Serialize)]
struct CreateContactPayload<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    company_name: &'a str,
    created_date: String,
}

#[async_trait]
impl ContactStore for BaserowStore {
    async fn find_contact_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<ContactId>, StorageError> {
        let id = self
            .first_matching_row(
                &self.config.contacts_table,
                "filter__email__equal",
                email.as_str(),
            )
            .await?;
        Ok(id.map(ContactId::new))
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<ContactId, StorageError> {
        let payload = CreateContactPayload {
            email: contact.email.as_str(),
            first_name: &contact.first_name,
            last_name: &contact.last_name,
            company_name: &contact.company_name,
            created_date: date_string(contact.created_at),
        };
        let id = self.create_row(&self.config.contacts_table, &payload).await?;
        Ok(ContactId::new(id))
    }
}
