//! Outbound deep link to the external booking calendar.
//!
//! The link carries the session token as a query parameter so the booked
//! call can be correlated with the assessment; it is opened by the
//! presentation layer in a new browsing context and never fetched here.

use url::Url;

use quickcheck_core::model::SessionToken;

use crate::error::BookingError;

const DEFAULT_BOOKING_URL: &str = "https://calcom.goxmit.com/oje-admin/claritymeeting";

/// Base address of the booking calendar.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    base_url: Url,
}

impl BookingConfig {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Read `QUICKCHECK_BOOKING_URL` from the environment, falling back to
    /// the default calendar.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidBase` when the configured value does
    /// not parse as a URL.
    pub fn from_env() -> Result<Self, BookingError> {
        let raw = std::env::var("QUICKCHECK_BOOKING_URL")
            .unwrap_or_else(|_| DEFAULT_BOOKING_URL.into());
        Ok(Self {
            base_url: Url::parse(&raw)?,
        })
    }

    /// The booking link for one session.
    #[must_use]
    pub fn link_for(&self, token: &SessionToken) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("session_token", token.as_str());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_carries_the_session_token() {
        let config = BookingConfig::new(Url::parse("https://cal.example.com/team/intro").unwrap());
        let token = SessionToken::from_string("abc-123".into());
        let link = config.link_for(&token);
        assert_eq!(
            link.as_str(),
            "https://cal.example.com/team/intro?session_token=abc-123"
        );
    }

    #[test]
    fn link_preserves_existing_query_params() {
        let config =
            BookingConfig::new(Url::parse("https://cal.example.com/intro?utm=check").unwrap());
        let token = SessionToken::from_string("t".into());
        let link = config.link_for(&token);
        assert_eq!(
            link.as_str(),
            "https://cal.example.com/intro?utm=check&session_token=t"
        );
    }
}
