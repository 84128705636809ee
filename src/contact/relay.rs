use crate::{
    contact::form::ContactForm,
    foundation::error::{ScrollworkError, ScrollworkResult},
};

/// Public form-to-email relay the contact form posts to.
pub const DEFAULT_ENDPOINT: &str = "https://api.web3forms.com/submit";
pub const DEFAULT_SUBJECT: &str = "New Contact Form Submission from Portfolio";

/// Where and as whom the contact form is relayed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub access_key: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_owned()
}

impl RelayConfig {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            endpoint: default_endpoint(),
            access_key: access_key.into(),
            subject: default_subject(),
        }
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        if self.access_key.trim().is_empty() {
            return Err(ScrollworkError::validation("relay access_key must not be empty"));
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(ScrollworkError::validation(format!(
                "relay endpoint must be an http(s) URL (got '{}')",
                self.endpoint
            )));
        }
        Ok(())
    }

    /// JSON body for one submission of `form`.
    pub fn payload(&self, form: &ContactForm) -> RelayPayload {
        RelayPayload {
            access_key: self.access_key.clone(),
            name: form.name.trim().to_owned(),
            email: form.email.trim().to_owned(),
            message: form.message.trim().to_owned(),
            subject: self.subject.clone(),
        }
    }
}

/// Request body accepted by the relay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RelayPayload {
    pub access_key: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: String,
}

/// Relay reply. Only `success` is relied upon.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Delivers one contact-form submission. Implementations make a single attempt.
pub trait FormRelay {
    fn send(&self, endpoint: &str, payload: &RelayPayload) -> ScrollworkResult<RelayResponse>;
}

/// Blocking HTTPS relay client.
#[cfg(feature = "http-relay")]
#[derive(Clone, Debug, Default)]
pub struct HttpRelay {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http-relay")]
impl HttpRelay {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "http-relay")]
impl FormRelay for HttpRelay {
    #[tracing::instrument(skip(self, payload), fields(email = %payload.email))]
    fn send(&self, endpoint: &str, payload: &RelayPayload) -> ScrollworkResult<RelayResponse> {
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .map_err(|e| ScrollworkError::relay(e.to_string()))?;

        let status = response.status();
        let body: RelayResponse = response
            .json()
            .map_err(|e| ScrollworkError::relay(format!("HTTP {status}: {e}")))?;
        tracing::debug!(%status, success = body.success, "relay replied");
        Ok(body)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/relay.rs"]
mod tests;
