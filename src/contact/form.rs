use std::time::Duration;

use crate::{
    animation::{
        playhead::Autoplay,
        sink::PropertySink,
        timeline::{TimedBuilder, TimelineEntry},
        value::{Property, Value},
    },
    contact::relay::{FormRelay, RelayConfig, RelayResponse},
    foundation::{core::TargetId, error::ScrollworkResult},
    schedule::effect::ScrollEffect,
    scroll::source::{FrameCtx, ScrollRequest},
};

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;
/// How long a success or error status stays up before the form returns to idle.
pub const STATUS_DISPLAY: Duration = Duration::from_secs(5);
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);
/// Horizontal keyframes of the validation shake, in pixels.
const SHAKE_KEYS: [f64; 6] = [0.0, -10.0, 10.0, -10.0, 10.0, 0.0];
const SEND_FAILED: &str = "Failed to send message. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

/// Per-field validation messages; `None` means the field is fine.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }

    fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Email => self.email = None,
            Field::Message => self.message = None,
        }
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();
        FieldErrors {
            name: if name.is_empty() {
                Some("Name is required".to_owned())
            } else if name.chars().count() < NAME_MIN_CHARS {
                Some(format!("Name must be at least {NAME_MIN_CHARS} characters"))
            } else {
                None
            },
            email: if email.is_empty() {
                Some("Email is required".to_owned())
            } else if !is_email_shaped(email) {
                Some("Invalid email format".to_owned())
            } else {
                None
            },
            message: if message.is_empty() {
                Some("Message is required".to_owned())
            } else if message.chars().count() < MESSAGE_MIN_CHARS {
                Some(format!(
                    "Message must be at least {MESSAGE_MIN_CHARS} characters"
                ))
            } else {
                None
            },
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// Contact form state machine: `Idle -> Submitting -> Success | Error -> Idle`.
///
/// Validation failures never reach the relay; they set per-field errors and shake the form.
pub struct FormController {
    config: RelayConfig,
    form: ContactForm,
    errors: FieldErrors,
    status: FormStatus,
    status_since: Duration,
    shake: Autoplay,
    last_tick: Option<Duration>,
}

fn shake_timeline(target: TargetId) -> ScrollworkResult<Autoplay> {
    let step = SHAKE_DURATION / (SHAKE_KEYS.len() as u32 - 1);
    let timed = SHAKE_KEYS
        .windows(2)
        .enumerate()
        .fold(TimedBuilder::new(), |b, (i, pair)| {
            b.tween(
                TimelineEntry::new(
                    target,
                    Property::TranslateX,
                    Value::Scalar(pair[0]),
                    Value::Scalar(pair[1]),
                ),
                step * i as u32,
                step,
            )
        })
        .build()?;
    Autoplay::new(timed)
}

impl FormController {
    /// `form_target` is the element the validation shake moves.
    pub fn new(config: RelayConfig, form_target: TargetId) -> ScrollworkResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            form: ContactForm::default(),
            errors: FieldErrors::default(),
            status: FormStatus::Idle,
            status_since: Duration::ZERO,
            shake: shake_timeline(form_target)?,
            last_tick: None,
        })
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.playhead.is_playing()
    }

    /// Edit one field. Its error clears as soon as the user types.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.form.name = value,
            Field::Email => self.form.email = value,
            Field::Message => self.form.message = value,
        }
        self.errors.clear(field);
    }

    fn set_status(&mut self, status: FormStatus, now: Duration) {
        tracing::debug!(from = ?self.status, to = ?status, "form status");
        self.status = status;
        self.status_since = now;
    }

    /// Validate and enter `Submitting`. Returns `false` if nothing should be sent.
    pub fn begin_submit(&mut self, now: Duration) -> bool {
        if self.status == FormStatus::Submitting {
            return false;
        }
        let errors = self.form.validate();
        if !errors.is_empty() {
            tracing::debug!(?errors, "contact form rejected");
            self.errors = errors;
            self.shake.playhead.restart();
            return false;
        }
        self.errors = FieldErrors::default();
        self.set_status(FormStatus::Submitting, now);
        true
    }

    /// Apply the relay outcome of a submission started with [`FormController::begin_submit`].
    pub fn finish_submit(&mut self, outcome: ScrollworkResult<RelayResponse>, now: Duration) {
        if self.status != FormStatus::Submitting {
            return;
        }
        match outcome {
            Ok(reply) if reply.success => {
                self.form.clear();
                self.set_status(FormStatus::Success, now);
            }
            Ok(reply) => {
                let msg = reply.message.unwrap_or_else(|| SEND_FAILED.to_owned());
                tracing::warn!(%msg, "relay rejected submission");
                self.set_status(FormStatus::Error(msg), now);
            }
            Err(err) => {
                tracing::warn!(error = %err, "relay request failed");
                self.set_status(FormStatus::Error(SEND_FAILED.to_owned()), now);
            }
        }
    }

    /// Validate, send once through `relay`, and apply the outcome.
    pub fn submit(&mut self, relay: &dyn FormRelay, now: Duration) -> &FormStatus {
        if self.begin_submit(now) {
            let payload = self.config.payload(&self.form);
            let outcome = relay.send(&self.config.endpoint, &payload);
            self.finish_submit(outcome, now);
        }
        &self.status
    }

    /// Advance the shake and expire a finished status.
    pub fn tick(&mut self, now: Duration, sink: &mut dyn PropertySink) {
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |t| now.saturating_sub(t));
        self.last_tick = Some(now);
        if matches!(self.status, FormStatus::Success | FormStatus::Error(_))
            && now.saturating_sub(self.status_since) >= STATUS_DISPLAY
        {
            self.set_status(FormStatus::Idle, now);
        }
        self.shake.tick(dt, sink);
    }
}

impl ScrollEffect for FormController {
    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        self.tick(ctx.now(), sink);
        None
    }

    fn label(&self) -> &'static str {
        "contact-form"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/form.rs"]
mod tests;
