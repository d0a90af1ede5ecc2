pub mod account;
pub mod booking;
pub mod meetings;

use std::future::Future;
use std::time::Duration;

use crate::api::ApiError;
use crate::banner::{BannerKind, MessageBanner};
use crate::dom::{DomError, Document, Navigation, Page};
use crate::models::ApiResponse;

pub use account::{LoginForm, RegisterForm};
pub use booking::BookingForm;
pub use meetings::{MeetingActions, ResponseForm};

pub const SUBMIT_BUTTON: &str = "submitBtn";
pub const LOADING_CLASS: &str = "loading";

pub const MSG_CONNECTION: &str =
    "Nu s-a putut conecta la server. Verifică conexiunea la internet.";
pub const MSG_GENERIC_FAILURE: &str = "A apărut o eroare. Te rugăm să încerci din nou.";

/// How a submission ended. Every variant except `Succeeded` leaves the form
/// usable again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(String),
    Rejected(String),
    TransportFailed(String),
    Succeeded(String),
    Declined,
}

impl SubmitOutcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Invalid(m)
            | SubmitOutcome::Rejected(m)
            | SubmitOutcome::TransportFailed(m)
            | SubmitOutcome::Succeeded(m) => Some(m),
            SubmitOutcome::Declined => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

#[derive(Clone, Debug)]
pub struct SubmitButton {
    id: String,
    busy_label: &'static str,
}

impl SubmitButton {
    pub fn new(id: &str, busy_label: &'static str) -> Self {
        Self {
            id: id.to_string(),
            busy_label,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the label to restore afterwards.
    pub fn begin(&self, doc: &mut Document) -> Result<String, DomError> {
        let el = doc.get_mut(&self.id)?;
        let label = el.text();
        el.disabled = true;
        el.add_class(LOADING_CLASS);
        el.set_text(self.busy_label);
        Ok(label)
    }

    pub fn restore(&self, doc: &mut Document, label: &str) -> Result<(), DomError> {
        let el = doc.get_mut(&self.id)?;
        el.disabled = false;
        el.remove_class(LOADING_CLASS);
        el.set_text(label);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Fallbacks {
    pub success: &'static str,
    pub failure: &'static str,
    pub transport: &'static str,
}

pub(crate) struct Submission<'a> {
    pub page: &'a Page,
    pub banner: &'a MessageBanner,
    pub button: Option<&'a SubmitButton>,
    pub fallbacks: Fallbacks,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|m| !m.trim().is_empty()).cloned()
}

impl Submission<'_> {
    /// Locks the button, awaits the request and reports through the banner.
    /// The response is handed back only on success so callers can apply
    /// follow-up effects.
    pub(crate) async fn send<R, F>(self, request: F) -> Result<(SubmitOutcome, Option<R>), DomError>
    where
        R: ApiResponse,
        F: Future<Output = Result<R, ApiError>>,
    {
        let label = match self.button {
            Some(button) => Some(button.begin(&mut *self.page.lock().await)?),
            None => None,
        };

        let (outcome, response) = match request.await {
            Ok(resp) if resp.status().success => {
                let msg = non_empty(resp.status().message.as_ref())
                    .unwrap_or_else(|| self.fallbacks.success.to_string());
                (SubmitOutcome::Succeeded(msg), Some(resp))
            }
            Ok(resp) => {
                let msg = non_empty(resp.status().error.as_ref())
                    .unwrap_or_else(|| self.fallbacks.failure.to_string());
                tracing::warn!(error = %msg, "request rejected by server");
                (SubmitOutcome::Rejected(msg), None)
            }
            Err(e) => {
                tracing::error!(error = %e, "request failed");
                (
                    SubmitOutcome::TransportFailed(self.fallbacks.transport.to_string()),
                    None,
                )
            }
        };

        let kind = if outcome.is_success() {
            BannerKind::Success
        } else {
            BannerKind::Error
        };
        if let Some(msg) = outcome.message() {
            self.banner.show(self.page, msg, kind).await?;
        }
        if let (Some(button), Some(label), false) = (self.button, label, outcome.is_success()) {
            button.restore(&mut *self.page.lock().await, &label)?;
        }
        Ok((outcome, response))
    }
}

pub(crate) async fn reject_invalid(
    page: &Page,
    banner: &MessageBanner,
    message: &str,
) -> Result<SubmitOutcome, DomError> {
    banner.show(page, message, BannerKind::Error).await?;
    Ok(SubmitOutcome::Invalid(message.to_string()))
}

pub fn schedule_navigation(page: &Page, navigation: Navigation, delay: Duration) {
    let page = page.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        tracing::info!(?navigation, "navigating");
        page.lock().await.navigate(navigation);
    });
}
