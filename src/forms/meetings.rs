use std::time::Duration;

use super::{
    reject_invalid, schedule_navigation, Fallbacks, Submission, SubmitButton, SubmitOutcome,
    MSG_GENERIC_FAILURE,
};
use crate::api::ApiClient;
use crate::banner::{MessageBanner, MESSAGE_CONTAINER};
use crate::dom::{DomError, Navigation, Page};
use crate::modal::{ResponseModal, RESPONSE_ACTION, RESPONSE_MEETING_ID};
use crate::models::{MeetingAction, MeetingResponseKind};
use crate::validation;

pub const RESPONSE_SUBMIT: &str = "submitResponse";
pub const RESPONSE_MESSAGE: &str = "response_message";
pub const MEETING_LINK: &str = "meeting_link";

pub const RELOAD_DELAY: Duration = Duration::from_secs(2);

pub const CANCEL_PROMPT: &str =
    "Ești sigur că vrei să anulezi această întâlnire? Punctele vor fi returnate.";
pub const MSG_INVALID_ACTION: &str = "Acțiune invalidă!";

const RESPOND_FALLBACKS: Fallbacks = Fallbacks {
    success: "Răspunsul a fost trimis!",
    failure: MSG_GENERIC_FAILURE,
    transport: "Nu s-a putut trimite răspunsul.",
};

const CANCEL_FALLBACKS: Fallbacks = Fallbacks {
    success: "Întâlnirea a fost anulată.",
    failure: MSG_GENERIC_FAILURE,
    transport: "Nu s-a putut anula întâlnirea.",
};

pub struct ResponseForm {
    api: ApiClient,
    page: Page,
    banner: MessageBanner,
    button: SubmitButton,
    modal: ResponseModal,
}

impl ResponseForm {
    pub async fn bind(api: ApiClient, page: Page) -> Result<Self, DomError> {
        let modal = {
            let doc = page.lock().await;
            doc.require(&[RESPONSE_SUBMIT, RESPONSE_MESSAGE, MEETING_LINK, MESSAGE_CONTAINER])?;
            ResponseModal::bind(&doc)?
        };
        Ok(Self {
            api,
            page,
            banner: MessageBanner::new(MESSAGE_CONTAINER),
            button: SubmitButton::new(RESPONSE_SUBMIT, "Se trimite..."),
            modal,
        })
    }

    pub fn modal(&self) -> &ResponseModal {
        &self.modal
    }

    pub async fn open(&self, meeting_id: i64, action: MeetingResponseKind) -> Result<(), DomError> {
        let mut doc = self.page.lock().await;
        self.modal.open(&mut doc, meeting_id, action)
    }

    /// Reads the dialog into a `MeetingAction`; the link is dropped for
    /// rejections.
    pub async fn read_action(&self) -> Result<Option<MeetingAction>, DomError> {
        let doc = self.page.lock().await;
        let meeting_id = validation::parse_leading_int(&doc.value(RESPONSE_MEETING_ID)?);
        let action = MeetingResponseKind::parse(&doc.value(RESPONSE_ACTION)?);
        let (Some(meeting_id), Some(action)) = (meeting_id, action) else {
            return Ok(None);
        };
        let link = doc.value(MEETING_LINK)?.trim().to_string();
        let meeting_link = match action {
            MeetingResponseKind::Confirm if !link.is_empty() => Some(link),
            _ => None,
        };
        Ok(Some(MeetingAction {
            meeting_id,
            action,
            message: doc.value(RESPONSE_MESSAGE)?,
            meeting_link,
        }))
    }

    pub async fn submit(&self) -> Result<SubmitOutcome, DomError> {
        let Some(action) = self.read_action().await? else {
            return reject_invalid(&self.page, &self.banner, MSG_INVALID_ACTION).await;
        };

        let (outcome, resp) = Submission {
            page: &self.page,
            banner: &self.banner,
            button: Some(&self.button),
            fallbacks: RESPOND_FALLBACKS,
        }
        .send(self.api.respond_meeting(&action))
        .await?;

        if resp.is_some() {
            self.modal.close(&mut *self.page.lock().await)?;
            schedule_navigation(&self.page, Navigation::Reload, RELOAD_DELAY);
        }
        Ok(outcome)
    }
}

pub struct MeetingActions {
    api: ApiClient,
    page: Page,
    banner: MessageBanner,
}

impl MeetingActions {
    pub async fn bind(api: ApiClient, page: Page) -> Result<Self, DomError> {
        page.lock().await.require(&[MESSAGE_CONTAINER])?;
        Ok(Self {
            api,
            page,
            banner: MessageBanner::new(MESSAGE_CONTAINER),
        })
    }

    /// `confirm` receives the prompt text; returning `false` sends nothing.
    pub async fn cancel<C>(&self, meeting_id: i64, confirm: C) -> Result<SubmitOutcome, DomError>
    where
        C: FnOnce(&str) -> bool,
    {
        if !confirm(CANCEL_PROMPT) {
            return Ok(SubmitOutcome::Declined);
        }
        let (outcome, resp) = Submission {
            page: &self.page,
            banner: &self.banner,
            button: None,
            fallbacks: CANCEL_FALLBACKS,
        }
        .send(self.api.cancel_meeting(meeting_id))
        .await?;

        if resp.is_some() {
            schedule_navigation(&self.page, Navigation::Reload, RELOAD_DELAY);
        }
        Ok(outcome)
    }
}
