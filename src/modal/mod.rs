use chrono::NaiveDateTime;

use crate::dom::{DomError, Document};
use crate::models::MeetingResponseKind;

pub const BACKDROP: &str = "modalBackdrop";
pub const ESCAPE_KEY: &str = "Escape";

pub const BOOKING_MODAL: &str = "bookingModal";
pub const BOOKING_FORM: &str = "bookingForm";
pub const BOOKING_PROFESSOR_ID: &str = "professor_id";
pub const BOOKING_PROFESSOR_NAME: &str = "professor_name";
pub const BOOKING_DATE: &str = "meeting_date";

pub const RESPONSE_MODAL: &str = "responseModal";
pub const RESPONSE_FORM: &str = "responseForm";
pub const RESPONSE_TITLE: &str = "modalTitle";
pub const RESPONSE_LINK_GROUP: &str = "linkGroup";
pub const RESPONSE_MEETING_ID: &str = "meeting_id_response";
pub const RESPONSE_ACTION: &str = "action_response";

pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Clone, Debug)]
pub struct Modal {
    modal: String,
    backdrop: String,
    form: String,
}

impl Modal {
    pub fn bind(doc: &Document, modal: &str, backdrop: &str, form: &str) -> Result<Self, DomError> {
        doc.require(&[modal, backdrop, form])?;
        Ok(Self {
            modal: modal.to_string(),
            backdrop: backdrop.to_string(),
            form: form.to_string(),
        })
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.get(&self.modal).map(|el| el.visible).unwrap_or(false)
    }

    pub fn show(&self, doc: &mut Document) -> Result<(), DomError> {
        doc.set_visible(&self.modal, true)?;
        doc.set_visible(&self.backdrop, true)
    }

    /// Hides dialog and backdrop and resets the form. Returns `false` when it
    /// was already closed, in which case nothing changes.
    pub fn close(&self, doc: &mut Document) -> Result<bool, DomError> {
        if !self.is_open(doc) {
            return Ok(false);
        }
        doc.set_visible(&self.modal, false)?;
        doc.set_visible(&self.backdrop, false)?;
        doc.reset_form(&self.form)?;
        Ok(true)
    }

    pub fn handle_key(&self, doc: &mut Document, key: &str) -> Result<bool, DomError> {
        if key == ESCAPE_KEY {
            self.close(doc)
        } else {
            Ok(false)
        }
    }

    pub fn handle_click(&self, doc: &mut Document, target: &str) -> Result<bool, DomError> {
        if target == self.backdrop {
            self.close(doc)
        } else {
            Ok(false)
        }
    }
}

#[derive(Clone, Debug)]
pub struct BookingModal {
    modal: Modal,
}

impl BookingModal {
    pub fn bind(doc: &Document) -> Result<Self, DomError> {
        doc.require(&[BOOKING_PROFESSOR_ID, BOOKING_PROFESSOR_NAME, BOOKING_DATE])?;
        Ok(Self {
            modal: Modal::bind(doc, BOOKING_MODAL, BACKDROP, BOOKING_FORM)?,
        })
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// `now` is local wall-clock time; past slots become unselectable.
    pub fn open(
        &self,
        doc: &mut Document,
        professor_id: i64,
        professor_name: &str,
        now: NaiveDateTime,
    ) -> Result<(), DomError> {
        doc.set_value(BOOKING_PROFESSOR_ID, &professor_id.to_string())?;
        doc.set_value(BOOKING_PROFESSOR_NAME, professor_name)?;
        doc.get_mut(BOOKING_DATE)?
            .attrs
            .insert("min".to_string(), now.format(DATETIME_LOCAL_FORMAT).to_string());
        self.modal.show(doc)
    }

    pub fn close(&self, doc: &mut Document) -> Result<bool, DomError> {
        self.modal.close(doc)
    }
}

#[derive(Clone, Debug)]
pub struct ResponseModal {
    modal: Modal,
}

impl ResponseModal {
    pub fn bind(doc: &Document) -> Result<Self, DomError> {
        doc.require(&[
            RESPONSE_TITLE,
            RESPONSE_LINK_GROUP,
            RESPONSE_MEETING_ID,
            RESPONSE_ACTION,
        ])?;
        Ok(Self {
            modal: Modal::bind(doc, RESPONSE_MODAL, BACKDROP, RESPONSE_FORM)?,
        })
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn open(
        &self,
        doc: &mut Document,
        meeting_id: i64,
        action: MeetingResponseKind,
    ) -> Result<(), DomError> {
        doc.set_value(RESPONSE_MEETING_ID, &meeting_id.to_string())?;
        doc.set_value(RESPONSE_ACTION, action.as_str())?;
        let (title, link_visible) = match action {
            MeetingResponseKind::Confirm => ("✅ Confirmă Întâlnirea", true),
            MeetingResponseKind::Reject => ("❌ Respinge Întâlnirea", false),
        };
        doc.set_text(RESPONSE_TITLE, title)?;
        doc.set_visible(RESPONSE_LINK_GROUP, link_visible)?;
        self.modal.show(doc)
    }

    pub fn close(&self, doc: &mut Document) -> Result<bool, DomError> {
        self.modal.close(doc)
    }
}
