use std::time::Duration;

use chrono::NaiveDateTime;

use super::{
    reject_invalid, schedule_navigation, Fallbacks, Submission, SubmitButton, SubmitOutcome,
    MSG_GENERIC_FAILURE,
};
use crate::api::ApiClient;
use crate::banner::{MessageBanner, BOOKING_AUTO_HIDE, MESSAGE_CONTAINER};
use crate::dom::{DomError, Navigation, Page};
use crate::modal::{BookingModal, BOOKING_DATE, BOOKING_FORM, BOOKING_PROFESSOR_ID};
use crate::models::BookingRequest;
use crate::validation;

pub const BOOKING_SUBMIT: &str = "submitBooking";
pub const BOOKING_MESSAGE: &str = "message";
pub const POINTS_ANCHOR: &str = "headerPoints";

pub const BOOKING_REDIRECT: &str = "/meetings";
pub const BOOKING_REDIRECT_DELAY: Duration = Duration::from_secs(2);

pub const MSG_INVALID_PROFESSOR: &str = "Profesor invalid!";

const BOOKING_FALLBACKS: Fallbacks = Fallbacks {
    success: "Cererea a fost trimisă!",
    failure: MSG_GENERIC_FAILURE,
    transport: "Nu s-a putut trimite cererea. Verifică conexiunea la internet.",
};

pub struct BookingForm {
    api: ApiClient,
    page: Page,
    banner: MessageBanner,
    button: SubmitButton,
    modal: BookingModal,
}

impl BookingForm {
    pub async fn bind(api: ApiClient, page: Page) -> Result<Self, DomError> {
        let modal = {
            let doc = page.lock().await;
            doc.require(&[BOOKING_SUBMIT, BOOKING_MESSAGE, MESSAGE_CONTAINER])?;
            BookingModal::bind(&doc)?
        };
        Ok(Self {
            api,
            page,
            banner: MessageBanner::new(MESSAGE_CONTAINER).with_auto_hide(BOOKING_AUTO_HIDE),
            button: SubmitButton::new(BOOKING_SUBMIT, "Se trimite..."),
            modal,
        })
    }

    pub fn modal(&self) -> &BookingModal {
        &self.modal
    }

    pub async fn open(
        &self,
        professor_id: i64,
        professor_name: &str,
        now: NaiveDateTime,
    ) -> Result<(), DomError> {
        let mut doc = self.page.lock().await;
        self.modal.open(&mut doc, professor_id, professor_name, now)
    }

    pub async fn submit(&self) -> Result<SubmitOutcome, DomError> {
        let (professor_id, meeting_date, message) = {
            let doc = self.page.lock().await;
            (
                doc.value(BOOKING_PROFESSOR_ID)?,
                doc.value(BOOKING_DATE)?,
                doc.value(BOOKING_MESSAGE)?,
            )
        };

        if let Err(e) = validation::validate_booking(professor_id.trim(), meeting_date.trim()) {
            return reject_invalid(&self.page, &self.banner, &e.message).await;
        }
        let Some(professor_id) = validation::parse_leading_int(&professor_id) else {
            return reject_invalid(&self.page, &self.banner, MSG_INVALID_PROFESSOR).await;
        };

        let req = BookingRequest {
            professor_id,
            meeting_date: meeting_date.trim().to_string(),
            message,
        };
        let (outcome, resp) = Submission {
            page: &self.page,
            banner: &self.banner,
            button: Some(&self.button),
            fallbacks: BOOKING_FALLBACKS,
        }
        .send(self.api.create_meeting(&req))
        .await?;

        if let Some(resp) = resp {
            let mut doc = self.page.lock().await;
            self.modal.close(&mut doc)?;
            if let (Some(points), true) = (resp.remaining_points, doc.contains(POINTS_ANCHOR)) {
                doc.set_text(POINTS_ANCHOR, &points.to_string())?;
            }
            drop(doc);
            schedule_navigation(
                &self.page,
                Navigation::Assign(BOOKING_REDIRECT.to_string()),
                BOOKING_REDIRECT_DELAY,
            );
        }
        Ok(outcome)
    }
}
