use super::PageKind;
use crate::banner::MESSAGE_CONTAINER;
use crate::dom::{Document, Element};
use crate::enhance::BODY;
use crate::forms::account::{
    CONFIRM_PASSWORD, EMAIL, FIRST_NAME, LAST_NAME, LOGIN_FORM, PASSWORD, REGISTER_FORM,
};
use crate::forms::booking::{BOOKING_MESSAGE, BOOKING_SUBMIT, POINTS_ANCHOR};
use crate::forms::meetings::{MEETING_LINK, RESPONSE_MESSAGE, RESPONSE_SUBMIT};
use crate::forms::SUBMIT_BUTTON;
use crate::list::professors::{FILTER_CLASS, GRID};
use crate::list::students::{PAGINATION, TABLE_BODY, USER_RANK};
use crate::list::{ACTIVE_CLASS, TAB_BUTTON_CLASS, TAB_CONTENT_CLASS};
use crate::modal::*;

pub const BOOKING_CANCEL: &str = "cancelBooking";
pub const RESPONSE_CANCEL: &str = "cancelResponse";

pub const STUDENTS_TAB_BUTTON: &str = "tab-students";
pub const PROFESSORS_TAB_BUTTON: &str = "tab-professors";

pub const LEVELS: [&str; 7] = ["all", "A1", "A2", "B1", "B2", "C1", "C2"];

pub fn filter_button_id(level: &str) -> String {
    format!("filter-{level}")
}

fn shell() -> Document {
    Document::new()
        .with(BODY, Element::new("body"))
        .with(MESSAGE_CONTAINER, Element::new("div").hidden())
}

fn field(input_type: &str, form: &str) -> Element {
    Element::input(input_type).in_form(form).required()
}

fn submit(form: &str, label: &str) -> Element {
    Element::new("button")
        .with_attr("type", "submit")
        .in_form(form)
        .with_text(label)
}

pub fn login() -> Document {
    shell()
        .with(LOGIN_FORM, Element::new("form"))
        .with(EMAIL, field("email", LOGIN_FORM))
        .with(PASSWORD, field("password", LOGIN_FORM))
        .with(SUBMIT_BUTTON, submit(LOGIN_FORM, "Autentificare"))
}

pub fn register() -> Document {
    shell()
        .with(REGISTER_FORM, Element::new("form"))
        .with(FIRST_NAME, field("text", REGISTER_FORM))
        .with(LAST_NAME, field("text", REGISTER_FORM))
        .with(EMAIL, field("email", REGISTER_FORM))
        .with(PASSWORD, field("password", REGISTER_FORM))
        .with(CONFIRM_PASSWORD, field("password", REGISTER_FORM))
        .with(SUBMIT_BUTTON, submit(REGISTER_FORM, "Creează Cont"))
}

pub fn leaderboard() -> Document {
    let mut doc = shell()
        .with(
            "students-tab",
            Element::new("div")
                .with_class(TAB_CONTENT_CLASS)
                .with_class(ACTIVE_CLASS),
        )
        .with("professors-tab", Element::new("div").with_class(TAB_CONTENT_CLASS))
        .with(
            STUDENTS_TAB_BUTTON,
            Element::new("button")
                .with_class(TAB_BUTTON_CLASS)
                .with_class(ACTIVE_CLASS)
                .with_text("Studenți"),
        )
        .with(
            PROFESSORS_TAB_BUTTON,
            Element::new("button")
                .with_class(TAB_BUTTON_CLASS)
                .with_text("Profesori"),
        )
        .with(TABLE_BODY, Element::new("tbody"))
        .with(PAGINATION, Element::new("div"))
        .with(USER_RANK, Element::new("span").with_text("-"))
        .with(GRID, Element::new("div"));
    for level in LEVELS {
        let mut button = Element::new("button")
            .with_class(FILTER_CLASS)
            .with_attr("data-level", level)
            .with_text(if level == "all" { "Toate" } else { level });
        if level == "all" {
            button.add_class(ACTIVE_CLASS);
        }
        doc.insert(&filter_button_id(level), button);
    }
    doc
}

pub fn professors() -> Document {
    shell()
        .with(BACKDROP, Element::new("div").hidden())
        .with(BOOKING_MODAL, Element::new("div").hidden())
        .with(BOOKING_FORM, Element::new("form"))
        .with(BOOKING_PROFESSOR_ID, Element::input("hidden").in_form(BOOKING_FORM))
        .with(BOOKING_PROFESSOR_NAME, Element::input("text").in_form(BOOKING_FORM))
        .with(BOOKING_DATE, field("datetime-local", BOOKING_FORM))
        .with(BOOKING_MESSAGE, Element::new("textarea").in_form(BOOKING_FORM))
        .with(BOOKING_SUBMIT, submit(BOOKING_FORM, "Trimite Cererea"))
        .with(
            BOOKING_CANCEL,
            Element::new("button")
                .with_attr("type", "button")
                .with_text("Anulează"),
        )
        .with(POINTS_ANCHOR, Element::new("strong").with_text("0"))
}

pub fn meetings() -> Document {
    shell()
        .with(BACKDROP, Element::new("div").hidden())
        .with(RESPONSE_MODAL, Element::new("div").hidden())
        .with(RESPONSE_FORM, Element::new("form"))
        .with(RESPONSE_TITLE, Element::new("h2"))
        .with(RESPONSE_LINK_GROUP, Element::new("div"))
        .with(RESPONSE_MEETING_ID, Element::input("hidden").in_form(RESPONSE_FORM))
        .with(RESPONSE_ACTION, Element::input("hidden").in_form(RESPONSE_FORM))
        .with(RESPONSE_MESSAGE, Element::new("textarea").in_form(RESPONSE_FORM))
        .with(MEETING_LINK, Element::input("url").in_form(RESPONSE_FORM))
        .with(RESPONSE_SUBMIT, submit(RESPONSE_FORM, "Trimite"))
        .with(
            RESPONSE_CANCEL,
            Element::new("button")
                .with_attr("type", "button")
                .with_text("Anulează"),
        )
}

pub fn document_for(kind: PageKind) -> Document {
    match kind {
        PageKind::Login => login(),
        PageKind::Register => register(),
        PageKind::Leaderboard => leaderboard(),
        PageKind::Professors => professors(),
        PageKind::Meetings => meetings(),
    }
}
