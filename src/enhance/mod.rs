use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::dom::{DomError, Document, Element, Node, Page};

pub const BODY: &str = "body";

pub const TOGGLE_CLASS: &str = "password-toggle";
pub const TOGGLE_TITLE: &str = "Arată/Ascunde parola";
pub const GLYPH_HIDDEN: &str = "👁️";
pub const GLYPH_SHOWN: &str = "👁️‍🗨️";

pub const ERROR_CLASS: &str = "error";
pub const MSG_PASSWORDS_DIFFER: &str = "Parolele nu se potrivesc";

pub const ACTIVITY_CHECK_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const INACTIVITY_LIMIT: Duration = Duration::from_secs(30 * 60);

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

pub fn toggle_id(input: &str) -> String {
    format!("{input}-toggle")
}

/// Adds one visibility toggle per password input. Inputs that already own a
/// toggle are skipped. Returns the ids of the toggles created.
pub fn init_password_toggles(doc: &mut Document) -> Vec<String> {
    let inputs =
        doc.ids_where(|el| el.tag == "input" && el.input_type.as_deref() == Some("password"));
    let mut created = Vec::new();
    for input in inputs {
        let id = toggle_id(&input);
        if doc.contains(&id) {
            continue;
        }
        doc.insert(
            &id,
            Element::new("button")
                .with_class(TOGGLE_CLASS)
                .with_attr("type", "button")
                .with_attr("title", TOGGLE_TITLE)
                .with_attr("data-target", &input)
                .with_text(GLYPH_HIDDEN),
        );
        created.push(id);
    }
    created
}

pub fn toggle_password(doc: &mut Document, toggle: &str) -> Result<(), DomError> {
    let target = doc
        .get(toggle)?
        .attrs
        .get("data-target")
        .cloned()
        .ok_or_else(|| DomError::MissingAnchor {
            id: format!("{toggle}[data-target]"),
        })?;
    let input = doc.get_mut(&target)?;
    let (next_type, glyph) = match input.input_type.as_deref() {
        Some("password") => ("text", GLYPH_SHOWN),
        _ => ("password", GLYPH_HIDDEN),
    };
    input.input_type = Some(next_type.to_string());
    doc.set_text(toggle, glyph)
}

fn is_validated(el: &Element) -> bool {
    el.required && el.tag == "input" && el.form.is_some()
}

/// Blur handler: marks a blank required field with the `error` class.
/// Returns whether `target` is now flagged.
pub fn on_blur(doc: &mut Document, target: &str) -> Result<bool, DomError> {
    let el = doc.get_mut(target)?;
    if !is_validated(el) {
        return Ok(false);
    }
    if el.value.trim().is_empty() {
        el.add_class(ERROR_CLASS);
        Ok(true)
    } else {
        el.remove_class(ERROR_CLASS);
        Ok(false)
    }
}

pub fn on_input(doc: &mut Document, target: &str) -> Result<(), DomError> {
    let el = doc.get_mut(target)?;
    if is_validated(el) && el.has_class(ERROR_CLASS) && !el.value.trim().is_empty() {
        el.remove_class(ERROR_CLASS);
    }
    Ok(())
}

pub fn check_password_match(
    doc: &mut Document,
    password: &str,
    confirm: &str,
) -> Result<bool, DomError> {
    let expected = doc.value(password)?;
    let el = doc.get_mut(confirm)?;
    let mismatch = !el.value.is_empty() && el.value != expected;
    el.custom_validity = if mismatch {
        MSG_PASSWORDS_DIFFER.to_string()
    } else {
        String::new()
    };
    Ok(!mismatch)
}

/// Click on an in-page `#id` link: cancels the jump and scrolls to the
/// target when it exists. Returns whether the default navigation was
/// cancelled; a bare `#` keeps it.
pub fn follow_anchor(doc: &mut Document, link: &str) -> Result<bool, DomError> {
    let el = doc.get(link)?;
    if el.tag != "a" {
        return Ok(false);
    }
    let Some(dest) = el
        .attrs
        .get("href")
        .and_then(|href| href.strip_prefix('#'))
        .filter(|dest| !dest.is_empty())
        .map(str::to_string)
    else {
        return Ok(false);
    };
    if doc.contains(&dest) {
        doc.scroll_into_view(&dest);
    }
    Ok(true)
}

#[derive(Clone, Debug)]
pub struct ActivityTracker {
    last: Arc<Mutex<Instant>>,
    reports: Arc<AtomicU64>,
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self {
            last: Arc::new(Mutex::new(Instant::now())),
            reports: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn touch(&self) {
        *self.last.lock().unwrap_or_else(|p| p.into_inner()) = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last.lock().unwrap_or_else(|p| p.into_inner()).elapsed()
    }

    pub fn is_inactive(&self) -> bool {
        self.idle_for() > INACTIVITY_LIMIT
    }

    pub fn reports(&self) -> u64 {
        self.reports.load(Ordering::SeqCst)
    }

    /// Checks every five minutes and logs while the user is inactive.
    pub fn watch(&self) -> JoinHandle<()> {
        let tracker = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(ACTIVITY_CHECK_INTERVAL);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tracker.is_inactive() {
                    tracker.reports.fetch_add(1, Ordering::SeqCst);
                    tracing::info!(idle = ?tracker.idle_for(), "user inactive for 30 minutes");
                }
            }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

static NOTIFICATIONS: AtomicU64 = AtomicU64::new(0);

pub async fn notify(page: &Page, message: &str, kind: NotificationKind) -> Result<(), DomError> {
    let serial = NOTIFICATIONS.fetch_add(1, Ordering::SeqCst).to_string();
    let node = Node::element("div")
        .class("notification")
        .class(&format!("notification-{}", kind.as_str()))
        .attr("data-notification", serial.clone())
        .child(Node::text(message));
    page.lock().await.get_mut(BODY)?.children.push(node);

    let page = page.clone();
    tokio::spawn(async move {
        tokio::time::sleep(NOTIFICATION_TTL).await;
        let mut doc = page.lock().await;
        if let Ok(body) = doc.get_mut(BODY) {
            body.children
                .retain(|n| n.get_attr("data-notification") != Some(serial.as_str()));
        }
    });
    Ok(())
}
