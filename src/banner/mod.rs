use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::dom::{DomError, Node, Page};

pub const MESSAGE_CONTAINER: &str = "message-container";

pub const BOOKING_AUTO_HIDE: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn icon(&self) -> &'static str {
        match self {
            BannerKind::Success => "✅",
            BannerKind::Error => "❌",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Success => "message-success",
            BannerKind::Error => "message-error",
        }
    }
}

pub fn render_message(message: &str, kind: BannerKind) -> Node {
    Node::element("div")
        .class("message")
        .class(kind.css_class())
        .child(
            Node::element("span")
                .class("message-icon")
                .child(Node::text(kind.icon())),
        )
        .child(Node::element("span").child(Node::text(message)))
}

#[derive(Clone, Debug)]
pub struct MessageBanner {
    container: String,
    auto_hide: Option<Duration>,
    shown: Arc<AtomicU64>,
}

impl MessageBanner {
    pub fn new(container: &str) -> Self {
        Self {
            container: container.to_string(),
            auto_hide: None,
            shown: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_auto_hide(mut self, delay: Duration) -> Self {
        self.auto_hide = Some(delay);
        self
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Replaces the banner content, shows it and asks for a smooth scroll.
    /// With auto-hide configured, a hide is scheduled that a later `show`
    /// supersedes.
    pub async fn show(&self, page: &Page, message: &str, kind: BannerKind) -> Result<(), DomError> {
        {
            let mut doc = page.lock().await;
            let el = doc.get_mut(&self.container)?;
            el.children = vec![render_message(message, kind)];
            el.visible = true;
            doc.scroll_into_view(&self.container);
        }
        let generation = self.shown.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(container = %self.container, ?kind, "banner shown");

        if let Some(delay) = self.auto_hide {
            let page = page.clone();
            let shown = self.shown.clone();
            let container = self.container.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if shown.load(Ordering::SeqCst) != generation {
                    return;
                }
                let mut doc = page.lock().await;
                if let Ok(el) = doc.get_mut(&container) {
                    el.visible = false;
                }
            });
        }
        Ok(())
    }
}
