use std::sync::Mutex;

use super::{activate_exclusive, error_placeholder, rank_label, ListState, ListView};
use crate::api::ApiClient;
use crate::dom::{DomError, Document, Node, Page};
use crate::models::{ProfessorEntry, ProfessorRow};

pub const GRID: &str = "professorsGrid";
pub const FILTER_CLASS: &str = "filter-btn";
pub const ALL_LEVELS: &str = "all";

pub const NO_PROFESSORS: &str = "Niciun profesor găsit";
pub const LOAD_FAILED: &str = "Nu s-a putut încărca lista profesorilor.";
pub const UNSPECIFIED_LEVEL: &str = "Nespecificat";

/// Unpaginated, so ranks are simply `index + 1`.
pub fn entries(rows: Vec<ProfessorRow>) -> Vec<ProfessorEntry> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| ProfessorEntry {
            rank: i as u64 + 1,
            name: row.name,
            level: row.level.filter(|l| !l.trim().is_empty()),
            rating: row.rating.unwrap_or(0.0),
            lessons_created: row.lessons_created.unwrap_or(0),
            lessons_views: row.lessons_views.unwrap_or(0),
        })
        .collect()
}

fn stat(label: &str, value: String) -> Node {
    Node::element("div")
        .class("stat")
        .child(Node::element("strong").child(Node::text(format!("{label}:"))))
        .child(Node::text(format!(" {value}")))
}

pub fn render_card(entry: &ProfessorEntry) -> Node {
    Node::element("div")
        .class("professor-card")
        .child(
            Node::element("div")
                .class("professor-header")
                .child(
                    Node::element("div")
                        .class("professor-rank")
                        .child(Node::text(rank_label(entry.rank))),
                )
                .child(
                    Node::element("div")
                        .class("professor-name")
                        .child(Node::text(entry.name.clone())),
                ),
        )
        .child(
            Node::element("div")
                .class("professor-level")
                .child(Node::text(
                    entry.level.as_deref().unwrap_or(UNSPECIFIED_LEVEL).to_string(),
                )),
        )
        .child(
            Node::element("div")
                .class("professor-stats")
                .child(stat("Rating", format!("{:.1} ⭐", entry.rating)))
                .child(stat("Lecții", format!("{} 📚", entry.lessons_created)))
                .child(stat("Vizualizări", format!("{} 👁️", entry.lessons_views))),
        )
}

pub fn empty_card() -> Node {
    Node::element("div")
        .class("no-data")
        .child(Node::text(NO_PROFESSORS))
}

pub struct ProfessorsLeaderboard {
    api: ApiClient,
    page: Page,
    view: ListView,
    level: Mutex<String>,
    rows: Mutex<Vec<ProfessorEntry>>,
}

impl ProfessorsLeaderboard {
    pub async fn bind(api: ApiClient, page: Page) -> Result<Self, DomError> {
        page.lock().await.require(&[GRID])?;
        Ok(Self {
            api,
            page,
            view: ListView::new(),
            level: Mutex::new(ALL_LEVELS.to_string()),
            rows: Mutex::new(Vec::new()),
        })
    }

    pub fn state(&self) -> ListState {
        self.view.state()
    }

    pub fn level(&self) -> String {
        self.level
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn rows(&self) -> Vec<ProfessorEntry> {
        self.rows.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub async fn reload(&self) -> Result<ListState, DomError> {
        let level = self.level();
        self.load(Some(&level)).await
    }

    pub async fn load(&self, level: Option<&str>) -> Result<ListState, DomError> {
        let ticket = self.view.begin();
        let result = self.api.professors_leaderboard(level).await;

        let mut doc = self.page.lock().await;
        if !self.view.is_current(ticket) {
            tracing::debug!(?level, "discarding superseded professors response");
            return Ok(self.view.state());
        }
        let state = match result {
            Ok(resp) if resp.status.success => {
                let listed = entries(resp.leaderboard);
                render(&mut doc, &listed)?;
                *self.rows.lock().unwrap_or_else(|p| p.into_inner()) = listed;
                ListState::Rendered
            }
            Ok(resp) => {
                let msg = resp.status.error.unwrap_or_else(|| LOAD_FAILED.to_string());
                tracing::error!(error = %msg, "error loading professors");
                doc.replace_children(GRID, vec![error_placeholder("div", LOAD_FAILED)])?;
                ListState::Failed(msg)
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading professors");
                doc.replace_children(GRID, vec![error_placeholder("div", LOAD_FAILED)])?;
                ListState::Failed(e.to_string())
            }
        };
        self.view.finish(ticket, state.clone());
        Ok(state)
    }

    pub async fn filter(&self, level: &str, trigger: &str) -> Result<ListState, DomError> {
        {
            let mut doc = self.page.lock().await;
            activate_exclusive(&mut doc, FILTER_CLASS, trigger)?;
        }
        *self
            .level
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = level.to_string();
        self.load(Some(level)).await
    }
}

fn render(doc: &mut Document, listed: &[ProfessorEntry]) -> Result<(), DomError> {
    let cards = if listed.is_empty() {
        vec![empty_card()]
    } else {
        listed.iter().map(render_card).collect()
    };
    doc.replace_children(GRID, cards)
}
