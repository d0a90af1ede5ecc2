use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

use super::{error_placeholder, pagination, rank_label, ListState, ListView};
use crate::api::ApiClient;
use crate::dom::{DomError, Document, Node, Page};
use crate::models::{GlobalLeaderboardResponse, LeaderboardEntry, StudentRow};

pub const TABLE_BODY: &str = "studentsTableBody";
pub const PAGINATION: &str = "studentsPagination";
pub const USER_RANK: &str = "userRankNumber";

pub const DEFAULT_PER_PAGE: u32 = 25;
pub const COLUMNS: u32 = 4;

pub const NO_STUDENTS: &str = "Niciun student găsit";
pub const LOAD_FAILED: &str = "Nu s-a putut încărca clasamentul.";
pub const CURRENT_USER_CLASS: &str = "current-user";
pub const CURRENT_USER_SUFFIX: &str = " (Tu)";

/// 1-based rank of the `index`-th row on `page`.
pub fn display_rank(page: u32, per_page: u32, index: usize) -> u64 {
    (page.max(1) as u64 - 1)
        .saturating_mul(per_page as u64)
        .saturating_add(index as u64 + 1)
}

pub fn entries(rows: Vec<StudentRow>, page: u32, per_page: u32) -> Vec<LeaderboardEntry> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| LeaderboardEntry {
            rank: display_rank(page, per_page, i),
            name: row.name,
            points: row.points,
            lessons_completed: row.lessons_completed,
            is_current_user: row.is_current_user,
        })
        .collect()
}

fn cell(class: &str, text: String) -> Node {
    Node::element("td").class(class).child(Node::text(text))
}

pub fn render_row(entry: &LeaderboardEntry) -> Node {
    let mut name = entry.name.clone();
    let mut row = Node::element("tr");
    if entry.is_current_user {
        name.push_str(CURRENT_USER_SUFFIX);
        row = row.class(CURRENT_USER_CLASS);
    }
    row.child(cell("rank-col", rank_label(entry.rank)))
        .child(cell("name-col", name))
        .child(cell("points-col", entry.points.to_string()))
        .child(cell("lessons-col", entry.lessons_completed.to_string()))
}

pub fn placeholder_row(content: Node) -> Node {
    Node::element("tr").child(
        Node::element("td")
            .attr("colspan", COLUMNS.to_string())
            .child(content),
    )
}

pub fn empty_row() -> Node {
    Node::element("tr").child(
        Node::element("td")
            .attr("colspan", COLUMNS.to_string())
            .class("no-data")
            .child(Node::text(NO_STUDENTS)),
    )
}

pub struct StudentsLeaderboard {
    api: ApiClient,
    page: Page,
    per_page: u32,
    view: ListView,
    current_page: AtomicU32,
    total_pages: AtomicU64,
    current_rank: Mutex<Option<u64>>,
    rows: Mutex<Vec<LeaderboardEntry>>,
}

impl StudentsLeaderboard {
    pub async fn bind(api: ApiClient, page: Page, per_page: u32) -> Result<Self, DomError> {
        page.lock().await.require(&[TABLE_BODY, PAGINATION])?;
        Ok(Self {
            api,
            page,
            per_page: if per_page == 0 { DEFAULT_PER_PAGE } else { per_page },
            view: ListView::new(),
            current_page: AtomicU32::new(1),
            total_pages: AtomicU64::new(0),
            current_rank: Mutex::new(None),
            rows: Mutex::new(Vec::new()),
        })
    }

    pub fn state(&self) -> ListState {
        self.view.state()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page.load(Ordering::SeqCst)
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages.load(Ordering::SeqCst)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn current_rank(&self) -> Option<u64> {
        *self.current_rank.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn rows(&self) -> Vec<LeaderboardEntry> {
        self.rows.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Fetches and renders `page`. A response that arrives after a newer
    /// `load` was issued is discarded.
    pub async fn load(&self, page: u32) -> Result<ListState, DomError> {
        let page = page.max(1);
        let ticket = self.view.begin();
        let result = self.api.global_leaderboard(page, self.per_page).await;

        let mut doc = self.page.lock().await;
        if !self.view.is_current(ticket) {
            tracing::debug!(page, "discarding superseded leaderboard response");
            return Ok(self.view.state());
        }
        let state = match result {
            Ok(resp) if resp.status.success => {
                self.render(&mut doc, resp, page)?;
                ListState::Rendered
            }
            Ok(resp) => {
                let msg = resp.status.error.unwrap_or_else(|| LOAD_FAILED.to_string());
                tracing::error!(error = %msg, "error loading leaderboard");
                render_failure(&mut doc)?;
                ListState::Failed(msg)
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading leaderboard");
                render_failure(&mut doc)?;
                ListState::Failed(e.to_string())
            }
        };
        self.view.finish(ticket, state.clone());
        Ok(state)
    }

    pub async fn next(&self) -> Result<ListState, DomError> {
        self.load(self.current_page().saturating_add(1)).await
    }

    pub async fn previous(&self) -> Result<ListState, DomError> {
        self.load(self.current_page().saturating_sub(1)).await
    }

    pub async fn jump(&self, raw: &str) -> Result<Option<ListState>, DomError> {
        match pagination::parse_page_input(raw, self.total_pages()) {
            Some(page) => Ok(Some(self.load(page).await?)),
            None => Ok(None),
        }
    }

    fn render(
        &self,
        doc: &mut Document,
        resp: GlobalLeaderboardResponse,
        requested: u32,
    ) -> Result<(), DomError> {
        let page = if resp.page > 0 { resp.page } else { requested };
        let per_page = if resp.per_page > 0 {
            resp.per_page
        } else {
            self.per_page
        };

        let listed = entries(resp.leaderboard, page, per_page);
        let rows = if listed.is_empty() {
            vec![empty_row()]
        } else {
            listed.iter().map(render_row).collect()
        };
        doc.replace_children(TABLE_BODY, rows)?;
        doc.replace_children(
            PAGINATION,
            pagination::render(resp.total_users, page, per_page),
        )?;

        if let (Some(rank), true) = (resp.current_user_rank, doc.contains(USER_RANK)) {
            doc.set_text(USER_RANK, &rank.to_string())?;
        }

        *self.rows.lock().unwrap_or_else(|p| p.into_inner()) = listed;
        *self.current_rank.lock().unwrap_or_else(|p| p.into_inner()) = resp.current_user_rank;
        self.current_page.store(page, Ordering::SeqCst);
        self.total_pages.store(
            pagination::total_pages(resp.total_users, per_page),
            Ordering::SeqCst,
        );
        Ok(())
    }
}

fn render_failure(doc: &mut Document) -> Result<(), DomError> {
    doc.replace_children(
        TABLE_BODY,
        vec![placeholder_row(error_placeholder("span", LOAD_FAILED))],
    )?;
    doc.replace_children(PAGINATION, Vec::new())
}
