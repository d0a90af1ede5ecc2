use colored::Colorize;
use serde::Serialize;

use crate::banner::BannerKind;
use crate::list::pagination;
use crate::models::{LeaderboardEntry, ProfessorEntry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn banner_line(message: &str, kind: BannerKind, no_color: bool) -> String {
    let line = format!("{} {}", kind.icon(), message);
    if no_color {
        return line;
    }
    match kind {
        BannerKind::Success => line.green().to_string(),
        BannerKind::Error => line.red().bold().to_string(),
    }
}

pub fn render_students_text(
    entries: &[LeaderboardEntry],
    page: u32,
    total_pages: u64,
    current_rank: Option<u64>,
    no_color: bool,
) -> String {
    let mut out = String::new();
    for e in entries {
        let mut name = e.name.clone();
        if e.is_current_user {
            name.push_str(crate::list::students::CURRENT_USER_SUFFIX);
        }
        let line = format!(
            "{:>4}  {:<32} {:>7} {:>5}",
            crate::list::rank_label(e.rank),
            name,
            e.points,
            e.lessons_completed
        );
        if e.is_current_user && !no_color {
            out.push_str(&line.cyan().bold().to_string());
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
    if entries.is_empty() {
        out.push_str(crate::list::students::NO_STUDENTS);
        out.push('\n');
    }
    if total_pages > 1 {
        out.push_str(&format!(":: {}\n", pagination::page_info(page, total_pages)));
    }
    if let Some(rank) = current_rank {
        out.push_str(&format!(":: Locul tău: {rank}\n"));
    }
    out
}

pub fn render_professors_text(entries: &[ProfessorEntry]) -> String {
    let mut out = String::new();
    for e in entries {
        out.push_str(&format!(
            "{:>4}  {:<32} {:<12} {:>4.1} ⭐ {:>5} 📚 {:>7} 👁️\n",
            crate::list::rank_label(e.rank),
            e.name,
            e.level
                .as_deref()
                .unwrap_or(crate::list::professors::UNSPECIFIED_LEVEL),
            e.rating,
            e.lessons_created,
            e.lessons_views
        ));
    }
    if entries.is_empty() {
        out.push_str(crate::list::professors::NO_PROFESSORS);
        out.push('\n');
    }
    out
}

pub fn render_json<T: Serialize>(records: &[T]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}
