//! Plain-text rendering of the document table and view status.

use std::fmt::Write as _;

use client_core::{ViewState, ViewStatus};
use shared::{
    domain::{Category, Document, Importance},
    query::FilterState,
};

const TITLE_WIDTH: usize = 48;
const HEADERS: [&str; 7] = [
    "Title",
    "Responsible unit",
    "Created",
    "Importance",
    "Category",
    "Active",
    "Link",
];

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Public => "Public",
        Category::Internal => "Internal",
        Category::Restricted => "Restricted access",
        Category::Confidential => "Confidential",
    }
}

pub fn importance_label(importance: Importance) -> &'static str {
    match importance {
        Importance::Low => "Low",
        Importance::Medium => "Medium",
        Importance::High => "High",
        Importance::Critical => "Critical",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn row(doc: &Document) -> [String; 7] {
    [
        truncate(&doc.title, TITLE_WIDTH),
        doc.responsible_unit.clone(),
        doc.created_at.format("%Y-%m-%d").to_string(),
        importance_label(doc.importance).to_string(),
        category_label(doc.category).to_string(),
        if doc.active { "yes" } else { "no" }.to_string(),
        format!("{} {}", doc.file_type.to_uppercase(), doc.url),
    ]
}

pub fn render_documents(documents: &[Document]) -> String {
    if documents.is_empty() {
        return "No documents\n".to_string();
    }

    let rows: Vec<[String; 7]> = documents.iter().map(row).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for cells in &rows {
        push_line(&mut out, cells.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (cell, width) in cells.zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 2));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn describe_filters(filters: &FilterState) -> String {
    let mut parts = Vec::new();
    if let Some(category) = filters.category {
        parts.push(format!("category={category}"));
    }
    if let Some(active) = filters.active {
        parts.push(format!("active={active}"));
    }
    if let Some(importance) = filters.importance {
        parts.push(format!("importance={importance}"));
    }
    if let Some(from) = filters.created_from {
        parts.push(format!("from={from}"));
    }
    if let Some(to) = filters.created_to {
        parts.push(format!("to={to}"));
    }
    parts.push(format!("sort={} {}", filters.sort_field, filters.sort_order));
    parts.join(" ")
}

pub fn render_status(state: &ViewState) -> String {
    let status = match state.status() {
        ViewStatus::Idle => "idle",
        ViewStatus::Loading => "loading…",
        ViewStatus::Error => "error",
        ViewStatus::Importing => "importing…",
    };

    let mut out = format!(
        "[{status}] {} | {} documents\n",
        describe_filters(state.filters()),
        state.documents().len()
    );
    if let Some(summary) = state.last_import() {
        let _ = writeln!(out, "last import: {} documents", summary.imported);
    }
    if let Some(error) = state.error() {
        match error.detail() {
            Some(detail) => {
                let _ = writeln!(out, "error: {} ({detail})", error.message());
            }
            None => {
                let _ = writeln!(out, "error: {}", error.message());
            }
        }
    }
    out
}

/// Full view: table (unless a load is still pending) followed by status.
pub fn render_view(state: &ViewState) -> String {
    let mut out = String::new();
    if !state.is_loading() {
        out.push_str(&render_documents(state.documents()));
    }
    out.push_str(&render_status(state));
    out
}
