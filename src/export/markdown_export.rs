//! Markdown 내보내기와 터미널 미리보기

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::export::Exporter;
use crate::export::naming::unique_path;
use crate::table::{PageTables, Table};

/// 미리보기용 `tables.md`
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    out_dir: PathBuf,
    title: String,
}

impl MarkdownExporter {
    pub fn new(out_dir: PathBuf, title: impl Into<String>) -> Self {
        Self {
            out_dir,
            title: title.into(),
        }
    }
}

impl Exporter for MarkdownExporter {
    fn export(&self, pages: &[PageTables]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir)?;
        let path = unique_path(&self.out_dir, "tables.md");
        fs::write(&path, render_document(&self.title, pages))?;
        Ok(vec![path])
    }
}

pub fn render_document(title: &str, pages: &[PageTables]) -> String {
    let mut out = format!("# {}\n", escape_cell(title));

    if pages.iter().all(|p| p.tables.is_empty()) {
        out.push_str("\n표를 찾지 못했습니다.\n");
        return out;
    }

    for page in pages {
        let _ = writeln!(out, "\n## Page {}", page.page);
        for extracted in &page.tables {
            let _ = writeln!(out, "\n### Table {}\n", extracted.index);
            out.push_str(&render_table_markdown(&extracted.table));
        }
    }

    out
}

/// 표 하나를 파이프 표로 그린다
pub fn render_table_markdown(table: &Table) -> String {
    let columns = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.header.len()))
        .max()
        .unwrap_or(0);

    if columns == 0 {
        return "_(빈 표)_\n".to_string();
    }

    let mut out = String::new();
    push_row(&mut out, &table.header, columns);
    out.push('|');
    for _ in 0..columns {
        out.push_str(" --- |");
    }
    out.push('\n');

    for row in &table.rows {
        push_row(&mut out, row, columns);
    }

    if table.rows.is_empty() {
        out.push_str("\n_(데이터 행 없음)_\n");
    }

    out
}

fn push_row(out: &mut String, cells: &[String], columns: usize) {
    out.push('|');
    for i in 0..columns {
        out.push(' ');
        out.push_str(&escape_cell(cells.get(i).map(String::as_str).unwrap_or("")));
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
