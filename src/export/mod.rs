//! 내보내기 - CSV, JSON, Markdown

pub mod csv_export;
pub mod json_export;
pub mod markdown_export;
pub mod naming;

use std::path::PathBuf;

use anyhow::Result;

use crate::table::PageTables;

pub use csv_export::CsvExporter;
pub use json_export::JsonExporter;
pub use markdown_export::{MarkdownExporter, render_table_markdown};
pub use naming::{output_dir_for, sanitize_for_filename};

pub trait Exporter {
    /// 파일을 쓰고 쓴 경로를 돌려준다
    fn export(&self, pages: &[PageTables]) -> Result<Vec<PathBuf>>;
}
