//! `tables.json` 내보내기. `filter` 명령으로 다시 읽을 수 있는 형식이다.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::engine::TablesDocument;
use crate::export::Exporter;
use crate::export::naming::unique_path;
use crate::table::PageTables;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
    source: String,
    filtered: bool,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf, source: impl Into<String>) -> Self {
        Self {
            out_dir,
            source: source.into(),
            filtered: false,
        }
    }

    pub fn with_filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }
}

impl Exporter for JsonExporter {
    fn export(&self, pages: &[PageTables]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir)?;
        let path = unique_path(&self.out_dir, "tables.json");
        let document = TablesDocument {
            source: self.source.clone(),
            exported_at: chrono::Local::now().to_rfc3339(),
            filtered: self.filtered,
            pages: pages.to_vec(),
        };
        let data = serde_json::to_string_pretty(&document)?;
        fs::write(&path, data)?;
        Ok(vec![path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse_tables_json;
    use crate::table::{ExtractedTable, Table};

    #[test]
    fn writes_document_that_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let pages = vec![PageTables {
            page: 1,
            tables: vec![ExtractedTable {
                page: 1,
                index: 1,
                confidence: Some(72.5),
                table: Table::new(vec!["항목".into()], vec![vec!["1".into()]]),
            }],
        }];

        let written = JsonExporter::new(dir.path().to_path_buf(), "permit.pdf")
            .with_filtered(true)
            .export(&pages)
            .unwrap();

        let data = fs::read_to_string(&written[0]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["source"], "permit.pdf");
        assert_eq!(value["filtered"], true);
        assert!(value["exported_at"].as_str().is_some_and(|s| !s.is_empty()));
        assert_eq!(parse_tables_json(&data).unwrap(), pages);
    }

    #[test]
    fn second_export_gets_new_name() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().to_path_buf(), "permit.pdf");

        let first = exporter.export(&[]).unwrap();
        fs::write(&first[0], "이전 결과").unwrap();
        let second = exporter.export(&[]).unwrap();

        assert_eq!(first, vec![dir.path().join("tables.json")]);
        assert_eq!(second, vec![dir.path().join("tables_1.json")]);
        assert_eq!(fs::read_to_string(&first[0]).unwrap(), "이전 결과");
    }
}
