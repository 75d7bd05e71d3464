//! 표 추출 엔진 경계
//!
//! OCR과 표 구조 인식은 외부 엔진이 맡는다. 이 모듈은 엔진 호출과
//! 엔진 JSON 출력을 [`PageTables`]로 바꾸는 일만 한다.

mod bridge;
mod json_source;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ExtractionConfig;
use crate::table::{ExtractedTable, PageTables, Table};

pub use bridge::ExtractionBridge;
pub use json_source::JsonTableSource;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("입력 파일이 없습니다: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("입력이 파일이 아닙니다: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("PDF 파일이 아닙니다: {}", .0.display())]
    NotPdf(PathBuf),
    #[error("파일을 읽을 수 없습니다: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("추출 엔진 실행 실패: {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("추출 엔진이 {0:?} 안에 끝나지 않았습니다")]
    Timeout(Duration),
    #[error("추출 엔진 오류 (종료 코드 {code:?}): {stderr}")]
    Failed { code: Option<i32>, stderr: String },
    #[error("추출 결과 JSON 파싱 실패: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 표 추출 엔진
#[allow(async_fn_in_trait)]
pub trait TableExtractor {
    async fn extract(
        &self,
        pdf: &Path,
        config: &ExtractionConfig,
    ) -> Result<Vec<PageTables>, EngineError>;
}

/// 엔진에 넘기기 전 입력 PDF 확인
pub fn validate_pdf(path: &Path) -> Result<(), EngineError> {
    if !path.exists() {
        return Err(EngineError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(EngineError::NotAFile(path.to_path_buf()));
    }
    if !path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
    {
        return Err(EngineError::NotPdf(path.to_path_buf()));
    }
    Ok(())
}

// 엔진 출력 형식

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineOutput {
    #[serde(default)]
    pages: Vec<EnginePage>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnginePage {
    page: usize,
    #[serde(default)]
    tables: Vec<EngineTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineTable {
    #[serde(default)]
    header: Option<Vec<Option<String>>>,
    #[serde(default)]
    rows: Vec<Vec<Option<String>>>,
    #[serde(default)]
    confidence: Option<f32>,
}

/// 이 도구가 내보낸 `tables.json`
#[derive(Debug, Serialize, Deserialize)]
pub struct TablesDocument {
    pub source: String,
    pub exported_at: String,
    pub filtered: bool,
    pub pages: Vec<PageTables>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnyTablesJson {
    Exported(TablesDocument),
    Engine(EngineOutput),
}

/// 엔진 출력 JSON을 페이지 순서대로 정리한다
pub fn parse_engine_output(json: &str) -> Result<Vec<PageTables>, EngineError> {
    let output: EngineOutput = serde_json::from_str(json)?;
    Ok(convert_engine_output(output))
}

/// 엔진 출력 또는 내보낸 `tables.json`을 읽는다
pub fn parse_tables_json(json: &str) -> Result<Vec<PageTables>, EngineError> {
    let parsed: AnyTablesJson = serde_json::from_str(json)?;
    match parsed {
        AnyTablesJson::Exported(doc) => Ok(doc.pages),
        AnyTablesJson::Engine(output) => Ok(convert_engine_output(output)),
    }
}

fn convert_engine_output(output: EngineOutput) -> Vec<PageTables> {
    let mut pages: Vec<PageTables> = output
        .pages
        .into_iter()
        .map(|raw| PageTables {
            page: raw.page,
            tables: raw
                .tables
                .into_iter()
                .enumerate()
                .map(|(i, t)| ExtractedTable {
                    page: raw.page,
                    index: i + 1,
                    confidence: t.confidence,
                    table: Table::from_grid(t.rows, t.header),
                })
                .collect(),
        })
        .collect();

    pages.sort_by_key(|p| p.page);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_engine_json() {
        let json = r#"{
            "pages": [
                {"page": 2, "tables": [
                    {"rows": [["항목", "반영여부"], ["1", null]], "confidence": 91.5}
                ]},
                {"page": 1, "tables": [
                    {"header": ["a", "b"], "rows": [["x", "y"]]},
                    {"rows": []}
                ]}
            ]
        }"#;

        let pages = parse_engine_output(json).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page, 1);
        assert_eq!(pages[0].tables.len(), 2);
        assert_eq!(pages[0].tables[1].index, 2);
        assert_eq!(pages[0].tables[0].table.header, vec!["a", "b"]);
        assert_eq!(pages[0].tables[0].table.row_count(), 1);

        let second = &pages[1].tables[0];
        assert_eq!(second.page, 2);
        assert_eq!(second.confidence, Some(91.5));
        assert_eq!(second.table.header, vec!["항목", "반영여부"]);
        assert_eq!(second.table.rows, vec![vec!["1".to_string(), String::new()]]);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_engine_output("{\"pages\": 3}"),
            Err(EngineError::Parse(_))
        ));
    }

    #[test]
    fn reads_exported_document() {
        let pages = vec![PageTables {
            page: 4,
            tables: vec![ExtractedTable {
                page: 4,
                index: 1,
                confidence: None,
                table: Table::new(vec!["h".into()], vec![vec!["v".into()]]),
            }],
        }];
        let doc = TablesDocument {
            source: "a.pdf".into(),
            exported_at: "2026-01-01T00:00:00+09:00".into(),
            filtered: false,
            pages: pages.clone(),
        };
        let json = serde_json::to_string(&doc).unwrap();

        assert_eq!(parse_tables_json(&json).unwrap(), pages);
    }

    #[test]
    fn incomplete_exported_document_is_rejected() {
        // exported_at 이 빠진 tables.json 은 엔진 형식으로도 읽히면 안 된다
        let json = r#"{
            "source": "a.pdf",
            "filtered": true,
            "pages": [{"page": 1, "tables": [
                {"page": 1, "index": 1, "table": {"header": ["항목", "반영여부"], "rows": [["1", "반영"]]}}
            ]}]
        }"#;

        assert!(matches!(parse_tables_json(json), Err(EngineError::Parse(_))));
    }

    #[test]
    fn unknown_engine_table_fields_are_rejected() {
        let json = r#"{"pages": [{"page": 1, "tables": [{"table": {"header": ["a"]}}]}]}"#;
        assert!(matches!(parse_engine_output(json), Err(EngineError::Parse(_))));
    }

    #[test]
    fn validates_input_pdf() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.pdf");
        assert!(matches!(validate_pdf(&missing), Err(EngineError::InputNotFound(_))));

        assert!(matches!(validate_pdf(dir.path()), Err(EngineError::NotAFile(_))));

        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "x").unwrap();
        assert!(matches!(validate_pdf(&txt), Err(EngineError::NotPdf(_))));

        let pdf = dir.path().join("Permit.PDF");
        std::fs::write(&pdf, "%PDF-1.7").unwrap();
        assert!(validate_pdf(&pdf).is_ok());
    }
}
