//! 인허가 검토표 추출기 - PDF 표 추출 결과를 거르고 스프레드시트로 내보내는 도구
//!
//! # 기능
//! - 외부 OCR 표 추출 엔진 호출 (자식 프로세스)
//! - `반영여부` / `적합여부` 열 기준 검토표 행 필터
//! - CSV (UTF-8 BOM), JSON, Markdown 내보내기

pub mod config;
pub mod engine;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod table;

pub use config::ExtractionConfig;
pub use filter::{filter_table, filter_tables, locate_status_column};
pub use table::{ExtractedTable, PageTables, Table};
