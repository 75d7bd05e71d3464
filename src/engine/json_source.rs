//! 이미 추출해 둔 표 JSON 읽기

use std::path::{Path, PathBuf};

use tracing::info;

use super::{EngineError, TableExtractor, parse_tables_json};
use crate::config::ExtractionConfig;
use crate::table::{PageTables, total_tables};

/// 엔진 출력이나 내보낸 `tables.json` 파일을 엔진처럼 쓴다
///
/// OCR 없이 필터만 다시 돌릴 때 쓴다. 페이지 선택은 여기서 적용한다.
#[derive(Debug, Clone)]
pub struct JsonTableSource {
    path: PathBuf,
}

impl JsonTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<PageTables>, EngineError> {
        if !self.path.exists() {
            return Err(EngineError::InputNotFound(self.path.clone()));
        }
        let data = std::fs::read_to_string(&self.path).map_err(|source| EngineError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_tables_json(&data)
    }
}

impl TableExtractor for JsonTableSource {
    async fn extract(
        &self,
        _pdf: &Path,
        config: &ExtractionConfig,
    ) -> Result<Vec<PageTables>, EngineError> {
        let pages: Vec<PageTables> = self
            .load()?
            .into_iter()
            .filter(|p| config.pages.contains(p.page))
            .collect();

        info!(
            path = %self.path.display(),
            pages = pages.len(),
            tables = total_tables(&pages),
            "저장된 표 읽기 완료"
        );
        Ok(pages)
    }
}
