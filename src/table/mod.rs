//! 표 데이터 모델 - 추출 엔진이 돌려주는 표와 페이지 단위 결과

use serde::{Deserialize, Serialize};

/// 문자열 셀로 이루어진 표
///
/// 행의 길이는 헤더와 같아야 하지만, OCR 결과에서 어긋난 행이 올 수 있으므로
/// 여기서 채우거나 자르지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// 열 이름 (비어 있거나 중복될 수 있음)
    pub header: Vec<String>,
    /// 데이터 행
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// 엔진 격자에서 표를 만든다
    ///
    /// 헤더가 따로 주어지지 않으면 첫 번째 행을 헤더로 올린다.
    /// `None` 셀은 빈 문자열이 된다.
    pub fn from_grid(grid: Vec<Vec<Option<String>>>, header: Option<Vec<Option<String>>>) -> Self {
        let mut rows = grid.into_iter().map(into_cells);

        let header = match header {
            Some(header) => into_cells(header),
            None => rows.next().unwrap_or_default(),
        };

        Self {
            header,
            rows: rows.collect(),
        }
    }

    /// 데이터 행 수 (헤더 제외)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn into_cells(row: Vec<Option<String>>) -> Vec<String> {
    row.into_iter().map(Option::unwrap_or_default).collect()
}

/// 엔진이 찾은 표 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTable {
    /// 페이지 번호 (1부터)
    pub page: usize,
    /// 페이지 안에서의 순번 (1부터)
    pub index: usize,
    /// 엔진이 보고한 평균 OCR 신뢰도
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub table: Table,
}

/// 페이지 단위 추출 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTables {
    pub page: usize,
    pub tables: Vec<ExtractedTable>,
}

impl PageTables {
    /// 표를 하나씩 변환한 새 페이지 결과를 만든다 (원본은 그대로)
    pub fn map_tables(&self, f: impl Fn(&Table) -> Table) -> Self {
        Self {
            page: self.page,
            tables: self
                .tables
                .iter()
                .map(|extracted| ExtractedTable {
                    table: f(&extracted.table),
                    ..extracted.clone()
                })
                .collect(),
        }
    }
}

/// 모든 페이지의 표 개수
pub fn total_tables(pages: &[PageTables]) -> usize {
    pages.iter().map(|p| p.tables.len()).sum()
}
