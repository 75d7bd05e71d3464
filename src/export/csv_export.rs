//! CSV 내보내기
//!
//! 표마다 파일 하나를 쓴다. 엑셀에서 바로 열 수 있도록 UTF-8 BOM을 붙이고,
//! 같은 이름의 파일이 있으면 덮어쓰지 않고 번호를 붙인다.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::export::Exporter;
use crate::export::naming::{csv_file_name, unique_path};
use crate::table::{ExtractedTable, PageTables, Table};

/// 엑셀에서 한글이 깨지지 않도록 붙이는 UTF-8 BOM
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 표마다 CSV 파일 하나
#[derive(Debug, Clone)]
pub struct CsvExporter {
    out_dir: PathBuf,
    filtered: bool,
    keep_empty: bool,
}

impl CsvExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            out_dir,
            filtered: false,
            keep_empty: false,
        }
    }

    /// 필터를 거친 결과인지 (파일 이름에 반영)
    pub fn with_filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }

    /// 데이터 행이 없는 표도 헤더만 있는 파일로 쓸지
    pub fn with_keep_empty(mut self, keep_empty: bool) -> Self {
        self.keep_empty = keep_empty;
        self
    }

    fn write_table(&self, extracted: &ExtractedTable) -> Result<PathBuf> {
        let path = unique_path(&self.out_dir, &csv_file_name(extracted, self.filtered));
        write_csv(&path, &extracted.table)
            .with_context(|| format!("CSV 쓰기 실패: {}", path.display()))?;
        Ok(path)
    }
}

impl Exporter for CsvExporter {
    fn export(&self, pages: &[PageTables]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir)?;
        let mut written = Vec::new();

        for extracted in pages.iter().flat_map(|p| p.tables.iter()) {
            if extracted.table.is_empty() && !self.keep_empty {
                debug!(page = extracted.page, index = extracted.index, "빈 표는 건너뜀");
                continue;
            }
            written.push(self.write_table(extracted)?);
        }

        Ok(written)
    }
}

/// BOM이 붙은 CSV 바이트
pub fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut buf);

        if !table.header.is_empty() {
            writer.write_record(&table.header)?;
        }
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

/// CSV 파일 하나를 쓴다
pub fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(&table_to_csv(table)?)?;
    Ok(())
}
