//! 추출 → 필터 → 내보내기

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::engine::TableExtractor;
use crate::export::{CsvExporter, Exporter, JsonExporter, MarkdownExporter};
use crate::filter::{filter_table, locate_status_column, summarize_statuses};
use crate::table::{PageTables, total_tables};

/// 내보낼 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Markdown,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub formats: Vec<ExportFormat>,
    /// 문서 제목과 JSON `source`에 쓸 이름
    pub source: String,
    /// 필터 적용 결과인지
    pub filtered: bool,
    pub keep_empty: bool,
}

/// 엔진으로 표를 추출하고 설정에 따라 필터를 적용한다
pub async fn extract_tables<E: TableExtractor>(
    extractor: &E,
    pdf: &Path,
    config: &ExtractionConfig,
) -> Result<Vec<PageTables>> {
    info!(
        pdf = %pdf.display(),
        lang = config.lang.code(),
        pages = %config.pages,
        min_confidence = config.min_confidence,
        korean_filter = config.apply_korean_filter,
        "표 추출 시작"
    );

    let pages = extractor
        .extract(pdf, config)
        .await
        .with_context(|| format!("표 추출 실패: {}", pdf.display()))?;

    info!(
        pages = pages.len(),
        tables = total_tables(&pages),
        "표 추출 완료"
    );

    if config.apply_korean_filter {
        Ok(apply_filter(&pages))
    } else {
        Ok(pages)
    }
}

/// 모든 표에 인허가 검토표 필터를 적용한다 (입력은 그대로)
pub fn apply_filter(pages: &[PageTables]) -> Vec<PageTables> {
    for extracted in pages.iter().flat_map(|p| p.tables.iter()) {
        let Some(summary) = summarize_statuses(&extracted.table) else {
            debug!(page = extracted.page, index = extracted.index, "상태 열 없음, 그대로 유지");
            continue;
        };

        debug!(
            page = extracted.page,
            index = extracted.index,
            kept = summary.included,
            dropped = summary.dropped(),
            "검토표 필터 적용"
        );
        for (label, count) in &summary.unrecognized {
            warn!(
                page = extracted.page,
                index = extracted.index,
                label = %label,
                count,
                "알 수 없는 상태값 행 제외"
            );
        }
    }

    pages.iter().map(|p| p.map_tables(filter_table)).collect()
}

/// 선택한 형식으로 내보낸다
pub fn export_tables(pages: &[PageTables], options: &ExportOptions) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for format in &options.formats {
        let files = match format {
            ExportFormat::Csv => CsvExporter::new(options.out_dir.clone())
                .with_filtered(options.filtered)
                .with_keep_empty(options.keep_empty)
                .export(pages),
            ExportFormat::Json => JsonExporter::new(options.out_dir.clone(), &options.source)
                .with_filtered(options.filtered)
                .export(pages),
            ExportFormat::Markdown => {
                MarkdownExporter::new(options.out_dir.clone(), &options.source).export(pages)
            }
        }
        .with_context(|| format!("내보내기 실패 ({format:?}): {}", options.out_dir.display()))?;

        written.extend(files);
    }

    info!(files = written.len(), out_dir = %options.out_dir.display(), "내보내기 완료");
    Ok(written)
}

/// 추출 결과 요약
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub pages: usize,
    pub tables: usize,
    pub rows: usize,
    /// 상태 열이 있는 표
    pub status_tables: usize,
    /// 데이터 행이 없는 표
    pub empty_tables: usize,
}

impl ExtractionSummary {
    pub fn from_pages(pages: &[PageTables]) -> Self {
        let mut summary = Self {
            pages: pages.len(),
            ..Default::default()
        };

        for extracted in pages.iter().flat_map(|p| p.tables.iter()) {
            summary.tables += 1;
            summary.rows += extracted.table.row_count();
            if locate_status_column(&extracted.table.header).is_some() {
                summary.status_tables += 1;
            }
            if extracted.table.is_empty() {
                summary.empty_tables += 1;
            }
        }

        summary
    }
}

/// 파일 크기 표시 (1024KB 미만은 KB, 이상은 MB)
pub fn format_file_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        format!("{kb:.1} KB")
    } else {
        format!("{:.1} MB", kb / 1024.0)
    }
}
