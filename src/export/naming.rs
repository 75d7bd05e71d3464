//! 출력 파일 이름 규칙

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::table::ExtractedTable;

/// 표 하나의 CSV 파일 이름
pub fn csv_file_name(table: &ExtractedTable, filtered: bool) -> String {
    if filtered {
        format!("table_p{}_{}_filtered.csv", table.page, table.index)
    } else {
        format!("table_page{}_{}.csv", table.page, table.index)
    }
}

/// 입력 PDF에 대한 기본 출력 폴더 (`<이름>_tables`)
pub fn output_dir_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(sanitize_for_filename)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string());
    PathBuf::from(format!("{stem}_tables"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn underscore_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_+").unwrap())
}

/// 파일 이름에 쓸 수 없는 문자를 바꾼다
pub fn sanitize_for_filename(text: &str) -> String {
    let invalid_chars = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];
    let result: String = text
        .chars()
        .map(|c| if invalid_chars.contains(&c) { '_' } else { c })
        .collect();

    let result = whitespace_re().replace_all(&result, "_");
    let result = underscore_re().replace_all(&result, "_");
    let result = result.trim_matches('_');

    // 최대 50자
    result.chars().take(50).collect()
}

/// 같은 이름이 있으면 `_1`, `_2`... 를 붙인 경로
pub fn unique_path(directory: &Path, filename: &str) -> PathBuf {
    let path = Path::new(filename);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(filename);
    let ext = path.extension().and_then(|s| s.to_str());

    let mut candidate = directory.join(filename);
    let mut counter = 1;

    while candidate.exists() {
        let name = match ext {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        candidate = directory.join(name);
        counter += 1;
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn extracted(page: usize, index: usize) -> ExtractedTable {
        ExtractedTable {
            page,
            index,
            confidence: None,
            table: Table::default(),
        }
    }

    #[test]
    fn csv_names_follow_filter_state() {
        assert_eq!(csv_file_name(&extracted(2, 1), false), "table_page2_1.csv");
        assert_eq!(csv_file_name(&extracted(2, 1), true), "table_p2_1_filtered.csv");
    }

    #[test]
    fn sanitizes_names() {
        assert_eq!(sanitize_for_filename("인허가 검토: 결과*최종"), "인허가_검토_결과_최종");
        assert_eq!(sanitize_for_filename("  a  //  b  "), "a_b");
        assert_eq!(sanitize_for_filename(&"가".repeat(60)).chars().count(), 50);
    }

    #[test]
    fn output_dir_uses_pdf_stem() {
        assert_eq!(
            output_dir_for(Path::new("/tmp/협의 결과.pdf")),
            PathBuf::from("협의_결과_tables")
        );
        assert_eq!(output_dir_for(Path::new("/")), PathBuf::from("document_tables"));
    }

    #[test]
    fn unique_path_appends_counter() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_path(dir.path(), "t.csv"), dir.path().join("t.csv"));

        std::fs::write(dir.path().join("t.csv"), "").unwrap();
        std::fs::write(dir.path().join("t_1.csv"), "").unwrap();
        assert_eq!(unique_path(dir.path(), "t.csv"), dir.path().join("t_2.csv"));
    }
}
