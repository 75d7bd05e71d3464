//! 한국 인허가 검토표 필터
//!
//! 상태 열(`반영여부`, `적합여부`)이 있는 표에서 허용 목록에 든 상태의 행만 남긴다.
//! 상태 열이 없는 표는 그대로 돌려주므로 모든 표에 무조건 적용해도 된다.

mod status;

use std::collections::BTreeMap;

use crate::table::Table;

pub use status::{
    EXCLUSION_SET, INCLUSION_SET, STATUS_COLUMN_KEYWORDS, StatusClass, classify_status,
    is_included_status, is_status_column_name,
};

/// 상태 열 위치를 찾는다 (여러 개면 가장 앞의 열)
pub fn locate_status_column(header: &[String]) -> Option<usize> {
    header.iter().position(|name| is_status_column_name(name))
}

/// 표 하나를 필터링한 새 표를 만든다
pub fn filter_table(table: &Table) -> Table {
    let Some(status_idx) = locate_status_column(&table.header) else {
        return table.clone();
    };

    let rows = table
        .rows
        .iter()
        // 상태 열까지 닿지 않는 행은 버린다
        .filter(|row| row.get(status_idx).is_some_and(|v| is_included_status(v)))
        .cloned()
        .collect();

    Table {
        header: table.header.clone(),
        rows,
    }
}

/// 표마다 독립적으로 필터링 (순서 유지, 빈 표도 남김)
pub fn filter_tables(tables: &[Table]) -> Vec<Table> {
    tables.iter().map(filter_table).collect()
}

/// 상태값 집계
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub status_column: usize,
    pub included: usize,
    pub excluded: usize,
    pub blank: usize,
    /// 상태 열까지 셀이 없는 행
    pub missing: usize,
    /// 목록에 없는 값과 그 개수
    pub unrecognized: BTreeMap<String, usize>,
}

impl StatusSummary {
    pub fn dropped(&self) -> usize {
        self.excluded + self.blank + self.missing + self.unrecognized.values().sum::<usize>()
    }
}

/// 상태 열의 값을 분류해 센다 (상태 열이 없으면 `None`)
pub fn summarize_statuses(table: &Table) -> Option<StatusSummary> {
    let status_column = locate_status_column(&table.header)?;
    let mut summary = StatusSummary {
        status_column,
        ..Default::default()
    };

    for row in &table.rows {
        let Some(value) = row.get(status_column) else {
            summary.missing += 1;
            continue;
        };

        match classify_status(value) {
            StatusClass::Included => summary.included += 1,
            StatusClass::Excluded => summary.excluded += 1,
            StatusClass::Blank => summary.blank += 1,
            StatusClass::Unrecognized => {
                *summary
                    .unrecognized
                    .entry(value.trim().to_string())
                    .or_default() += 1;
            }
        }
    }

    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn table(header: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(strings(header), rows.iter().map(|r| strings(r)).collect())
    }

    fn scenario_a() -> Table {
        table(
            &["항목", "반영여부", "비고"],
            &[&["1", "반영", "ok"], &["2", "미반영", "no"], &["3", "조건부적합", "-"]],
        )
    }

    #[test]
    fn scenario_a_keeps_reflected_rows() {
        let filtered = filter_table(&scenario_a());

        assert_eq!(filtered.header, strings(&["항목", "반영여부", "비고"]));
        assert_eq!(
            filtered.rows,
            vec![strings(&["1", "반영", "ok"]), strings(&["3", "조건부적합", "-"])]
        );
    }

    #[test]
    fn scenario_b_unrelated_table_is_unchanged() {
        let input = table(&["Name", "Status"], &[&["a", "미반영"], &["b", ""]]);
        assert_eq!(filter_table(&input), input);
    }

    #[test]
    fn scenario_c_all_rows_dropped_leaves_header() {
        let input = table(&["항목", "적합여부"], &[&["1", "해당없음"]]);

        let filtered = filter_table(&input);

        assert_eq!(filtered.header, input.header);
        assert!(filtered.rows.is_empty());
    }

    #[test]
    fn scenario_d_sequence_keeps_order_and_empty_tables() {
        let first = table(&["Name"], &[&["x"]]);
        let third = table(&["항목", "적합여부"], &[&["1", "해당없음"]]);
        let tables = vec![first.clone(), scenario_a(), third.clone()];

        let filtered = filter_tables(&tables);

        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0], first);
        assert_eq!(filtered[1], filter_table(&scenario_a()));
        assert_eq!(filtered[2].header, third.header);
        assert!(filtered[2].rows.is_empty());
    }

    #[test]
    fn locates_first_matching_column() {
        let header = strings(&["번호", " 적합여부 ", "반영여부"]);
        assert_eq!(locate_status_column(&header), Some(1));
        assert_eq!(locate_status_column(&[]), None);
        assert_eq!(locate_status_column(&strings(&["", "비고"])), None);
    }

    #[test]
    fn unknown_status_is_dropped() {
        let input = table(
            &["항목", "반영여부"],
            &[&["1", "검토중"], &["2", "권고"], &["3", "반영예정"], &["4", "미 반영"]],
        );

        let filtered = filter_table(&input);

        assert_eq!(filtered.rows, vec![strings(&["2", "권고"])]);
    }

    #[test]
    fn whitespace_around_status_is_ignored() {
        let input = table(&["항목", "적합여부"], &[&["1", " 적합 "], &["2", "\t부분반영"]]);
        assert_eq!(filter_table(&input).rows.len(), 2);
    }

    #[test]
    fn blank_and_ragged_rows_are_dropped() {
        let input = table(
            &["항목", "비고", "반영여부"],
            &[&["1", "", ""], &["2", "  ", "   "], &["3"], &[], &["5", "-", "반영"]],
        );

        let filtered = filter_table(&input);

        assert_eq!(filtered.rows, vec![strings(&["5", "-", "반영"])]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let once = filter_table(&scenario_a());
        assert_eq!(filter_table(&once), once);

        let unrelated = table(&["a"], &[&["1"]]);
        let once = filter_table(&unrelated);
        assert_eq!(filter_table(&once), once);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = scenario_a();
        let before = input.clone();
        let _ = filter_table(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn summarizes_status_values() {
        let input = table(
            &["항목", "반영여부"],
            &[
                &["1", "반영"],
                &["2", "미반영"],
                &["3", "검토중"],
                &["4", " 검토중 "],
                &["5", ""],
                &["6"],
            ],
        );

        let summary = summarize_statuses(&input).expect("status column");

        assert_eq!(summary.status_column, 1);
        assert_eq!(summary.included, 1);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.blank, 1);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.unrecognized.get("검토중"), Some(&2));
        assert_eq!(summary.dropped(), 5);
        assert_eq!(
            filter_table(&input).row_count(),
            input.row_count() - summary.dropped()
        );
    }

    #[test]
    fn no_summary_without_status_column() {
        assert!(summarize_statuses(&table(&["Name"], &[&["x"]])).is_none());
    }
}
