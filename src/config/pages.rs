//! 페이지 선택 문자열 해석 ("1,2,5" 또는 "1-5")

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRangeError {
    #[error("빈 페이지 항목이 있습니다: {0:?}")]
    EmptyPart(String),
    #[error("잘못된 페이지 형식: {0:?} (예: 1,2,5 또는 1-5)")]
    InvalidPart(String),
    #[error("페이지 번호는 1부터 시작합니다: {0:?}")]
    ZeroPage(String),
    #[error("범위의 시작이 끝보다 큽니다: {0:?}")]
    ReversedRange(String),
    #[error("페이지 번호가 너무 큽니다 (최대 {}): {:?}", MAX_PAGE, .0)]
    PageTooLarge(String),
}

/// 지정할 수 있는 가장 큰 페이지 번호
pub const MAX_PAGE: usize = 10_000;

/// 추출할 페이지
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    #[default]
    All,
    /// 정렬되고 중복이 없는 1부터의 페이지 번호
    Pages(Vec<usize>),
}

fn part_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s*(?:-\s*(\d+))?$").expect("valid page regex"))
}

impl PageSelection {
    pub fn parse(input: &str) -> Result<Self, PageRangeError> {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let mut pages = BTreeSet::new();

        for raw in input.split(',') {
            let part = raw.trim();
            if part.is_empty() {
                return Err(PageRangeError::EmptyPart(input.to_string()));
            }

            let caps = part_regex()
                .captures(part)
                .ok_or_else(|| PageRangeError::InvalidPart(part.to_string()))?;

            let start = parse_page(&caps[1], part)?;
            let end = match caps.get(2) {
                Some(m) => parse_page(m.as_str(), part)?,
                None => start,
            };

            if start > end {
                return Err(PageRangeError::ReversedRange(part.to_string()));
            }

            pages.extend(start..=end);
        }

        Ok(Self::Pages(pages.into_iter().collect()))
    }

    /// 엔진에 넘길 쉼표 구분 목록 (전체면 `None`)
    pub fn to_arg(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Pages(pages) => Some(
                pages
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    pub fn contains(&self, page: usize) -> bool {
        match self {
            Self::All => true,
            Self::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }
}

impl fmt::Display for PageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_arg() {
            Some(list) => f.write_str(&list),
            None => f.write_str("all"),
        }
    }
}

impl std::str::FromStr for PageSelection {
    type Err = PageRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_page(digits: &str, part: &str) -> Result<usize, PageRangeError> {
    let page: usize = digits
        .parse()
        .map_err(|_| PageRangeError::InvalidPart(part.to_string()))?;
    if page == 0 {
        return Err(PageRangeError::ZeroPage(part.to_string()));
    }
    if page > MAX_PAGE {
        return Err(PageRangeError::PageTooLarge(part.to_string()));
    }
    Ok(page)
}
