//! 검토 결과 상태값 분류

/// 상태 열 이름에 포함되는 키워드
pub const STATUS_COLUMN_KEYWORDS: &[&str] = &["반영여부", "적합여부"];

/// 남길 상태값 (허용 목록)
pub const INCLUSION_SET: &[&str] = &["반영", "부분반영", "권고", "적합", "조건부적합"];

/// 버려지는 것으로 알려진 상태값
///
/// 참고용 목록이다. 실제 판정은 [`INCLUSION_SET`]에 없는지로 한다.
pub const EXCLUSION_SET: &[&str] = &["미반영", "해당없음", "해당사항 없음"];

/// 상태값 분류 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 허용 목록에 있음
    Included,
    /// 알려진 제외 값
    Excluded,
    /// 비어 있거나 공백뿐
    Blank,
    /// 어느 목록에도 없는 값
    Unrecognized,
}

/// 앞뒤 공백을 제거한 값이 허용 목록에 있는지
pub fn is_included_status(value: &str) -> bool {
    INCLUSION_SET.contains(&value.trim())
}

/// 상태값 분류
pub fn classify_status(value: &str) -> StatusClass {
    let value = value.trim();

    if value.is_empty() {
        StatusClass::Blank
    } else if INCLUSION_SET.contains(&value) {
        StatusClass::Included
    } else if EXCLUSION_SET.contains(&value) {
        StatusClass::Excluded
    } else {
        StatusClass::Unrecognized
    }
}

/// 열 이름이 상태 열인지 (공백 제거 후 부분 문자열 일치)
pub fn is_status_column_name(name: &str) -> bool {
    let name = name.trim();
    STATUS_COLUMN_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}
