//! 추출 설정 - 언어, 페이지, 신뢰도, 구조 감지 옵션, 필터 적용 여부

mod pages;

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub use pages::{PageRangeError, PageSelection};

const ENV_LANG: &str = "TABLE_EXTRACTOR_LANG";
const ENV_PAGES: &str = "TABLE_EXTRACTOR_PAGES";
const ENV_MIN_CONFIDENCE: &str = "TABLE_EXTRACTOR_MIN_CONFIDENCE";
const ENV_IMPLICIT_ROWS: &str = "TABLE_EXTRACTOR_IMPLICIT_ROWS";
const ENV_IMPLICIT_COLUMNS: &str = "TABLE_EXTRACTOR_IMPLICIT_COLUMNS";
const ENV_BORDERLESS_TABLES: &str = "TABLE_EXTRACTOR_BORDERLESS_TABLES";
const ENV_KOREAN_FILTER: &str = "TABLE_EXTRACTOR_KOREAN_FILTER";
const ENV_PYTHON: &str = "TABLE_EXTRACTOR_PYTHON";
const ENV_SCRIPT: &str = "TABLE_EXTRACTOR_SCRIPT";
const ENV_TIMEOUT_SECS: &str = "TABLE_EXTRACTOR_TIMEOUT_SECS";

pub const DEFAULT_MIN_CONFIDENCE: u8 = 40;
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("알 수 없는 OCR 언어: {0}")]
    UnknownLanguage(String),
    #[error("최소 신뢰도는 0~100 사이여야 합니다: {0}")]
    ConfidenceOutOfRange(u32),
    #[error("{key}: 숫자가 아닙니다: {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key}: 참/거짓 값이 아닙니다: {value:?}")]
    InvalidBool { key: &'static str, value: String },
    #[error("{key}: {source}")]
    Pages {
        key: &'static str,
        #[source]
        source: PageRangeError,
    },
}

/// OCR 언어
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OcrLanguage {
    #[default]
    Korean,
    English,
    Chinese,
    Japanese,
    French,
    German,
}

impl OcrLanguage {
    /// 엔진 언어 코드
    pub fn code(self) -> &'static str {
        match self {
            Self::Korean => "korean",
            Self::English => "en",
            Self::Chinese => "ch",
            Self::Japanese => "japan",
            Self::French => "french",
            Self::German => "german",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Korean => "Korean",
            Self::English => "English",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
            Self::French => "French",
            Self::German => "German",
        }
    }

    /// 이름 또는 엔진 코드로 찾는다
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let lower = value.trim().to_ascii_lowercase();
        let lang = match lower.as_str() {
            "korean" | "ko" => Self::Korean,
            "english" | "en" => Self::English,
            "chinese" | "ch" => Self::Chinese,
            "japanese" | "japan" | "ja" => Self::Japanese,
            "french" | "fr" => Self::French,
            "german" | "de" => Self::German,
            _ => return Err(ConfigError::UnknownLanguage(value.to_string())),
        };
        Ok(lang)
    }
}

/// 한 번의 추출 실행 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub lang: OcrLanguage,
    pub pages: PageSelection,
    /// OCR 최소 신뢰도 (0~100)
    pub min_confidence: u8,
    pub implicit_rows: bool,
    pub implicit_columns: bool,
    pub borderless_tables: bool,
    /// 인허가 검토표 필터 적용 여부
    pub apply_korean_filter: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lang: OcrLanguage::default(),
            pages: PageSelection::All,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            implicit_rows: false,
            implicit_columns: false,
            borderless_tables: false,
            apply_korean_filter: true,
        }
    }
}

impl ExtractionConfig {
    /// 프로세스 환경 변수에서 읽는다
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 조회 함수로 읽는다 (값이 없으면 기본값)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_LANG) {
            config.lang = OcrLanguage::parse(&value)?;
        }
        if let Some(value) = lookup(ENV_PAGES) {
            config.pages = PageSelection::parse(&value).map_err(|source| ConfigError::Pages {
                key: ENV_PAGES,
                source,
            })?;
        }
        if let Some(value) = lookup(ENV_MIN_CONFIDENCE) {
            let n: u32 = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: ENV_MIN_CONFIDENCE,
                value: value.clone(),
            })?;
            config.min_confidence = validate_confidence(n)?;
        }

        let flag = |key: &'static str, current: bool| -> Result<bool, ConfigError> {
            lookup(key).map_or(Ok(current), |v| parse_bool(key, &v))
        };
        config.implicit_rows = flag(ENV_IMPLICIT_ROWS, config.implicit_rows)?;
        config.implicit_columns = flag(ENV_IMPLICIT_COLUMNS, config.implicit_columns)?;
        config.borderless_tables = flag(ENV_BORDERLESS_TABLES, config.borderless_tables)?;
        config.apply_korean_filter = flag(ENV_KOREAN_FILTER, config.apply_korean_filter)?;

        Ok(config)
    }
}

/// 추출 엔진 실행 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub program: String,
    pub script: PathBuf,
    pub timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            script: PathBuf::from("scripts/extract_tables.py"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(program) = lookup(ENV_PYTHON).filter(|v| !v.trim().is_empty()) {
            config.program = program;
        }
        if let Some(script) = lookup(ENV_SCRIPT).filter(|v| !v.trim().is_empty()) {
            config.script = PathBuf::from(script);
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: ENV_TIMEOUT_SECS,
                value: value.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

pub fn validate_confidence(value: u32) -> Result<u8, ConfigError> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or(ConfigError::ConfidenceOutOfRange(value))
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
