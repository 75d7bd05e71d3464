//! 외부 표 추출 엔진 호출 (자식 프로세스)

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{EngineError, TableExtractor, parse_engine_output, validate_pdf};
use crate::config::{BridgeConfig, ExtractionConfig};
use crate::table::{PageTables, total_tables};

/// `<program> <script> --pdf ... --lang ...`를 실행하고 표준 출력의 JSON을 읽는다
#[derive(Debug, Clone)]
pub struct ExtractionBridge {
    config: BridgeConfig,
}

impl ExtractionBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// 엔진 인자 목록
    pub fn command_args(&self, pdf: &Path, config: &ExtractionConfig) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.config.script.clone().into_os_string(),
            "--pdf".into(),
            pdf.as_os_str().to_owned(),
            "--lang".into(),
            config.lang.code().into(),
            "--min-confidence".into(),
            config.min_confidence.to_string().into(),
        ];

        if let Some(pages) = config.pages.to_arg() {
            args.push("--pages".into());
            args.push(pages.into());
        }
        if config.implicit_rows {
            args.push("--implicit-rows".into());
        }
        if config.implicit_columns {
            args.push("--implicit-columns".into());
        }
        if config.borderless_tables {
            args.push("--borderless-tables".into());
        }

        args
    }

    /// 엔진을 실행하고 표준 출력을 돌려준다
    pub async fn run(&self, pdf: &Path, config: &ExtractionConfig) -> Result<String, EngineError> {
        let args = self.command_args(pdf, config);
        debug!(program = %self.config.program, ?args, "추출 엔진 실행");

        let child = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.config.timeout, child)
            .await
            .map_err(|_| EngineError::Timeout(self.config.timeout))?
            .map_err(|source| EngineError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(EngineError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            warn!(stderr = %stderr, "추출 엔진 경고 출력");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TableExtractor for ExtractionBridge {
    async fn extract(
        &self,
        pdf: &Path,
        config: &ExtractionConfig,
    ) -> Result<Vec<PageTables>, EngineError> {
        validate_pdf(pdf)?;

        let stdout = self.run(pdf, config).await?;
        let pages = parse_engine_output(&stdout)?;

        info!(
            pages = pages.len(),
            tables = total_tables(&pages),
            "추출 엔진 완료"
        );
        Ok(pages)
    }
}
