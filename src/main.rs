//! 인허가 검토표 추출기 - 메인 엔트리포인트

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use permit_table_extractor::config::{
    BridgeConfig, ExtractionConfig, OcrLanguage, PageSelection, validate_confidence,
};
use permit_table_extractor::engine::{ExtractionBridge, JsonTableSource, validate_pdf};
use permit_table_extractor::export::{output_dir_for, render_table_markdown};
use permit_table_extractor::pipeline::{
    ExportFormat, ExportOptions, ExtractionSummary, export_tables, extract_tables,
    format_file_size,
};
use permit_table_extractor::table::PageTables;

#[derive(Parser, Debug)]
#[command(name = "permit-tables")]
#[command(version, about = "PDF 표 추출 및 인허가 검토표 필터", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// PDF에서 표를 추출해 내보낸다
    Extract {
        /// 입력 PDF
        input: PathBuf,

        /// OCR 언어
        #[arg(long, value_enum)]
        lang: Option<OcrLanguage>,

        /// 추출할 페이지 (예: 1,2,5 또는 1-5)
        #[arg(long)]
        pages: Option<String>,

        /// 최소 OCR 신뢰도 (0~100)
        #[arg(long)]
        min_confidence: Option<u32>,

        /// 암시적 행 감지
        #[arg(long)]
        implicit_rows: bool,

        /// 암시적 열 감지
        #[arg(long)]
        implicit_columns: bool,

        /// 테두리 없는 표 감지
        #[arg(long)]
        borderless_tables: bool,

        /// 인허가 검토표 필터를 끈다
        #[arg(long)]
        no_korean_filter: bool,

        /// 추출 엔진 스크립트 경로
        #[arg(long)]
        script: Option<PathBuf>,

        /// 추출 엔진 제한 시간 (초)
        #[arg(long)]
        timeout_secs: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// 저장된 표 JSON에 필터를 적용해 내보낸다
    Filter {
        /// 엔진 출력 또는 tables.json
        input: PathBuf,

        /// 필터 대상 페이지
        #[arg(long)]
        pages: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// PDF 파일 정보
    Info {
        /// 입력 PDF
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// 출력 폴더 (기본: ./<입력 이름>_tables)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 내보낼 형식
    #[arg(short, long, value_enum, default_values_t = vec![ExportFormat::Csv])]
    format: Vec<ExportFormat>,

    /// 데이터 행이 없는 표도 CSV로 쓴다
    #[arg(long)]
    keep_empty: bool,

    /// 표를 터미널에 미리 보여 준다
    #[arg(long)]
    preview: bool,

    /// 끝난 뒤 출력 폴더를 연다
    #[arg(long)]
    open: bool,
}

fn main() -> Result<()> {
    // 환경 변수 읽기
    dotenvy::dotenv().ok();

    // 로깅 초기화
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Tokio 런타임 생성 실패")?;

    match cli.command {
        Commands::Extract {
            input,
            lang,
            pages,
            min_confidence,
            implicit_rows,
            implicit_columns,
            borderless_tables,
            no_korean_filter,
            script,
            timeout_secs,
            output,
        } => {
            let mut config = ExtractionConfig::from_env().context("환경 설정 오류")?;
            if let Some(lang) = lang {
                config.lang = lang;
            }
            if let Some(pages) = pages {
                config.pages = PageSelection::parse(&pages)?;
            }
            if let Some(n) = min_confidence {
                config.min_confidence = validate_confidence(n)?;
            }
            config.implicit_rows |= implicit_rows;
            config.implicit_columns |= implicit_columns;
            config.borderless_tables |= borderless_tables;
            if no_korean_filter {
                config.apply_korean_filter = false;
            }

            let mut bridge_config = BridgeConfig::from_env().context("환경 설정 오류")?;
            if let Some(script) = script {
                bridge_config.script = script;
            }
            if let Some(secs) = timeout_secs {
                bridge_config.timeout = Duration::from_secs(secs);
            }

            let bridge = ExtractionBridge::new(bridge_config);
            let pages = runtime.block_on(extract_tables(&bridge, &input, &config))?;
            finish(&input, &pages, config.apply_korean_filter, output)
        }
        Commands::Filter {
            input,
            pages,
            output,
        } => {
            let config = ExtractionConfig {
                pages: match pages {
                    Some(p) => PageSelection::parse(&p)?,
                    None => PageSelection::All,
                },
                ..Default::default()
            };

            let source = JsonTableSource::new(&input);
            let filtered = runtime.block_on(extract_tables(&source, &input, &config))?;
            finish(&input, &filtered, config.apply_korean_filter, output)
        }
        Commands::Info { input } => show_info(&input),
    }
}

/// 요약 출력, 미리보기, 내보내기
fn finish(input: &Path, pages: &[PageTables], filtered: bool, args: OutputArgs) -> Result<()> {
    let summary = ExtractionSummary::from_pages(pages);
    println!(
        "[*] {} 페이지에서 표 {}개 발견 (데이터 행 {}개)",
        summary.pages, summary.tables, summary.rows
    );
    if filtered {
        println!(
            "[*] 검토표 필터: 상태 열이 있는 표 {}개, 남은 행이 없는 표 {}개",
            summary.status_tables, summary.empty_tables
        );
    }

    if args.preview {
        for page in pages {
            println!("\n=== Page {} ===", page.page);
            for extracted in &page.tables {
                println!("\n--- Table {} ---", extracted.index);
                print!("{}", render_table_markdown(&extracted.table));
            }
        }
        println!();
    }

    let out_dir = args.output.unwrap_or_else(|| output_dir_for(input));
    let source = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let options = ExportOptions {
        out_dir: out_dir.clone(),
        formats: args.format,
        source,
        filtered,
        keep_empty: args.keep_empty,
    };
    let written = export_tables(pages, &options)?;

    for path in &written {
        println!("  -> {}", path.display());
    }
    println!("[✓] 완료: {}", out_dir.display());

    if args.open {
        if let Err(e) = open::that(&out_dir) {
            tracing::warn!(error = %e, "출력 폴더를 열 수 없음");
        }
    }

    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    validate_pdf(input)?;

    let metadata = std::fs::metadata(input)
        .with_context(|| format!("파일 정보를 읽을 수 없음: {}", input.display()))?;
    let config = ExtractionConfig::from_env().context("환경 설정 오류")?;

    info!(path = %input.display(), "PDF 정보");
    println!("PDF 정보");
    println!("========");
    println!("파일: {}", input.display());
    println!("크기: {}", format_file_size(metadata.len()));
    println!("언어: {}", config.lang.display_name());
    println!("페이지: {}", config.pages);
    println!("검토표 필터: {}", if config.apply_korean_filter { "사용" } else { "사용 안 함" });

    Ok(())
}
