use std::path::Path;

use crate::cavitation::analysis::{self, AnalysisState};
use crate::config::Config;
use crate::csv_import::tokenizer::ImportError;
use crate::i18n::{keys, Translator};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// CSV 전체 구조 오류
    Import(ImportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Import(e) => write!(f, "CSV 형식 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        AppError::Import(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    let mut state = AnalysisState::new();
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::LoadCsv => ui_cli::handle_load(tr, &mut state)?,
            MenuChoice::Table => ui_cli::show_table(tr, &state, config.envelope.as_ref()),
            MenuChoice::Summary => ui_cli::show_summary(tr, &state),
            MenuChoice::Envelope => {
                ui_cli::handle_envelope(tr, config)?;
                config.save()?;
            }
            MenuChoice::Clear => {
                state.clear();
                println!("{}", tr.t(keys::DATA_CLEARED));
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// 파일 하나를 분석해 테이블과 요약을 출력하고 끝내는 1회 실행 모드.
///
/// 읽기 실패나 형식 오류는 그대로 호출 측에 올라간다.
pub fn run_once(path: &Path, config: &Config, tr: &Translator) -> Result<(), AppError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        println!("{}", tr.t(keys::WARN_NOT_CSV));
    }

    let text = std::fs::read_to_string(path)?;
    let (result, skips) = analysis::analyze_with_diagnostics(&text)?;
    println!("{} {}", tr.t(keys::LOAD_SUCCESS), result.total());
    let skipped_rows = ui_cli::count_skipped_rows(&skips);
    if skipped_rows > 0 {
        println!("{} {skipped_rows}", tr.t(keys::SKIPPED_ROWS));
    }

    let mut state = AnalysisState::new();
    state.replace(result);
    ui_cli::show_table(tr, &state, config.envelope.as_ref());
    ui_cli::show_summary(tr, &state);
    Ok(())
}
