use clap::Parser;
use std::path::PathBuf;

use pump_cavitation_analyzer::{app, config, i18n};

/// 명령줄 인자.
#[derive(Debug, Parser)]
#[command(name = "pump_cavitation_analyzer")]
struct Cli {
    /// 분석할 CSV 파일. 주어지면 메뉴 없이 한 번 분석하고 종료한다.
    file: Option<PathBuf>,
    /// 언어 코드 (auto/ko/en/fr)
    #[arg(long, default_value = "auto")]
    lang: String,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, None);
    match cli.file {
        Some(path) => app::run_once(&path, &cfg, &tr)?,
        None => app::run(&mut cfg, &tr)?,
    }
    Ok(())
}
