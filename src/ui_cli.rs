use std::io::{self, Write};

use crate::app::AppError;
use crate::cavitation::analysis::{self, AnalysisState};
use crate::config::Config;
use crate::csv_import::layout::SkipReason;
use crate::envelope::{FlowBand, PumpEnvelope};
use crate::i18n::{keys, Translator};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    LoadCsv,
    Table,
    Summary,
    Envelope,
    Clear,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_LOAD));
    println!("{}", tr.t(keys::MAIN_MENU_TABLE));
    println!("{}", tr.t(keys::MAIN_MENU_SUMMARY));
    println!("{}", tr.t(keys::MAIN_MENU_ENVELOPE));
    println!("{}", tr.t(keys::MAIN_MENU_CLEAR));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::LoadCsv),
            "2" => return Ok(MenuChoice::Table),
            "3" => return Ok(MenuChoice::Summary),
            "4" => return Ok(MenuChoice::Envelope),
            "5" => return Ok(MenuChoice::Clear),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// CSV 불러오기 메뉴를 처리한다.
///
/// 파일 읽기 실패나 형식 오류는 배너 한 줄로 알리고 메뉴로 돌아간다.
/// 로드마다 성공/실패 배너 하나만 띄우며, 행 단위 진단은 개수로만 알린다.
pub fn handle_load(tr: &Translator, state: &mut AnalysisState) -> Result<(), AppError> {
    let input = read_line(tr.t(keys::PROMPT_CSV_PATH))?;
    let path = input.trim();
    if path.is_empty() {
        println!("{}", tr.t(keys::LOAD_CANCELLED));
        return Ok(());
    }
    if !path.to_lowercase().ends_with(".csv") {
        println!("{}", tr.t(keys::WARN_NOT_CSV));
        let answer = read_line(tr.t(keys::PROMPT_CONTINUE))?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("{}", tr.t(keys::LOAD_CANCELLED));
            return Ok(());
        }
    }

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            println!("{} {err}", tr.t(keys::LOAD_FAILED));
            return Ok(());
        }
    };
    match analysis::analyze_with_diagnostics(&text) {
        Ok((result, skips)) => {
            println!("{} {}", tr.t(keys::LOAD_SUCCESS), result.total());
            let skipped_rows = count_skipped_rows(&skips);
            if skipped_rows > 0 {
                println!("{} {skipped_rows}", tr.t(keys::SKIPPED_ROWS));
            }
            state.replace(result);
        }
        Err(err) => println!("{} {err}", tr.t(keys::LOAD_FAILED)),
    }
    Ok(())
}

/// 행 하나에 대응하는 탈락 사유만 센다. (CurveUnusable은 행이 아니다)
pub fn count_skipped_rows(skips: &[SkipReason]) -> usize {
    skips
        .iter()
        .filter(|s| !matches!(s, SkipReason::CurveUnusable))
        .count()
}

/// 운전점 테이블을 출력한다. 운전범위가 설정돼 있으면 유량 구간을 함께
/// 표기한다.
pub fn show_table(tr: &Translator, state: &AnalysisState, envelope: Option<&PumpEnvelope>) {
    println!("{}", tr.t(keys::TABLE_HEADING));
    let records = match state.current() {
        Some(result) if !result.records.is_empty() => &result.records,
        _ => {
            println!("{}", tr.t(keys::TABLE_EMPTY));
            return;
        }
    };
    println!("{}", tr.t(keys::TABLE_COLUMNS));
    for r in records {
        let status = if r.is_safe {
            tr.t(keys::STATUS_OK)
        } else {
            tr.t(keys::STATUS_RISK)
        };
        let line = format!(
            "{:>8.1} {:>10.2} {:>10.1} {:>10.2} {:>10.2}  {}",
            r.temperature_c, r.pressure_bar, r.flow_m3_per_h, r.npshr_m, r.npsha_m, status
        );
        match envelope {
            Some(env) => {
                let band = match env.band(r.flow_m3_per_h) {
                    FlowBand::Preferred => tr.t(keys::BAND_PREFERRED),
                    FlowBand::Allowable => tr.t(keys::BAND_ALLOWABLE),
                    FlowBand::Outside => tr.t(keys::BAND_OUTSIDE),
                };
                println!("{line} [{band}]");
            }
            None => println!("{line}"),
        }
    }
}

/// 요약 통계를 출력한다. 레코드가 없으면 통계 대신 안내만 띄운다.
pub fn show_summary(tr: &Translator, state: &AnalysisState) {
    println!("{}", tr.t(keys::SUMMARY_HEADING));
    let result = match state.current() {
        Some(result) if result.total() > 0 => result,
        _ => {
            println!("{}", tr.t(keys::TABLE_EMPTY));
            return;
        }
    };
    println!("{} {}", tr.t(keys::SUMMARY_TOTAL), result.total());
    println!("{} {}", tr.t(keys::SUMMARY_SAFE), result.safe_count);
    println!("{} {}", tr.t(keys::SUMMARY_DANGER), result.unsafe_count);
    println!("{} {:.1}%", tr.t(keys::SUMMARY_RISK), result.risk_percentage());
}

/// 펌프 운전범위 설정 메뉴를 처리한다. 저장은 호출 측(config.save) 몫이다.
pub fn handle_envelope(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ENVELOPE_HEADING));
    match &cfg.envelope {
        Some(env) => println!(
            "{} {}  Q={} m3/h  AOR {}~{} m3/h  POR {}~{} m3/h  NPSHr {} m",
            tr.t(keys::ENVELOPE_CURRENT),
            env.pump_type,
            env.rated_flow_m3_per_h,
            env.aor_min_m3_per_h,
            env.aor_max_m3_per_h,
            env.por_min_m3_per_h,
            env.por_max_m3_per_h,
            env.rated_npshr_m
        ),
        None => println!("{}", tr.t(keys::ENVELOPE_NONE)),
    }
    println!("{}", tr.t(keys::ENVELOPE_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    match sel.trim() {
        "1" => {
            let pump_type = read_line(tr.t(keys::ENVELOPE_PROMPT_TYPE))?;
            let rated_flow_m3_per_h = read_f64(tr, tr.t(keys::ENVELOPE_PROMPT_RATED_FLOW))?;
            let aor_min_m3_per_h = read_f64(tr, tr.t(keys::ENVELOPE_PROMPT_AOR_MIN))?;
            let aor_max_m3_per_h = read_f64(tr, tr.t(keys::ENVELOPE_PROMPT_AOR_MAX))?;
            let por_min_m3_per_h = read_f64(tr, tr.t(keys::ENVELOPE_PROMPT_POR_MIN))?;
            let por_max_m3_per_h = read_f64(tr, tr.t(keys::ENVELOPE_PROMPT_POR_MAX))?;
            let rated_npshr_m = read_f64(tr, tr.t(keys::ENVELOPE_PROMPT_RATED_NPSHR))?;
            cfg.envelope = Some(PumpEnvelope {
                pump_type: pump_type.trim().to_string(),
                rated_flow_m3_per_h,
                aor_min_m3_per_h,
                aor_max_m3_per_h,
                por_min_m3_per_h,
                por_max_m3_per_h,
                rated_npshr_m,
            });
            println!("{}", tr.t(keys::ENVELOPE_SAVED));
        }
        "2" => {
            cfg.envelope = None;
            println!("{}", tr.t(keys::ENVELOPE_CLEARED));
        }
        _ => {}
    }
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim_end().to_string())
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        if let Ok(v) = s.trim().parse::<f64>() {
            return Ok(v);
        }
        println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
    }
}
