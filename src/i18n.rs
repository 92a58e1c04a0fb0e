use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const DATA_CLEARED: &str = "general.data_cleared";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_LOAD: &str = "main_menu.load_csv";
    pub const MAIN_MENU_TABLE: &str = "main_menu.table";
    pub const MAIN_MENU_SUMMARY: &str = "main_menu.summary";
    pub const MAIN_MENU_ENVELOPE: &str = "main_menu.envelope";
    pub const MAIN_MENU_CLEAR: &str = "main_menu.clear";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PROMPT_CSV_PATH: &str = "load.prompt_path";
    pub const WARN_NOT_CSV: &str = "load.warn_not_csv";
    pub const PROMPT_CONTINUE: &str = "load.prompt_continue";
    pub const LOAD_CANCELLED: &str = "load.cancelled";
    pub const LOAD_SUCCESS: &str = "load.success";
    pub const LOAD_FAILED: &str = "load.failed";
    pub const SKIPPED_ROWS: &str = "load.skipped_rows";

    pub const TABLE_HEADING: &str = "table.heading";
    pub const TABLE_EMPTY: &str = "table.empty";
    pub const TABLE_COLUMNS: &str = "table.columns";
    pub const STATUS_OK: &str = "table.status_ok";
    pub const STATUS_RISK: &str = "table.status_risk";
    pub const BAND_PREFERRED: &str = "table.band_preferred";
    pub const BAND_ALLOWABLE: &str = "table.band_allowable";
    pub const BAND_OUTSIDE: &str = "table.band_outside";

    pub const SUMMARY_HEADING: &str = "summary.heading";
    pub const SUMMARY_TOTAL: &str = "summary.total";
    pub const SUMMARY_SAFE: &str = "summary.safe";
    pub const SUMMARY_DANGER: &str = "summary.danger";
    pub const SUMMARY_RISK: &str = "summary.risk";

    pub const ENVELOPE_HEADING: &str = "envelope.heading";
    pub const ENVELOPE_CURRENT: &str = "envelope.current";
    pub const ENVELOPE_NONE: &str = "envelope.none";
    pub const ENVELOPE_OPTIONS: &str = "envelope.options";
    pub const ENVELOPE_PROMPT_TYPE: &str = "envelope.prompt_type";
    pub const ENVELOPE_PROMPT_RATED_FLOW: &str = "envelope.prompt_rated_flow";
    pub const ENVELOPE_PROMPT_AOR_MIN: &str = "envelope.prompt_aor_min";
    pub const ENVELOPE_PROMPT_AOR_MAX: &str = "envelope.prompt_aor_max";
    pub const ENVELOPE_PROMPT_POR_MIN: &str = "envelope.prompt_por_min";
    pub const ENVELOPE_PROMPT_POR_MAX: &str = "envelope.prompt_por_max";
    pub const ENVELOPE_PROMPT_RATED_NPSHR: &str = "envelope.prompt_rated_npshr";
    pub const ENVELOPE_SAVED: &str = "envelope.saved";
    pub const ENVELOPE_CLEARED: &str = "envelope.cleared";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    /// 내장 테이블 없이 언어팩으로만 제공한다. 팩에 없는 키는 영어로 폴백.
    Fr,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("fr") {
            Language::Fr
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 테이블 → 한국어 순으로 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En | Language::Fr => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" => Some("en".into()),
        "fr" | "fr-fr" => Some("fr-fr".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("fr") => Some("fr-fr".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        "fr" => Some("fr-fr".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., fr-fr)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., fr)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함). ko/en은 내장
/// 테이블이 있으므로 프랑스어 팩만 포함한다.
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "fr-fr" | "fr" => parse_toml_to_map(include_str!("../locales/fr-fr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        DATA_CLEARED => "데이터를 지웠습니다.",
        MAIN_MENU_TITLE => "\n=== Pump Cavitation Analyzer ===",
        MAIN_MENU_LOAD => "1) CSV 불러오기",
        MAIN_MENU_TABLE => "2) 운전점 테이블",
        MAIN_MENU_SUMMARY => "3) 요약 통계",
        MAIN_MENU_ENVELOPE => "4) 펌프 운전범위 설정",
        MAIN_MENU_CLEAR => "5) 데이터 지우기",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        PROMPT_CSV_PATH => "CSV 파일 경로: ",
        WARN_NOT_CSV => "경고: .csv 확장자가 아닙니다.",
        PROMPT_CONTINUE => "계속할까요? (y/N): ",
        LOAD_CANCELLED => "불러오기를 취소했습니다.",
        LOAD_SUCCESS => "불러온 레코드:",
        LOAD_FAILED => "불러오기 실패:",
        SKIPPED_ROWS => "건너뛴 행:",
        TABLE_HEADING => "\n-- 운전점 테이블 --",
        TABLE_EMPTY => "불러온 데이터가 없습니다. 먼저 CSV를 불러오세요.",
        TABLE_COLUMNS => "  온도(°C)   압력(bar)  유량(m3/h)   NPSHr(m)   NPSHa(m)  상태",
        STATUS_OK => "✅ 정상",
        STATUS_RISK => "⚠️ 공동현상 위험",
        BAND_PREFERRED => "POR",
        BAND_ALLOWABLE => "AOR",
        BAND_OUTSIDE => "범위 밖",
        SUMMARY_HEADING => "\n-- 요약 통계 --",
        SUMMARY_TOTAL => "전체 레코드:",
        SUMMARY_SAFE => "안전:",
        SUMMARY_DANGER => "공동현상 위험:",
        SUMMARY_RISK => "위험 비율:",
        ENVELOPE_HEADING => "\n-- 펌프 운전범위 --",
        ENVELOPE_CURRENT => "현재 설정:",
        ENVELOPE_NONE => "설정된 운전범위가 없습니다.",
        ENVELOPE_OPTIONS => "1) 입력/수정  2) 지우기  0) 취소",
        ENVELOPE_PROMPT_TYPE => "펌프 형식 (예: Centrifugal): ",
        ENVELOPE_PROMPT_RATED_FLOW => "정격 유량 [m3/h]: ",
        ENVELOPE_PROMPT_AOR_MIN => "AOR 하한 [m3/h]: ",
        ENVELOPE_PROMPT_AOR_MAX => "AOR 상한 [m3/h]: ",
        ENVELOPE_PROMPT_POR_MIN => "POR 하한 [m3/h]: ",
        ENVELOPE_PROMPT_POR_MAX => "POR 상한 [m3/h]: ",
        ENVELOPE_PROMPT_RATED_NPSHR => "정격점 NPSHr [m]: ",
        ENVELOPE_SAVED => "운전범위를 저장했습니다.",
        ENVELOPE_CLEARED => "운전범위를 지웠습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        DATA_CLEARED => "Data cleared.",
        MAIN_MENU_TITLE => "\n=== Pump Cavitation Analyzer ===",
        MAIN_MENU_LOAD => "1) Load CSV",
        MAIN_MENU_TABLE => "2) Operating-point table",
        MAIN_MENU_SUMMARY => "3) Summary statistics",
        MAIN_MENU_ENVELOPE => "4) Pump operating envelope",
        MAIN_MENU_CLEAR => "5) Clear data",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PROMPT_CSV_PATH => "CSV file path: ",
        WARN_NOT_CSV => "Warning: file does not have a .csv extension.",
        PROMPT_CONTINUE => "Continue anyway? (y/N): ",
        LOAD_CANCELLED => "Load cancelled.",
        LOAD_SUCCESS => "Records loaded:",
        LOAD_FAILED => "Load failed:",
        SKIPPED_ROWS => "Rows skipped:",
        TABLE_HEADING => "\n-- Operating Points --",
        TABLE_EMPTY => "No data loaded. Load a CSV file first.",
        TABLE_COLUMNS => "   T(°C)     P(bar)    Q(m3/h)   NPSHr(m)   NPSHa(m)  Status",
        STATUS_OK => "✅ OK",
        STATUS_RISK => "⚠️ Cavitation Risk",
        BAND_PREFERRED => "POR",
        BAND_ALLOWABLE => "AOR",
        BAND_OUTSIDE => "outside",
        SUMMARY_HEADING => "\n-- Summary --",
        SUMMARY_TOTAL => "Total records:",
        SUMMARY_SAFE => "Safe:",
        SUMMARY_DANGER => "Cavitation risk:",
        SUMMARY_RISK => "Risk percentage:",
        ENVELOPE_HEADING => "\n-- Pump Operating Envelope --",
        ENVELOPE_CURRENT => "Current envelope:",
        ENVELOPE_NONE => "No envelope configured.",
        ENVELOPE_OPTIONS => "1) Edit  2) Clear  0) Cancel",
        ENVELOPE_PROMPT_TYPE => "Pump type (ex: Centrifugal): ",
        ENVELOPE_PROMPT_RATED_FLOW => "Rated flow [m3/h]: ",
        ENVELOPE_PROMPT_AOR_MIN => "AOR minimum [m3/h]: ",
        ENVELOPE_PROMPT_AOR_MAX => "AOR maximum [m3/h]: ",
        ENVELOPE_PROMPT_POR_MIN => "POR minimum [m3/h]: ",
        ENVELOPE_PROMPT_POR_MAX => "POR maximum [m3/h]: ",
        ENVELOPE_PROMPT_RATED_NPSHR => "Rated NPSHr [m]: ",
        ENVELOPE_SAVED => "Envelope saved.",
        ENVELOPE_CLEARED => "Envelope cleared.",
        _ => return None,
    })
}
