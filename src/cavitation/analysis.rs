use crate::csv_import::layout::{self, DetectedLayout, SkipReason};
use crate::csv_import::tokenizer::{self, ImportError};

use super::curve::NpshrCurve;
use super::record::{self, OperatingRecord};

/// 한 번의 분석 결과. 로드할 때마다 통째로 재계산하며, 증분 갱신은 없다.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub records: Vec<OperatingRecord>,
    pub safe_count: usize,
    pub unsafe_count: usize,
}

impl AnalysisResult {
    pub fn total(&self) -> usize {
        self.safe_count + self.unsafe_count
    }

    /// 위험 비율(%). 소수 1자리로 반올림하고, 레코드가 없으면 0이다.
    pub fn risk_percentage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let ratio = self.unsafe_count as f64 / total as f64 * 100.0;
        (ratio * 10.0).round() / 10.0
    }
}

/// 단일 패스로 안전/위험 개수를 센다.
fn aggregate(records: Vec<OperatingRecord>) -> AnalysisResult {
    let safe_count = records.iter().filter(|r| r.is_safe).count();
    let unsafe_count = records.len() - safe_count;
    AnalysisResult {
        records,
        safe_count,
        unsafe_count,
    }
}

/// CSV 원문을 분석해 정규화된 결과를 만든다.
///
/// 파일 전체 구조 문제(줄 부족)만 오류로 올리고, 행 단위 결함은 조용히
/// 건너뛴다. 건너뛴 사유가 필요하면 [`analyze_with_diagnostics`]를 쓴다.
pub fn analyze(text: &str) -> Result<AnalysisResult, ImportError> {
    analyze_with_diagnostics(text).map(|(result, _)| result)
}

/// [`analyze`]와 같되, 행 단위 탈락 사유 목록을 함께 반환한다.
pub fn analyze_with_diagnostics(
    text: &str,
) -> Result<(AnalysisResult, Vec<SkipReason>), ImportError> {
    let lines = tokenizer::tokenize(text)?;
    let mut skips = Vec::new();

    let records = match layout::detect(&lines, &mut skips) {
        DetectedLayout::Standard(table) => record::build_records(&table, None, &mut skips),
        DetectedLayout::Sectioned { operating, curve } => {
            let curve_table = curve.filter(|t| !t.rows.is_empty());
            let npshr_curve = curve_table.as_ref().and_then(NpshrCurve::from_table);
            // 곡선 섹션이 있었는데 쓸 수 없으면 운전 데이터만으로 진행한다.
            if curve_table.is_some() && npshr_curve.is_none() {
                skips.push(SkipReason::CurveUnusable);
            }
            match operating {
                Some(table) => record::build_records(&table, npshr_curve.as_ref(), &mut skips),
                // 곡선만 있거나 빈 입력: 오류가 아니라 레코드 0건이다.
                None => Vec::new(),
            }
        }
    };

    Ok((aggregate(records), skips))
}

/// 현재 분석 결과를 담는 소유 상태 컨테이너.
///
/// 앰비언트 전역 변수 대신 호출 측이 명시적으로 들고 다니며, 결과는
/// replace로 통째로 교체하거나 clear로 비운다.
#[derive(Debug, Default)]
pub struct AnalysisState {
    current: Option<AnalysisResult>,
}

impl AnalysisState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이전 결과를 버리고 새 결과로 교체한다.
    pub fn replace(&mut self, result: AnalysisResult) {
        self.current = Some(result);
    }

    /// 결과를 비운다.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }
}
