use super::layout::RawRow;

/// 정규화 대상 필드. 각 필드는 우선순위가 있는 헤더 별칭 목록을 가진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Temperature,
    Pressure,
    Flow,
    NpshRequired,
    NpshAvailable,
}

impl CanonicalField {
    /// 우선순위 순 헤더 별칭. 프랑스어 표기 → 영어 표기 → 영어 축약 순으로
    /// 대조하며, 먼저 일치하는 별칭이 승리한다. 새 별칭은 목록에 추가만
    /// 하면 된다.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Temperature => {
                &["Température (°C)", "Temperature (°C)", "Temperature"]
            }
            CanonicalField::Pressure => &["Pression (bar)", "Pressure (bar)", "Pressure"],
            CanonicalField::Flow => &["Débit (m3/h)", "Flow (m3/h)", "Flow Rate"],
            CanonicalField::NpshRequired => &["NPSHr (m)", "NPSHr"],
            CanonicalField::NpshAvailable => &["NPSHa (m)", "NPSHa"],
        }
    }
}

/// 별칭을 우선순위대로 대조해 헤더 열 인덱스를 찾는다. 별칭과 헤더는
/// trim된 문자열의 완전 일치로 비교한다.
pub fn find_column(headers: &[String], field: CanonicalField) -> Option<usize> {
    field
        .aliases()
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
}

/// 행에서 필드 값을 해석한다. 행마다 독립적으로 해석하며, 전역 스키마
/// 검증 단계는 없다. 해석 불가 필드는 None(하류에서 행 제외)이다.
pub fn resolve<'a>(headers: &[String], row: &'a RawRow, field: CanonicalField) -> Option<&'a str> {
    let col = find_column(headers, field)?;
    row.fields.get(col).map(String::as_str)
}

/// 곡선 섹션 전용: 소문자화한 헤더에 유량 키워드가 포함된 열을 찾는다.
pub fn find_flow_column(headers: &[String]) -> Option<usize> {
    const FLOW_KEYWORDS: [&str; 3] = ["débit", "debit", "flow"];
    headers.iter().position(|h| {
        let lowered = h.to_lowercase();
        FLOW_KEYWORDS.iter().any(|kw| lowered.contains(kw))
    })
}

/// 곡선 섹션 전용: 소문자화한 헤더에 "npshr"이 포함된 열을 찾는다.
pub fn find_npshr_column(headers: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.to_lowercase().contains("npshr"))
}
