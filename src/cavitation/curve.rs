use crate::csv_import::headers;
use crate::csv_import::layout::RawTable;

use super::record::parse_finite;

/// NPSHr 기준 곡선의 한 점.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub flow_m3_per_h: f64,
    pub npshr_m: f64,
}

/// 유량 오름차순으로 정렬된 NPSHr 기준 곡선. 항상 1점 이상을 가진다.
///
/// 같은 유량이 중복되면 제거하지 않고 안정 정렬로 입력 순서를 보존한다.
/// 조회 시에는 먼저 나온 점이 승리한다.
#[derive(Debug, Clone)]
pub struct NpshrCurve {
    points: Vec<CurvePoint>,
}

impl NpshrCurve {
    /// 곡선 섹션 테이블에서 곡선을 만든다.
    ///
    /// 유량 열은 소문자 헤더의 키워드 포함 여부로, NPSHr 열은 "npshr" 포함
    /// 여부로 찾는다. 열을 못 찾거나 유한한 점이 하나도 없으면 None을
    /// 반환하고, 호출 측은 운전 데이터만으로 진행한다.
    pub fn from_table(table: &RawTable) -> Option<Self> {
        let flow_col = headers::find_flow_column(&table.headers)?;
        let npshr_col = headers::find_npshr_column(&table.headers)?;

        let mut points = Vec::new();
        for row in &table.rows {
            let flow = row.fields.get(flow_col).and_then(|s| parse_finite(s));
            let npshr = row.fields.get(npshr_col).and_then(|s| parse_finite(s));
            if let (Some(flow_m3_per_h), Some(npshr_m)) = (flow, npshr) {
                points.push(CurvePoint {
                    flow_m3_per_h,
                    npshr_m,
                });
            }
        }
        if points.is_empty() {
            return None;
        }
        // sort_by는 안정 정렬이라 동일 유량은 입력 순서를 유지한다.
        points.sort_by(|a, b| {
            a.flow_m3_per_h
                .partial_cmp(&b.flow_m3_per_h)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Some(Self { points })
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// 질의 유량에서 필요 NPSH(m)를 구한다.
    ///
    /// 곡선에 같은 유량의 점이 있으면 그 값을 그대로 반환하고, 범위 밖은
    /// 가장자리 점의 값으로 클램프하며, 그 외에는 이웃 두 점 사이를 선형
    /// 보간한다.
    pub fn npshr_at(&self, flow_m3_per_h: f64) -> f64 {
        let mut lower: Option<CurvePoint> = None;
        let mut upper: Option<CurvePoint> = None;
        for &p in &self.points {
            if p.flow_m3_per_h == flow_m3_per_h {
                return p.npshr_m;
            }
            if p.flow_m3_per_h < flow_m3_per_h {
                lower = Some(p);
            } else {
                upper = Some(p);
                break;
            }
        }
        match (lower, upper) {
            (Some(lo), Some(hi)) => {
                let frac =
                    (flow_m3_per_h - lo.flow_m3_per_h) / (hi.flow_m3_per_h - lo.flow_m3_per_h);
                lo.npshr_m + frac * (hi.npshr_m - lo.npshr_m)
            }
            // 곡선 최소 유량 아래: 최소점 값으로 평탄 외삽
            (None, _) => self.points[0].npshr_m,
            // 곡선 최대 유량 위: 최대점 값으로 평탄 외삽
            (_, None) => self.points[self.points.len() - 1].npshr_m,
        }
    }
}
