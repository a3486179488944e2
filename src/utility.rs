use crate::config::{KM_PER_DEGREE, MICRO_DEGREE, MM_PER_KM};

pub struct Utility {}

impl Utility {
    #[inline]
    pub fn degree_to_radian(degree: f64) -> f64 {
        degree.to_radians()
    }

    /// 度 -> 微度，四舍五入
    #[inline]
    pub fn to_micro_degree(degree: f64) -> i32 {
        (degree * MICRO_DEGREE).round() as i32
    }

    /// 地面距离 (mm) -> 度偏移
    ///
    /// 经纬度方向使用同一个经验常数 111.32 km/°。
    #[inline]
    pub fn mm_to_degree(distance_mm: f64) -> f64 {
        (distance_mm / MM_PER_KM) / KM_PER_DEGREE
    }
}

#[test]
fn test_to_micro_degree() {
    assert_eq!(Utility::to_micro_degree(0.000003), 3);
    assert_eq!(Utility::to_micro_degree(-0.000003), -3);
    assert_eq!(Utility::to_micro_degree(48.378986), 48_378_986);
}

#[test]
fn test_mm_to_degree() {
    // 111.32 km 为 1 度
    let d = Utility::mm_to_degree(111_320_000.0);
    assert!((d - 1.0).abs() < 1e-12);
}
