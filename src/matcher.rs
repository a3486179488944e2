//! 标线匹配
//!
//! 将有序标线点分为 [`MATCH_BUCKETS`] 个桶，先按桶的纬度范围粗筛，
//! 再在桶内逐个比较。只有经纬度微度值完全相等才算匹配。

use crate::config::MATCH_BUCKETS;
use crate::global_types::LineMarkPoint;
use crate::line_mark::LineMarks;

#[derive(Debug, Clone, Copy)]
pub struct MarkMatcher<'a> {
    marks: &'a [LineMarkPoint],
    bucket_size: usize,
}

impl<'a> MarkMatcher<'a> {
    pub fn new(marks: &'a LineMarks) -> Self {
        Self::from_sorted(marks.as_slice())
    }

    /// `marks` 必须按纬度升序。
    pub fn from_sorted(marks: &'a [LineMarkPoint]) -> Self {
        debug_assert!(marks.windows(2).all(|w| w[0].latitude <= w[1].latitude));
        let bucket_size = marks.len().div_ceil(MATCH_BUCKETS).max(1);
        Self { marks, bucket_size }
    }

    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// 微度坐标 (east, north) 是否落在标线上
    pub fn is_marked(&self, east: i32, north: i32) -> bool {
        for bucket in self.marks.chunks(self.bucket_size) {
            let (Some(first), Some(last)) = (bucket.first(), bucket.last()) else {
                continue;
            };
            if north < first.latitude {
                // 后面的桶纬度更大
                break;
            }
            if north > last.latitude {
                continue;
            }
            // 同一纬度可能跨越多个桶，不匹配时继续下一个桶
            if bucket
                .iter()
                .any(|p| p.latitude == north && p.longitude == east)
            {
                return true;
            }
        }
        false
    }
}
