//! 去极值聚合器
//!
//! 把一组 days_to_hire 原始样本转换为去掉 10% / 90% 分位以外值后的
//! min / avg / max 统计。分位点使用 "exclusive" 线性插值法
//! （m = n + 1 的秩插值），与历史数据逐位一致。

/// 默认最少样本数
pub const DEFAULT_MIN_POSTINGS: usize = 5;

/// 十分位切点数量为 DECILES - 1
const DECILES: i64 = 10;

/// 去极值后的统计结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimmedStats {
    pub min_days: f64,
    pub avg_days: f64,
    pub max_days: f64,
    /// 去极值前的样本总数
    pub job_postings_number: usize,
}

/// 单个分组的聚合结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregate {
    Stats(TrimmedStats),
    /// 样本不足，不产出统计行
    InsufficientData,
}

impl Aggregate {
    pub fn stats(self) -> Option<TrimmedStats> {
        match self {
            Aggregate::Stats(stats) => Some(stats),
            Aggregate::InsufficientData => None,
        }
    }
}

/// 计算一组样本的去极值统计
///
/// 样本数 `< min_postings`（或为空）时返回 [`Aggregate::InsufficientData`]。
pub fn calculate_stats(values: &[i64], min_postings: usize) -> Aggregate {
    if values.is_empty() || values.len() < min_postings {
        return Aggregate::InsufficientData;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let cuts = quantiles(&sorted, DECILES);
    let (min_days, max_days) = match (cuts.first(), cuts.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Aggregate::InsufficientData,
    };

    let filtered: Vec<i64> = sorted
        .iter()
        .copied()
        .filter(|&v| min_days <= v as f64 && v as f64 <= max_days)
        .collect();

    match mean(&filtered) {
        Some(avg_days) => Aggregate::Stats(TrimmedStats {
            min_days,
            avg_days,
            max_days,
            job_postings_number: values.len(),
        }),
        None => Aggregate::InsufficientData,
    }
}

/// 十分位切点（9 个）
pub fn decile_cut_points(sorted: &[i64]) -> Vec<f64> {
    quantiles(sorted, DECILES)
}

/// 将已排序样本划分为 `n` 个等概率区间，返回 `n - 1` 个切点
///
/// exclusive 方法：`m = len + 1`，第 i 个切点位于秩 `i * m / n`，
/// 秩被钳制到 `[1, len - 1]`，钳制后 `delta` 可能越出 `[0, n)`，
/// 此时结果外推到样本范围之外。分子用整数精确计算，仅做一次浮点除法。
pub fn quantiles(sorted: &[i64], n: i64) -> Vec<f64> {
    if n < 2 {
        return Vec::new();
    }

    let len = sorted.len() as i64;
    match len {
        0 => Vec::new(),
        1 => vec![sorted[0] as f64; (n - 1) as usize],
        _ => {
            let m = len + 1;
            (1..n)
                .map(|i| {
                    let j = (i * m / n).clamp(1, len - 1);
                    let delta = i * m - j * n;
                    let lower = sorted[(j - 1) as usize] as i128;
                    let upper = sorted[j as usize] as i128;
                    let numerator = lower * (n - delta) as i128 + upper * delta as i128;
                    numerator as f64 / n as f64
                })
                .collect()
        }
    }
}

fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i128 = values.iter().map(|&v| v as i128).sum();
    Some(sum as f64 / values.len() as f64)
}
