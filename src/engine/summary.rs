// ==========================================
// 产能测算系统 - 关键指标统计与数据摘要
// ==========================================
// 职责: 为驾驶舱提供关键指标，为外部分析环节生成文本摘要
// 说明: 产能缺口只取非正值，"存在缺口的月份" 以缺口 < 0 计
// ==========================================

use crate::domain::CapacitySeries;
use serde::{Deserialize, Serialize};

// ==========================================
// KeyMetrics - 关键指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// 存在缺口（累计差异为负）的月份数
    pub gap_months: usize,
    /// 最大缺口（月份标签, 缺口小时数的绝对值）
    pub max_gap: Option<(String, f64)>,
    /// 平均产能利用率 = Σ需求 / Σ有效产能 × 100
    pub avg_utilization_pct: Option<f64>,
    /// 产能差异趋势 = 末月差异 - 首月差异
    pub diff_trend: Option<f64>,
}

/// 忽略 NaN 的求和
fn nan_sum(values: &[f64]) -> f64 {
    values.iter().filter(|v| !v.is_nan()).sum()
}

/// 忽略 NaN 的均值；无有效值返回 NaN
fn nan_mean(values: &[f64]) -> f64 {
    let valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if valid.is_empty() {
        f64::NAN
    } else {
        valid.iter().sum::<f64>() / valid.len() as f64
    }
}

impl KeyMetrics {
    pub fn from_series(series: &CapacitySeries) -> Self {
        let gap_months = series.capacity_gap.iter().filter(|&&g| g < 0.0).count();

        let max_gap = series
            .capacity_gap
            .iter()
            .enumerate()
            .filter(|(_, g)| **g < 0.0)
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, g)| (series.months[i].label.clone(), -g));

        let total_effective = nan_sum(&series.effective_capacity);
        let avg_utilization_pct = if total_effective > 0.0 {
            Some(nan_sum(&series.demand) / total_effective * 100.0)
        } else {
            None
        };

        let diff_trend = match (series.diff_hours.first(), series.diff_hours.last()) {
            (Some(first), Some(last)) if series.len() >= 2 => Some(last - first),
            _ => None,
        };

        Self {
            gap_months,
            max_gap,
            avg_utilization_pct,
            diff_trend,
        }
    }
}

// ==========================================
// CapacitySummary - 文本摘要
// ==========================================
pub struct CapacitySummary<'a> {
    series: &'a CapacitySeries,
    metrics: KeyMetrics,
}

impl<'a> CapacitySummary<'a> {
    pub fn new(series: &'a CapacitySeries) -> Self {
        Self {
            series,
            metrics: KeyMetrics::from_series(series),
        }
    }

    pub fn metrics(&self) -> &KeyMetrics {
        &self.metrics
    }

    /// 生成产能数据分析摘要（每项一行）
    pub fn render(&self, group_name: &str) -> String {
        let s = self.series;
        let mut parts = vec![format!("产能数据分析摘要（{}）：", group_name)];

        let labels = s.labels();
        match (labels.first(), labels.last()) {
            (Some(first), Some(last)) => {
                parts.push(format!("1. 数据范围：{} 至 {}，共 {} 个月", first, last, s.len()))
            }
            _ => parts.push("1. 数据范围：无数据".to_string()),
        }

        parts.push("2. 产能概况：".to_string());
        parts.push(format!("   - 平均基础产能：{:.2} 小时", nan_mean(&s.base_capacity)));
        parts.push(format!("   - 平均有效产能：{:.2} 小时", nan_mean(&s.effective_capacity)));
        parts.push(format!("   - 平均峰值产能：{:.2} 小时", nan_mean(&s.peak_capacity)));

        parts.push("3. 效率指标：".to_string());
        parts.push(format!("   - 平均合格率：{:.2}%", nan_mean(&s.yield_rate) * 100.0));
        parts.push(format!("   - 平均生产效率：{:.2}%", nan_mean(&s.efficiency) * 100.0));

        parts.push("4. 需求与缺口：".to_string());
        parts.push(format!("   - 平均基本需求：{:.2} 小时", nan_mean(&s.demand)));
        parts.push(format!("   - 总产能缺口：{:.2} 小时", nan_sum(&s.capacity_gap)));
        parts.push(format!("   - 存在缺口的月份：{} 个月", self.metrics.gap_months));
        parts.push(match &self.metrics.max_gap {
            Some((label, hours)) => format!("   - 最大单月缺口：{:.2} 小时（{}）", hours, label),
            None => "   - 最大单月缺口：无缺口".to_string(),
        });

        parts.push(match self.metrics.avg_utilization_pct {
            Some(pct) => format!("5. 产能利用率：{:.2}%", pct),
            None => "5. 产能利用率：有效产能为 0，无法计算".to_string(),
        });

        let mut text = parts.join("\n");
        text.push('\n');
        text
    }
}
