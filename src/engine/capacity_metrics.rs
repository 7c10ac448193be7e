// ==========================================
// 产能测算系统 - 产能指标计算引擎
// ==========================================
// 职责: 班次数据 + 单行参数 -> 十一条指标序列
// 输入: 月份列 + ShiftBlock + MetricInputs（各参数行可能缺失）
// 输出: CapacitySeries（与月份列一一对齐）
// ==========================================
// 公式:
//   基础产能 = Σ 资源 × 工时 × 天数（可被覆写行逐月覆盖）
//   有效产能 = 基础产能 × 合格率 × 生产效率
//   峰值产能 = 有效产能 × (1 + 产能裕度)
//   产能差异 = 有效产能 - 需求
//   累计差异 = 产能差异的前缀和（按源表格列顺序）
//   差异百分比 = 产能差异 / 需求（需求 <= 0 时为 NaN）
//   产能缺口 = 累计差异中 <= 0 的部分，> 0 时为 0
// ==========================================

use crate::domain::{CapacitySeries, MonthColumn, ShiftBlock};
use tracing::instrument;

// ===== 参数行缺失时的默认值 =====
pub const DEFAULT_YIELD_RATE: f64 = 1.0;
pub const DEFAULT_EFFICIENCY: f64 = 0.85;
pub const DEFAULT_MARGIN: f64 = 0.2;
pub const DEFAULT_DEMAND: f64 = 0.0;

// ==========================================
// MetricInputs - 单行参数（None 表示表中无此行）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricInputs {
    pub base_capacity_override: Option<Vec<f64>>,
    pub yield_rate: Option<Vec<f64>>,
    pub efficiency: Option<Vec<f64>>,
    pub margin: Option<Vec<f64>>,
    pub demand: Option<Vec<f64>>,
}

// ==========================================
// CapacityMetricsEngine
// ==========================================
pub struct CapacityMetricsEngine {
    // 无状态引擎，不需要注入依赖
}

impl Default for CapacityMetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CapacityMetricsEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算全部指标
    #[instrument(skip_all, fields(months = months.len(), shifts = shifts.len()))]
    pub fn derive(
        &self,
        months: Vec<MonthColumn>,
        shifts: &ShiftBlock,
        inputs: MetricInputs,
    ) -> CapacitySeries {
        let n = months.len();

        let mut base_capacity = shifts.total_capacity(n);
        if let Some(override_row) = &inputs.base_capacity_override {
            apply_override(&mut base_capacity, override_row);
        }

        let yield_rate = or_default(inputs.yield_rate, n, DEFAULT_YIELD_RATE);
        let efficiency = or_default(inputs.efficiency, n, DEFAULT_EFFICIENCY);
        let margin = or_default(inputs.margin, n, DEFAULT_MARGIN);
        let demand = or_default(inputs.demand, n, DEFAULT_DEMAND);

        let effective_capacity: Vec<f64> = (0..n)
            .map(|m| base_capacity[m] * yield_rate[m] * efficiency[m])
            .collect();
        let peak_capacity: Vec<f64> = (0..n)
            .map(|m| effective_capacity[m] * (1.0 + margin[m]))
            .collect();
        let diff_hours: Vec<f64> = (0..n).map(|m| effective_capacity[m] - demand[m]).collect();
        let cum_diff_hours = cumulative_sum(&diff_hours);
        let diff_pct: Vec<f64> = (0..n)
            .map(|m| {
                if demand[m] > 0.0 {
                    diff_hours[m] / demand[m]
                } else {
                    f64::NAN
                }
            })
            .collect();
        let capacity_gap: Vec<f64> = cum_diff_hours
            .iter()
            .map(|&cum| if cum > 0.0 { 0.0 } else { cum })
            .collect();

        CapacitySeries {
            months,
            base_capacity,
            yield_rate,
            efficiency,
            effective_capacity,
            margin,
            peak_capacity,
            demand,
            diff_hours,
            diff_pct,
            cum_diff_hours,
            capacity_gap,
        }
    }
}

/// 覆写行中的非 NaN 值逐位置替换计算值
fn apply_override(base: &mut [f64], override_row: &[f64]) {
    for (value, &manual) in base.iter_mut().zip(override_row) {
        if !manual.is_nan() {
            *value = manual;
        }
    }
}

/// 参数行缺失时整行填默认值；存在时按月份数对齐（不足部分为 NaN）
fn or_default(row: Option<Vec<f64>>, n: usize, default: f64) -> Vec<f64> {
    match row {
        Some(mut values) => {
            values.resize(n, f64::NAN);
            values
        }
        None => vec![default; n],
    }
}

fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}
