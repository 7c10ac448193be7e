// ==========================================
// 产能测算系统 - 产能指标领域模型
// ==========================================
// 职责: 月份列 / 指标种类 / 十一条产能指标序列
// 红线: 所有序列与月份列一一对齐，长度一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::data_table::{CellValue, DataTable};

/// 月份列的表头名称
pub const MONTH_COLUMN_LABEL: &str = "日期";

// ==========================================
// MonthColumn - 月份列
// ==========================================
// label: "{year}_AP{suffix}" 或原始后缀
// column_index: 在原始表格中的列下标（后续提取均按下标寻址）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthColumn {
    pub label: String,
    pub column_index: usize,
}

impl MonthColumn {
    pub fn new(label: impl Into<String>, column_index: usize) -> Self {
        Self {
            label: label.into(),
            column_index,
        }
    }
}

/// 解析 "{year}_AP{n}" 形式的标签为排序键
///
/// 无法解析的标签返回 (0, 0)，排在最前
pub fn month_sort_key(label: &str) -> (i64, i64) {
    let Some((year, period)) = label.split_once("_AP") else {
        return (0, 0);
    };
    match (year.trim().parse::<i64>(), period.trim().parse::<i64>()) {
        (Ok(y), Ok(p)) => (y, p),
        _ => (0, 0),
    }
}

// ==========================================
// MetricKind - 指标种类
// ==========================================
// 顺序即输出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    BaseCapacity,     // 基础产能（小时）
    YieldRate,        // 合格率
    Efficiency,       // 生产效率
    EffectiveCapacity, // 有效产能
    Margin,           // 产能裕度
    PeakCapacity,     // 峰值产能
    Demand,           // 基本需求（小时）
    DiffHours,        // 产能差异（小时）
    DiffPct,          // 产能差异（%）
    CumDiffHours,     // 累计产能差异（小时）
    CapacityGap,      // 产能缺口（小时）
}

impl MetricKind {
    pub const ALL: [MetricKind; 11] = [
        MetricKind::BaseCapacity,
        MetricKind::YieldRate,
        MetricKind::Efficiency,
        MetricKind::EffectiveCapacity,
        MetricKind::Margin,
        MetricKind::PeakCapacity,
        MetricKind::Demand,
        MetricKind::DiffHours,
        MetricKind::DiffPct,
        MetricKind::CumDiffHours,
        MetricKind::CapacityGap,
    ];

    /// 英文键名（snake_case）
    pub fn key(&self) -> &'static str {
        match self {
            MetricKind::BaseCapacity => "base_capacity",
            MetricKind::YieldRate => "yield_rate",
            MetricKind::Efficiency => "efficiency",
            MetricKind::EffectiveCapacity => "effective_capacity",
            MetricKind::Margin => "margin",
            MetricKind::PeakCapacity => "peak_capacity",
            MetricKind::Demand => "demand",
            MetricKind::DiffHours => "diff_hours",
            MetricKind::DiffPct => "diff_pct",
            MetricKind::CumDiffHours => "cum_diff_hours",
            MetricKind::CapacityGap => "capacity_gap",
        }
    }

    /// 源表格中的中文行名，也是输出表格的列名
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::BaseCapacity => "基础产能（小时）",
            MetricKind::YieldRate => "合格率",
            MetricKind::Efficiency => "生产效率",
            MetricKind::EffectiveCapacity => "有效产能",
            MetricKind::Margin => "产能裕度",
            MetricKind::PeakCapacity => "峰值产能",
            MetricKind::Demand => "基本需求（小时）",
            MetricKind::DiffHours => "产能差异（小时）",
            MetricKind::DiffPct => "产能差异（%）",
            MetricKind::CumDiffHours => "累计产能差异（小时）",
            MetricKind::CapacityGap => "产能缺口（小时）",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == key)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// CapacitySeries - 产能指标序列
// ==========================================
// 每次提取新建，返回后不再修改
// NaN 表示该月无定义（如需求 <= 0 时的差异百分比）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySeries {
    pub months: Vec<MonthColumn>,

    // ===== 产能 =====
    pub base_capacity: Vec<f64>,
    pub yield_rate: Vec<f64>,
    pub efficiency: Vec<f64>,
    pub effective_capacity: Vec<f64>,
    pub margin: Vec<f64>,
    pub peak_capacity: Vec<f64>,

    // ===== 需求与差异 =====
    pub demand: Vec<f64>,
    pub diff_hours: Vec<f64>,
    pub diff_pct: Vec<f64>,
    pub cum_diff_hours: Vec<f64>,
    pub capacity_gap: Vec<f64>,
}

impl CapacitySeries {
    /// 月份数
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// 月份标签（按源表格列顺序）
    pub fn labels(&self) -> Vec<&str> {
        self.months.iter().map(|m| m.label.as_str()).collect()
    }

    /// 按种类取指标序列
    pub fn series(&self, kind: MetricKind) -> &[f64] {
        match kind {
            MetricKind::BaseCapacity => &self.base_capacity,
            MetricKind::YieldRate => &self.yield_rate,
            MetricKind::Efficiency => &self.efficiency,
            MetricKind::EffectiveCapacity => &self.effective_capacity,
            MetricKind::Margin => &self.margin,
            MetricKind::PeakCapacity => &self.peak_capacity,
            MetricKind::Demand => &self.demand,
            MetricKind::DiffHours => &self.diff_hours,
            MetricKind::DiffPct => &self.diff_pct,
            MetricKind::CumDiffHours => &self.cum_diff_hours,
            MetricKind::CapacityGap => &self.capacity_gap,
        }
    }

    /// 检查全部序列长度与月份数一致
    pub fn is_aligned(&self) -> bool {
        MetricKind::ALL
            .iter()
            .all(|&kind| self.series(kind).len() == self.len())
    }

    /// 按下标重新挑选月份，生成新的序列（不改变自身）
    fn select(&self, indices: &[usize]) -> Self {
        let pick = |values: &[f64]| indices.iter().map(|&i| values[i]).collect::<Vec<f64>>();
        Self {
            months: indices.iter().map(|&i| self.months[i].clone()).collect(),
            base_capacity: pick(&self.base_capacity),
            yield_rate: pick(&self.yield_rate),
            efficiency: pick(&self.efficiency),
            effective_capacity: pick(&self.effective_capacity),
            margin: pick(&self.margin),
            peak_capacity: pick(&self.peak_capacity),
            demand: pick(&self.demand),
            diff_hours: pick(&self.diff_hours),
            diff_pct: pick(&self.diff_pct),
            cum_diff_hours: pick(&self.cum_diff_hours),
            capacity_gap: pick(&self.capacity_gap),
        }
    }

    /// 按 (年, 期) 稳定排序后的副本
    ///
    /// 只重排展示顺序，累计列保持原计算值
    pub fn sorted_chronologically(&self) -> Self {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.sort_by_key(|&i| month_sort_key(&self.months[i].label));
        self.select(&indices)
    }

    /// 标签中出现的年份（去重、升序）
    pub fn available_years(&self) -> Vec<String> {
        let mut years: Vec<String> = self
            .months
            .iter()
            .filter_map(|m| m.label.split_once('_').map(|(y, _)| y.to_string()))
            .collect();
        years.sort();
        years.dedup();
        years
    }

    /// 只保留以指定年份开头的月份
    pub fn filter_by_year(&self, year: &str) -> Self {
        let indices: Vec<usize> = self
            .months
            .iter()
            .enumerate()
            .filter(|(_, m)| m.label.starts_with(year))
            .map(|(i, _)| i)
            .collect();
        self.select(&indices)
    }

    /// 转换为表格：首列为月份标签，其后每个指标一列
    pub fn to_table(&self) -> DataTable {
        let mut columns = vec![MONTH_COLUMN_LABEL.to_string()];
        columns.extend(MetricKind::ALL.iter().map(|k| k.label().to_string()));

        let rows = self
            .months
            .iter()
            .enumerate()
            .map(|(i, month)| {
                let mut row = Vec::with_capacity(columns.len());
                row.push(CellValue::Text(month.label.clone()));
                row.extend(
                    MetricKind::ALL
                        .iter()
                        .map(|&kind| CellValue::from_number(self.series(kind)[i])),
                );
                row
            })
            .collect();

        DataTable { columns, rows }
    }
}
