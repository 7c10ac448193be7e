// ==========================================
// 产能测算系统 - 自定义模型（表格变换）
// ==========================================
// 职责: 把产能表格交给外部提供的变换函数，并校验其输出
// 约定: 输入为每月一行的产能表格；输出必须仍是表格，
//       增删列由变换自身负责
// 说明: 变换的隔离/沙箱不在本模块范围内
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{CellValue, DataTable, MetricKind};
use tracing::{debug, info};

// ==========================================
// CapacityTransform Trait
// ==========================================
// 实现者: NamedTransform（闭包）, UtilizationTransform（内置示例）
pub trait CapacityTransform {
    /// 变换名称（用于日志与错误信息）
    fn name(&self) -> &str;

    /// 执行变换；返回 Err 表示模型运行失败
    fn apply(&self, table: DataTable) -> Result<DataTable, String>;
}

/// 以闭包形式提供的具名变换
pub struct NamedTransform<F> {
    name: String,
    func: F,
}

impl<F> NamedTransform<F>
where
    F: Fn(DataTable) -> Result<DataTable, String>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> CapacityTransform for NamedTransform<F>
where
    F: Fn(DataTable) -> Result<DataTable, String>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, table: DataTable) -> Result<DataTable, String> {
        (self.func)(table)
    }
}

/// 变换结果
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    pub table: DataTable,
    /// 新增的列（按输出顺序）
    pub added_columns: Vec<String>,
    /// 被移除的列（按输入顺序）
    pub removed_columns: Vec<String>,
}

// ==========================================
// TransformRunner
// ==========================================
pub struct TransformRunner;

impl TransformRunner {
    /// 运行变换（传入副本，原表格不受影响）
    pub fn run(transform: &dyn CapacityTransform, input: &DataTable) -> ApiResult<TransformOutcome> {
        let name = transform.name().to_string();
        debug!(transform = %name, rows = input.row_count(), "开始运行自定义模型");

        let output = transform
            .apply(input.clone())
            .map_err(|message| ApiError::Transform {
                name: name.clone(),
                message,
            })?;

        if output.columns.is_empty() {
            return Err(ApiError::InvalidTransformOutput {
                name,
                message: "输出表格没有任何列".to_string(),
            });
        }
        if let Some((idx, row)) = output
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != output.columns.len())
        {
            return Err(ApiError::InvalidTransformOutput {
                name,
                message: format!(
                    "第 {} 行有 {} 个单元格，列数为 {}",
                    idx + 1,
                    row.len(),
                    output.columns.len()
                ),
            });
        }

        let added_columns: Vec<String> = output
            .columns
            .iter()
            .filter(|c| !input.columns.contains(c))
            .cloned()
            .collect();
        let removed_columns: Vec<String> = input
            .columns
            .iter()
            .filter(|c| !output.columns.contains(c))
            .cloned()
            .collect();

        info!(
            transform = %name,
            added = ?added_columns,
            removed = ?removed_columns,
            "自定义模型运行成功"
        );

        Ok(TransformOutcome {
            table: output,
            added_columns,
            removed_columns,
        })
    }
}

// ==========================================
// UtilizationTransform - 内置示例模型
// ==========================================
// 新增: 产能利用率(%) / 产能富余（小时）/ 综合效率OEE(%) / 产能状态
pub struct UtilizationTransform;

pub const UTILIZATION_COLUMN: &str = "产能利用率(%)";
pub const SURPLUS_COLUMN: &str = "产能富余（小时）";
pub const OEE_COLUMN: &str = "综合效率OEE(%)";
pub const STATUS_COLUMN: &str = "产能状态";

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// 按利用率划分负荷状态
pub fn load_status(utilization_pct: f64) -> &'static str {
    if utilization_pct > 100.0 {
        "超负荷"
    } else if utilization_pct > 85.0 {
        "高负荷"
    } else {
        "正常"
    }
}

impl CapacityTransform for UtilizationTransform {
    fn name(&self) -> &str {
        "产能利用率模型"
    }

    fn apply(&self, mut table: DataTable) -> Result<DataTable, String> {
        let column = |kind: MetricKind| {
            table
                .numbers(kind.label())
                .ok_or_else(|| format!("缺少列: {}", kind.label()))
        };
        let demand = column(MetricKind::Demand)?;
        let effective = column(MetricKind::EffectiveCapacity)?;
        let yield_rate = column(MetricKind::YieldRate)?;
        let efficiency = column(MetricKind::Efficiency)?;

        let utilization: Vec<f64> = demand
            .iter()
            .zip(&effective)
            .map(|(d, e)| round2(d / e * 100.0))
            .collect();
        let surplus: Vec<f64> = effective
            .iter()
            .zip(&demand)
            .map(|(e, d)| round2(e - d))
            .collect();
        let oee: Vec<f64> = yield_rate
            .iter()
            .zip(&efficiency)
            .map(|(y, e)| round2(y * e * 100.0))
            .collect();
        let status: Vec<CellValue> = utilization
            .iter()
            .map(|&u| CellValue::Text(load_status(u).to_string()))
            .collect();

        let to_cells = |values: &[f64]| -> Vec<CellValue> {
            values.iter().map(|&v| CellValue::from_number(v)).collect()
        };
        table.set_column(UTILIZATION_COLUMN, to_cells(&utilization));
        table.set_column(SURPLUS_COLUMN, to_cells(&surplus));
        table.set_column(OEE_COLUMN, to_cells(&oee));
        table.set_column(STATUS_COLUMN, status);
        Ok(table)
    }
}
