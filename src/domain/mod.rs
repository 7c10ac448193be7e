// ==========================================
// 产能测算系统 - 领域模型层
// ==========================================
// 职责: 定义原始表格、月份列、班次、产能指标序列与对外表格
// 红线: 不含文件读取逻辑，不含指标计算逻辑
// ==========================================

pub mod capacity;
pub mod data_table;
pub mod shift;
pub mod table;

// 重导出核心类型
pub use capacity::{month_sort_key, CapacitySeries, MetricKind, MonthColumn, MONTH_COLUMN_LABEL};
pub use data_table::{CellValue, DataTable};
pub use shift::{ShiftBlock, ShiftRecord, SHIFT_NAMES};
pub use table::RawTable;
