// ==========================================
// 产能测算系统 - 引擎层
// ==========================================
// 职责: 产能指标计算与统计，纯内存计算
// 红线: 不读文件，不改输入；相同输入得到相同输出
// ==========================================

pub mod capacity_metrics;
pub mod summary;

// 重导出核心引擎
pub use capacity_metrics::{
    CapacityMetricsEngine, MetricInputs, DEFAULT_DEMAND, DEFAULT_EFFICIENCY, DEFAULT_MARGIN,
    DEFAULT_YIELD_RATE,
};
pub use summary::{CapacitySummary, KeyMetrics};
