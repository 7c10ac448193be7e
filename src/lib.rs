// ==========================================
// 产能测算系统 - 核心库
// ==========================================
// 流程: 源文件 -> 原始表格 -> 月份列 / 班次 / 参数行 -> 产能指标
// 系统定位: 驾驶舱的数据层（展示/上传/鉴权不在本库范围内）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格与指标类型
pub mod domain;

// 导入层 - 源文件读取与区块定位
pub mod importer;

// 引擎层 - 指标计算与统计
pub mod engine;

// 配置层 - 资源能力组与预测服务
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CapacitySeries, CellValue, DataTable, MetricKind, MonthColumn, RawTable, ShiftBlock,
};

// 导入
pub use importer::{
    extract_capacity, load_capacity_from_file, CapacityImport, CapacityImporter, ImportError,
};

// 引擎
pub use engine::{CapacityMetricsEngine, CapacitySummary, KeyMetrics, MetricInputs};

// 配置
pub use config::{AppConfig, ConfigManager};

// API
pub use api::{ApiError, CapacityApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产能测算系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "产能测算系统");
    }
}
