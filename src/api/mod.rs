// ==========================================
// 产能测算系统 - API 层
// ==========================================
// 职责: 提供驾驶舱/命令行使用的业务接口
// ==========================================

pub mod capacity_api;
pub mod error;
pub mod export;
pub mod prediction;
pub mod transform;

// 重导出核心类型
pub use capacity_api::{CapacityApi, SeriesView};
pub use error::{ApiError, ApiResult};
pub use export::{export_csv, export_file_name};
pub use prediction::{build_prediction_request, extract_response_records, PredictionRequest};
pub use transform::{
    CapacityTransform, NamedTransform, TransformOutcome, TransformRunner, UtilizationTransform,
};
