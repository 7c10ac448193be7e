// ==========================================
// 产能测算系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入/配置错误为用户可读的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 资源能力组
    // ==========================================
    #[error("资源能力组不存在: {0}")]
    UnknownResourceGroup(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件不存在: {0}")]
    SourceNotFound(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("表头解析失败: {0}")]
    HeaderError(String),

    // ==========================================
    // 自定义变换
    // ==========================================
    #[error("模型运行错误 ({name}): {message}")]
    Transform { name: String, message: String },

    #[error("模型输出不是有效表格 ({name}): {message}")]
    InvalidTransformOutput { name: String, message: String },

    // ==========================================
    // 预测服务请求
    // ==========================================
    #[error("请求体构建失败: {0}")]
    Template(String),

    // ==========================================
    // 配置与序列化
    // ==========================================
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("导出失败: {0}")]
    Export(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ImportError 转换
// 目的: 区分 "文件不存在" / "表结构错误" / 其他读取失败
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::SourceNotFound(path),
            ImportError::HeaderParse(msg) => ApiError::HeaderError(msg),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::Export(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Export(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
