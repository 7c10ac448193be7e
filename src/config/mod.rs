// ==========================================
// 产能测算系统 - 配置层
// ==========================================
// 职责: 资源能力组与预测服务配置的加载/保存
// 存储: JSON 配置文件
// ==========================================

pub mod app_config;
pub mod config_manager;

// 重导出核心配置管理器
pub use app_config::{AppConfig, HttpMethod, PredictionApiConfig, DATA_PLACEHOLDER};
pub use config_manager::{ConfigError, ConfigManager, CONFIG_PATH_ENV};
