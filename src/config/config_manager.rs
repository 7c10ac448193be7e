// ==========================================
// 产能测算系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、保存
// 存储: JSON 文件（UTF-8，保留中文）
// ==========================================

use crate::config::app_config::AppConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "CAPACITY_MODEL_CONFIG";

const CONFIG_DIR_NAME: &str = "capacity-model";
const CONFIG_FILE_NAME: &str = "config.json";
const FALLBACK_CONFIG_PATH: &str = "./capacity_model_config.json";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("配置文件写入失败 ({path}): {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("配置格式错误: {0}")]
    Format(#[from] serde_json::Error),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    config: AppConfig,
}

impl ConfigManager {
    /// 默认配置文件路径
    ///
    /// 优先级: 环境变量 CAPACITY_MODEL_CONFIG > 用户配置目录 > 当前目录
    pub fn default_config_path() -> PathBuf {
        // 允许通过环境变量显式指定配置路径（便于调试/测试/CI）
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        match dirs::config_dir() {
            Some(dir) => dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
            None => PathBuf::from(FALLBACK_CONFIG_PATH),
        }
    }

    /// 使用内存中的配置创建（不读文件）
    pub fn from_config(path: impl Into<PathBuf>, config: AppConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// 读取配置文件（文件必须存在）
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), groups = config.resource_groups.len(), "配置加载完成");
        Ok(Self::from_config(path, config))
    }

    /// 读取配置文件；文件不存在时使用默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Ok(Self::from_config(path, AppConfig::default()));
        }
        Self::load(path)
    }

    /// 保存配置（格式化 JSON）
    pub fn save(&self) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.path, json).map_err(write_err)?;
        info!(path = %self.path.display(), "配置已保存");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// 资源能力组名称（按名称排序）
    pub fn resource_group_names(&self) -> Vec<&str> {
        self.config.resource_groups.keys().map(String::as_str).collect()
    }

    /// 解析资源能力组的源文件路径
    ///
    /// 相对路径基于配置文件所在目录
    pub fn resolve_group_path(&self, group: &str) -> Option<PathBuf> {
        let file = self.config.resource_groups.get(group)?;
        if file.is_absolute() {
            return Some(file.clone());
        }
        let base = self.path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_or_default_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let manager = ConfigManager::load_or_default(&path).unwrap();
        assert_eq!(manager.resource_group_names(), vec!["五轴加工中心1组", "钳工组"]);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut manager = ConfigManager::load_or_default(&path).unwrap();
        manager
            .config_mut()
            .resource_groups
            .insert("装配组".to_string(), PathBuf::from("data/装配组.csv"));
        manager.save().unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("装配组"));

        let reloaded = ConfigManager::load(&path).unwrap();
        assert_eq!(reloaded.config(), manager.config());
        assert_eq!(
            reloaded.resolve_group_path("装配组").unwrap(),
            dir.path().join("nested").join("data/装配组.csv")
        );
        assert!(reloaded.resolve_group_path("不存在").is_none());
    }

    #[test]
    fn test_invalid_json_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ConfigManager::load(&path), Err(ConfigError::Format(_))));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"resource_groups": {"钳工组": "/data/钳工组.csv"}}"#).unwrap();
        let manager = ConfigManager::load(&path).unwrap();
        assert_eq!(manager.resource_group_names(), vec!["钳工组"]);
        assert_eq!(manager.config().prediction_api.method.as_str(), "POST");
        assert_eq!(
            manager.resolve_group_path("钳工组").unwrap(),
            PathBuf::from("/data/钳工组.csv")
        );
    }
}
