// ==========================================
// 产能测算系统 - 系统配置对象
// ==========================================
// 内容: 资源能力组 -> 源文件路径, 预测服务请求配置
// 默认值: 与出厂配置文件一致，字段缺失时按默认值补齐
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 请求体模板中的数据占位符
pub const DATA_PLACEHOLDER: &str = "{{data}}";

/// 系统配置（持久化对象）
///
/// 存储位置：JSON 配置文件（见 ConfigManager::default_config_path）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 资源能力组：显示名称 -> 源文件路径（相对路径基于配置文件所在目录）
    #[serde(default = "default_resource_groups")]
    pub resource_groups: BTreeMap<String, PathBuf>,

    /// 外部预测服务的请求配置
    #[serde(default)]
    pub prediction_api: PredictionApiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resource_groups: default_resource_groups(),
            prediction_api: PredictionApiConfig::default(),
        }
    }
}

fn default_resource_groups() -> BTreeMap<String, PathBuf> {
    BTreeMap::from([
        ("五轴加工中心1组".to_string(), PathBuf::from("五轴加工中心一组.csv")),
        ("钳工组".to_string(), PathBuf::from("钳工组.csv")),
    ])
}

/// 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Post,
    Get,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
        }
    }
}

/// 预测服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionApiConfig {
    /// 模型名称
    pub name: String,

    /// API 地址
    pub url: String,

    #[serde(default)]
    pub method: HttpMethod,

    /// 请求头
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// 请求体模板；等于 "{{data}}" 的字符串值会被替换为产能记录
    #[serde(default = "default_body_template")]
    pub body_template: serde_json::Value,
}

impl Default for PredictionApiConfig {
    fn default() -> Self {
        Self {
            name: "Smart_AI 产能预测模型".to_string(),
            url: "https://your-smart-ai-endpoint.com/api/workflow/run".to_string(),
            method: HttpMethod::Post,
            headers: BTreeMap::from([
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), "Bearer your-api-key".to_string()),
            ]),
            body_template: default_body_template(),
        }
    }
}

fn default_body_template() -> serde_json::Value {
    json!({
        "workflow_id": "your-workflow-id",
        "inputs": {
            "capacity_data": DATA_PLACEHOLDER
        }
    })
}
