// ==========================================
// 产能测算系统 - 预测服务请求构建
// ==========================================
// 职责: 按配置模板生成请求（方法/地址/请求头/请求体），
//       并从响应中取出预测记录
// 说明: 本模块不发起网络请求
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{HttpMethod, PredictionApiConfig, DATA_PLACEHOLDER};
use crate::domain::DataTable;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 响应中可能承载预测记录的字段（按优先级）
pub const RESPONSE_RECORD_KEYS: [&str; 5] = ["data", "result", "output", "predictions", "forecast"];

/// 待发送的预测请求
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

/// 构建预测请求
///
/// 请求体模板中等于 `{{data}}` 的字符串值替换为表格记录数组
pub fn build_prediction_request(
    config: &PredictionApiConfig,
    table: &DataTable,
) -> ApiResult<PredictionRequest> {
    if config.url.trim().is_empty() {
        return Err(ApiError::Template(format!("{} 未配置 API 地址", config.name)));
    }

    let records = Value::Array(table.to_records().into_iter().map(Value::Object).collect());
    let mut body = config.body_template.clone();
    let replaced = substitute_placeholder(&mut body, &records);
    if replaced == 0 {
        warn!(model = %config.name, "请求体模板中没有数据占位符，产能数据不会随请求发送");
    }
    debug!(model = %config.name, records = table.row_count(), replaced, "预测请求已生成");

    Ok(PredictionRequest {
        method: config.method,
        url: config.url.clone(),
        headers: config.headers.clone(),
        body,
    })
}

/// 原地替换占位符，返回替换次数
fn substitute_placeholder(value: &mut Value, data: &Value) -> usize {
    match value {
        Value::String(s) if s == DATA_PLACEHOLDER => {
            *value = data.clone();
            1
        }
        Value::Array(items) => items
            .iter_mut()
            .map(|item| substitute_placeholder(item, data))
            .sum(),
        Value::Object(map) => map
            .values_mut()
            .map(|item| substitute_placeholder(item, data))
            .sum(),
        _ => 0,
    }
}

/// 从预测服务响应中提取记录
///
/// 依次查看 data / result / output / predictions / forecast，返回第一个非空数组
pub fn extract_response_records(response: &Value) -> Option<&Vec<Value>> {
    let object = response.as_object()?;
    RESPONSE_RECORD_KEYS
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_array))
        .find(|items| !items.is_empty())
}
