// ==========================================
// CapacityApi 集成测试
// ==========================================
// 测试目标: 配置 -> 资源能力组 -> 指标/摘要/自定义模型/预测请求/导出
// ==========================================

mod test_helpers;

use capacity_model::api::transform::{STATUS_COLUMN, UTILIZATION_COLUMN};
use capacity_model::api::{
    export_csv, extract_response_records, ApiError, CapacityApi, NamedTransform, SeriesView,
    UtilizationTransform,
};
use capacity_model::config::ConfigManager;
use capacity_model::domain::{CellValue, DataTable};
use capacity_model::logging;
use serde_json::json;
use test_helpers::{assert_series_approx, create_group_workspace, SCENARIO_CSV, WORKSHOP_CSV};

fn create_api() -> (tempfile::TempDir, CapacityApi) {
    let (dir, config) =
        create_group_workspace(&[("五轴加工中心1组", SCENARIO_CSV), ("钳工组", WORKSHOP_CSV)])
            .unwrap();
    (dir, CapacityApi::new(config))
}

// ==========================================
// 测试用例 1: 资源能力组加载
// ==========================================
#[test]
fn test_load_configured_groups() {
    logging::init_test();
    let (_dir, api) = create_api();

    let groups = api.list_resource_groups();
    assert_eq!(groups.len(), 2);
    for group in &groups {
        let import = api.load_group(group).unwrap();
        assert!(import.series.is_aligned());
        assert!(!import.series.is_empty());
    }

    let series = api
        .group_series("五轴加工中心1组", &SeriesView::default())
        .unwrap();
    assert_series_approx(&series.capacity_gap, &[-0.8, -28.8]);
}

#[test]
fn test_unknown_group_and_missing_file() {
    let (dir, api) = create_api();
    assert!(matches!(
        api.load_group("装配组"),
        Err(ApiError::UnknownResourceGroup(_))
    ));

    std::fs::remove_file(dir.path().join("钳工组.csv")).unwrap();
    assert!(matches!(
        api.load_group("钳工组"),
        Err(ApiError::SourceNotFound(_))
    ));
}

#[test]
fn test_header_error_surfaces() {
    let (_dir, config) = create_group_workspace(&[("空表", ",,\n,,\n")]).unwrap();
    let api = CapacityApi::new(config);
    assert!(matches!(api.load_group("空表"), Err(ApiError::HeaderError(_))));
}

// ==========================================
// 测试用例 2: 配置文件往返
// ==========================================
#[test]
fn test_config_round_trip_drives_api() {
    let (dir, config) = create_group_workspace(&[("钳工组", WORKSHOP_CSV)]).unwrap();
    config.save().unwrap();

    let reloaded = ConfigManager::load(dir.path().join("config.json")).unwrap();
    assert_eq!(reloaded.config(), config.config());

    let api = CapacityApi::new(reloaded);
    assert_eq!(api.available_years("钳工组").unwrap(), vec!["2024"]);
}

// ==========================================
// 测试用例 3: 关键指标与摘要
// ==========================================
#[test]
fn test_key_metrics_and_summary() {
    let (_dir, api) = create_api();

    let metrics = api.key_metrics("五轴加工中心1组").unwrap();
    assert_eq!(metrics.gap_months, 2);
    let (label, hours) = metrics.max_gap.unwrap();
    assert_eq!(label, "2024_AP2");
    assert!((hours - 28.8).abs() < 1e-9);

    let workshop = api.key_metrics("钳工组").unwrap();
    assert_eq!(workshop.gap_months, 0);
    assert!(workshop.max_gap.is_none());

    let text = api.summary_text("五轴加工中心1组").unwrap();
    assert!(text.contains("2024_AP1 至 2024_AP2，共 2 个月"));
    assert!(text.contains("存在缺口的月份：2 个月"));
}

// ==========================================
// 测试用例 4: 自定义模型
// ==========================================
#[test]
fn test_builtin_transform_on_group() {
    let (_dir, api) = create_api();
    let outcome = api
        .run_transform("五轴加工中心1组", &UtilizationTransform)
        .unwrap();

    assert_eq!(outcome.added_columns.len(), 4);
    assert!(outcome.removed_columns.is_empty());
    // 需求 300 / 有效产能 299.2
    assert_eq!(
        outcome.table.numbers(UTILIZATION_COLUMN),
        Some(vec![100.27, 110.29])
    );
    let idx = outcome.table.column_index(STATUS_COLUMN).unwrap();
    assert_eq!(outcome.table.rows[0][idx], CellValue::Text("超负荷".to_string()));
}

#[test]
fn test_user_transform_failure() {
    let (_dir, api) = create_api();
    let broken = NamedTransform::new("坏模型", |_t: DataTable| Err("列不存在".to_string()));
    match api.run_transform("钳工组", &broken) {
        Err(ApiError::Transform { name, message }) => {
            assert_eq!(name, "坏模型");
            assert_eq!(message, "列不存在");
        }
        other => panic!("应为 Transform 错误，实际: {:?}", other.map(|o| o.added_columns)),
    }
}

// ==========================================
// 测试用例 5: 预测服务请求与响应
// ==========================================
#[test]
fn test_prediction_request_and_response() {
    let (_dir, api) = create_api();
    let request = api.prediction_request("钳工组").unwrap();

    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(
        request.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    let data = request.body["inputs"]["capacity_data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[2]["日期"], json!("2024_AP3"));
    // 需求为 0 的月份差异百分比为 null
    assert_eq!(data[2]["产能差异（%）"], json!(null));

    let response = json!({"result": [], "predictions": [{"日期": "2024_AP4", "基本需求（小时）": 320}]});
    let records = extract_response_records(&response).unwrap();
    assert_eq!(records[0]["日期"], json!("2024_AP4"));
}

// ==========================================
// 测试用例 6: 导出
// ==========================================
#[test]
fn test_export_group_table() {
    let (_dir, api) = create_api();
    let table = api
        .group_table("五轴加工中心1组", &SeriesView::default())
        .unwrap();

    let mut buf = Vec::new();
    export_csv(&table, &mut buf).unwrap();
    assert!(buf.starts_with(&[0xEF, 0xBB, 0xBF]));

    let text = String::from_utf8(buf[3..].to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("日期,基础产能（小时）,合格率"));
    assert!(lines[1].starts_with("2024_AP1,352,1,0.85,"));
}
