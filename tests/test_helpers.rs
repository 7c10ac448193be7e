// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成产能源文件夹具（UTF-8 / UTF-8 BOM / GBK）与临时配置
// ==========================================

#![allow(dead_code)]

use capacity_model::config::{AppConfig, ConfigManager};
use std::collections::BTreeMap;
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// 最小场景：一个班次，两个月，无合格率/效率/裕度
pub const SCENARIO_CSV: &str = "\
,,2024,2024
,,AP1,AP2
每班次工作资源能力数量,一班,2,2
班次,,,
一班,8,22,20
基本需求（小时）,,300,300
";

/// 车间完整样式：两个班次、备注行、脚注、空行、加班行、参数行
pub const WORKSHOP_CSV: &str = "\
资源能力组,钳工组,2024.0,2024.0,2024.0,
,,AP1,AP2,AP 3,
每班次工作资源能力数量,一班,2,2,2,
,二班,1,1,1,
,备注,9,9,9,
注：资源数量按设备台数统计,,,,,
班次,,,,,
一班,8,22,20,21,
二班,8,22,20,21,
,,,,,
加班,,1,1,1,
合格率,,0.98,0.98,0.98,
生产效率,,0.85,0.85,0.9,
产能裕度,,0.2,0.2,0.2,
基本需求（小时）,,400,300,0,
";

/// 写入 UTF-8 CSV
pub fn write_csv(content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    write_bytes(content.as_bytes(), ".csv")
}

/// 写入带 BOM 的 UTF-8 CSV
pub fn write_csv_with_bom(content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(content.as_bytes());
    write_bytes(&bytes, ".csv")
}

/// 写入 GBK 编码的 CSV
pub fn write_csv_gbk(content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let (bytes, _, had_errors) = encoding_rs::GBK.encode(content);
    if had_errors {
        return Err("内容无法用 GBK 表示".into());
    }
    write_bytes(&bytes, ".csv")
}

pub fn write_bytes(bytes: &[u8], suffix: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

/// 在临时目录中写入资源能力组源文件，并返回指向它们的配置
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - ConfigManager: 配置路径位于该目录下，组文件使用相对路径
pub fn create_group_workspace(
    groups: &[(&str, &str)],
) -> Result<(TempDir, ConfigManager), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let mut resource_groups = BTreeMap::new();
    for (name, content) in groups {
        let file_name = format!("{}.csv", name);
        std::fs::write(dir.path().join(&file_name), content)?;
        resource_groups.insert(name.to_string(), PathBuf::from(file_name));
    }

    let config = AppConfig {
        resource_groups,
        ..Default::default()
    };
    let manager = ConfigManager::from_config(dir.path().join("config.json"), config);
    Ok((dir, manager))
}

/// 近似相等（浮点）
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn assert_series_approx(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "长度不一致: {:?} vs {:?}", actual, expected);
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(approx_eq(*a, *e), "第 {} 个值不一致: {} vs {}", i, a, e);
    }
}

pub fn path_of(file: &NamedTempFile) -> &Path {
    file.path()
}
