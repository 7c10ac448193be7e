// ==========================================
// 产能测算系统 - 命令行入口
// ==========================================
// 用法:
//   capacity-model [资源能力组]
//
// 不指定资源能力组时依次计算配置中的全部组，
// 输出关键指标摘要与每月记录（JSON）
// ==========================================

use anyhow::{bail, Context};
use capacity_model::api::CapacityApi;
use capacity_model::config::ConfigManager;
use capacity_model::engine::CapacitySummary;
use capacity_model::{logging, APP_NAME, VERSION};
use tracing::{error, info};

fn run_group(api: &CapacityApi, group: &str) -> anyhow::Result<()> {
    let import = api
        .load_group(group)
        .with_context(|| format!("资源能力组 {} 计算失败", group))?;

    println!("{}", CapacitySummary::new(&import.series).render(group));
    let records = import.series.to_table().to_records();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logging::init();
    info!("{} v{}", APP_NAME, VERSION);

    let config_path = ConfigManager::default_config_path();
    let config = ConfigManager::load_or_default(&config_path)
        .with_context(|| format!("无法加载配置: {}", config_path.display()))?;
    let api = CapacityApi::new(config);

    let groups = match std::env::args().nth(1).map(|s| s.trim().to_string()) {
        Some(group) if !group.is_empty() => vec![group],
        _ => api.list_resource_groups(),
    };

    let mut failed = 0usize;
    for group in &groups {
        if let Err(e) = run_group(&api, group) {
            error!(group = %group, error = %format!("{:#}", e), "计算失败");
            eprintln!("{:#}", e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{}/{} 个资源能力组计算失败", failed, groups.len());
    }
    Ok(())
}
