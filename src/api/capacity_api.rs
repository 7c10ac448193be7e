// ==========================================
// 产能测算系统 - 产能 API
// ==========================================
// 职责: 面向驾驶舱的查询入口
//       资源能力组 -> 源文件 -> 产能指标 / 表格 / 关键指标 / 摘要
// 架构: API 层 → ConfigManager + CapacityImporter → Engine
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::prediction::{build_prediction_request, PredictionRequest};
use crate::api::transform::{CapacityTransform, TransformOutcome, TransformRunner};
use crate::config::ConfigManager;
use crate::domain::{CapacitySeries, DataTable};
use crate::engine::summary::{CapacitySummary, KeyMetrics};
use crate::importer::{CapacityImport, CapacityImporter, CapacityImporterImpl};
use tracing::{info, instrument, warn};

/// 视图选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesView {
    /// 只保留该年份的月份
    pub year: Option<String>,
    /// 按 (年, 期) 排序
    pub chronological: bool,
}

// ==========================================
// CapacityApi - 产能 API
// ==========================================
pub struct CapacityApi {
    config: ConfigManager,
    importer: Box<dyn CapacityImporter>,
}

impl CapacityApi {
    pub fn new(config: ConfigManager) -> Self {
        Self::with_importer(config, Box::new(CapacityImporterImpl::new()))
    }

    /// 使用自定义导入器
    pub fn with_importer(config: ConfigManager, importer: Box<dyn CapacityImporter>) -> Self {
        Self { config, importer }
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    /// 已配置的资源能力组名称
    pub fn list_resource_groups(&self) -> Vec<String> {
        self.config
            .resource_group_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// 读取资源能力组的源文件并计算指标
    ///
    /// # 返回
    /// - Err(UnknownResourceGroup): 配置中没有该组
    /// - Err(SourceNotFound): 源文件不存在
    /// - Err(HeaderError / ImportError): 读取或表头解析失败
    #[instrument(skip(self))]
    pub fn load_group(&self, group: &str) -> ApiResult<CapacityImport> {
        let path = self
            .config
            .resolve_group_path(group)
            .ok_or_else(|| ApiError::UnknownResourceGroup(group.to_string()))?;

        match self.importer.import_from_file(&path) {
            Ok(import) => {
                info!(months = import.series.len(), "资源能力组加载完成");
                Ok(import)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "资源能力组加载失败");
                Err(e.into())
            }
        }
    }

    /// 指标序列（按视图选项筛选/排序）
    pub fn group_series(&self, group: &str, view: &SeriesView) -> ApiResult<CapacitySeries> {
        let mut series = self.load_group(group)?.series;
        if let Some(year) = view.year.as_deref() {
            series = series.filter_by_year(year);
        }
        if view.chronological {
            series = series.sorted_chronologically();
        }
        Ok(series)
    }

    /// 每月一行的表格
    pub fn group_table(&self, group: &str, view: &SeriesView) -> ApiResult<DataTable> {
        Ok(self.group_series(group, view)?.to_table())
    }

    /// 可选年份
    pub fn available_years(&self, group: &str) -> ApiResult<Vec<String>> {
        Ok(self.load_group(group)?.series.available_years())
    }

    /// 关键指标（基于全部月份）
    pub fn key_metrics(&self, group: &str) -> ApiResult<KeyMetrics> {
        let series = self.load_group(group)?.series;
        Ok(KeyMetrics::from_series(&series))
    }

    /// 文本摘要
    pub fn summary_text(&self, group: &str) -> ApiResult<String> {
        let series = self.load_group(group)?.series;
        Ok(CapacitySummary::new(&series).render(group))
    }

    /// 对资源能力组的表格运行自定义模型
    pub fn run_transform(
        &self,
        group: &str,
        transform: &dyn CapacityTransform,
    ) -> ApiResult<TransformOutcome> {
        let table = self.group_table(group, &SeriesView::default())?;
        TransformRunner::run(transform, &table)
    }

    /// 按配置生成预测服务请求
    pub fn prediction_request(&self, group: &str) -> ApiResult<PredictionRequest> {
        let table = self.group_table(group, &SeriesView::default())?;
        build_prediction_request(&self.config.config().prediction_api, &table)
    }
}
