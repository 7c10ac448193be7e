// ==========================================
// 产能测算系统 - 产能导入器实现
// ==========================================
// 流程: 原始表格 -> 月份列 -> 班次区块 / 单行参数 -> 指标计算
// 说明: 无外部状态，每次调用独立；除首次读文件外不做 I/O
// ==========================================

use crate::domain::{CapacitySeries, RawTable};
use crate::engine::capacity_metrics::{CapacityMetricsEngine, MetricInputs};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::header::{compose_month_columns, MONTH_START_COLUMN};
use crate::importer::importer_trait::{CapacityImporter, FileParser};
use crate::importer::labels::{
    BASE_CAPACITY_ROW, DEMAND_ROW, EFFICIENCY_ROW, MARGIN_ROW, YIELD_RATE_ROW,
};
use crate::importer::row_extractor::extract_row_series;
use crate::importer::shift_extractor::ShiftExtractor;
use std::path::Path;
use tracing::{debug, info, instrument};

/// 单次导入结果
#[derive(Debug, Clone)]
pub struct CapacityImport {
    /// 计算得到的指标序列
    pub series: CapacitySeries,
    /// 原始表格（供展示原始数据）
    pub raw: RawTable,
}

/// 从内存中的原始表格计算指标
///
/// # 返回
/// - Ok(CapacitySeries)
/// - Err(HeaderParse): 没有有效月份列
pub fn extract_capacity(table: &RawTable) -> ImportResult<CapacitySeries> {
    let months = compose_month_columns(table, MONTH_START_COLUMN)?;
    debug!(months = months.len(), "月份列解析完成");

    let shifts = ShiftExtractor::new().extract(table, &months);

    let inputs = MetricInputs {
        base_capacity_override: extract_row_series(table, BASE_CAPACITY_ROW, &months),
        yield_rate: extract_row_series(table, YIELD_RATE_ROW, &months),
        efficiency: extract_row_series(table, EFFICIENCY_ROW, &months),
        margin: extract_row_series(table, MARGIN_ROW, &months),
        demand: extract_row_series(table, DEMAND_ROW, &months),
    };
    debug!(
        has_override = inputs.base_capacity_override.is_some(),
        has_yield_rate = inputs.yield_rate.is_some(),
        has_efficiency = inputs.efficiency.is_some(),
        has_margin = inputs.margin.is_some(),
        has_demand = inputs.demand.is_some(),
        "参数行提取完成"
    );

    Ok(CapacityMetricsEngine::new().derive(months, &shifts, inputs))
}

// ==========================================
// CapacityImporterImpl
// ==========================================
pub struct CapacityImporterImpl {
    parser: Box<dyn FileParser>,
}

impl Default for CapacityImporterImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl CapacityImporterImpl {
    pub fn new() -> Self {
        Self {
            parser: Box::new(UniversalFileParser::new()),
        }
    }

    /// 使用自定义解析器（测试或限定编码时使用）
    pub fn with_parser(parser: Box<dyn FileParser>) -> Self {
        Self { parser }
    }
}

impl CapacityImporter for CapacityImporterImpl {
    #[instrument(skip(self, file_path), fields(path = %file_path.display()))]
    fn import_from_file(&self, file_path: &Path) -> ImportResult<CapacityImport> {
        let raw = self.parser.parse_to_raw_table(file_path)?;
        let series = extract_capacity(&raw)?;
        info!(months = series.len(), "产能指标计算完成");
        Ok(CapacityImport { series, raw })
    }
}

/// 便捷函数：按默认解析器读取文件并计算指标
pub fn load_capacity_from_file<P: AsRef<Path>>(file_path: P) -> ImportResult<CapacityImport> {
    CapacityImporterImpl::new().import_from_file(file_path.as_ref())
}
