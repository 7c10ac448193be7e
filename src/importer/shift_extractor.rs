// ==========================================
// 产能测算系统 - 班次区块提取
// ==========================================
// 职责: 从两个独立区块提取班次数据并按班次名合并
// 1) 每班次工作资源能力数量: 第 1 列为班次名，月份列为资源数量
// 2) 班次: 第 0 列为班次名，第 1 列为工时，月份列为工作天数
// ==========================================

use crate::domain::{MonthColumn, RawTable, ShiftBlock, SHIFT_NAMES};
use crate::importer::cursor::{RowView, ScanControl, TableCursor};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::labels::{
    FOOTNOTE_MARKER, SHIFT_HOURS_ANCHOR, SHIFT_HOURS_STOP_LABELS, SHIFT_RESOURCE_ANCHOR,
    SHIFT_RESOURCE_STOP_LABELS,
};
use tracing::{debug, warn};

const SHIFT_NAME_COLUMN: usize = 1;
const SHIFT_HOURS_COLUMN: usize = 1;

/// 单个班次的工时与天数
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftHoursRow {
    pub shift: String,
    pub hours: f64,
    pub days: Vec<f64>,
}

// ==========================================
// ShiftExtractor
// ==========================================
pub struct ShiftExtractor {
    cleaner: DataCleaner,
}

impl Default for ShiftExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftExtractor {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    fn month_indices(months: &[MonthColumn]) -> Vec<usize> {
        months.iter().map(|m| m.column_index).collect()
    }

    fn month_values(&self, row: &RowView<'_>, columns: &[usize]) -> Vec<f64> {
        self.cleaner.coerce_series(&row.cells_at(columns))
    }

    /// 提取每班次资源数量
    ///
    /// 从锚点行（含）向下扫描，遇到脚注或其他区块标签停止；
    /// 第 1 列不是已知班次名的行直接跳过
    pub fn extract_resource(&self, table: &RawTable, months: &[MonthColumn]) -> Vec<(String, Vec<f64>)> {
        let Some(cursor) = TableCursor::locate(table, SHIFT_RESOURCE_ANCHOR) else {
            debug!("未找到资源数量区块");
            return Vec::new();
        };

        let columns = Self::month_indices(months);
        cursor
            .scan(|row| {
                let label = row.label();
                if label.starts_with(FOOTNOTE_MARKER) || SHIFT_RESOURCE_STOP_LABELS.contains(&label) {
                    ScanControl::Stop
                } else if SHIFT_NAMES.contains(&row.text(SHIFT_NAME_COLUMN)) {
                    ScanControl::Accept
                } else {
                    ScanControl::Skip
                }
            })
            .into_iter()
            .map(|row| {
                (
                    row.text(SHIFT_NAME_COLUMN).to_string(),
                    self.month_values(&row, &columns),
                )
            })
            .collect()
    }

    /// 提取班次工时与每月工作天数
    ///
    /// 从锚点下一行开始扫描；第 0 列为空的行跳过（允许空行分隔），
    /// 遇到结束标签停止
    pub fn extract_hours_and_days(&self, table: &RawTable, months: &[MonthColumn]) -> Vec<ShiftHoursRow> {
        let Some(cursor) = TableCursor::locate(table, SHIFT_HOURS_ANCHOR) else {
            debug!("未找到班次工时区块");
            return Vec::new();
        };

        let columns = Self::month_indices(months);
        cursor
            .advance(1)
            .scan(|row| {
                let label = row.label();
                if label.is_empty() {
                    ScanControl::Skip
                } else if SHIFT_HOURS_STOP_LABELS.contains(&label) {
                    ScanControl::Stop
                } else {
                    ScanControl::Accept
                }
            })
            .into_iter()
            .map(|row| ShiftHoursRow {
                shift: row.label().to_string(),
                hours: self.cleaner.coerce_hours(row.cell(SHIFT_HOURS_COLUMN)),
                days: self.month_values(&row, &columns),
            })
            .collect()
    }

    /// 提取两个区块并按班次名取并集
    pub fn extract(&self, table: &RawTable, months: &[MonthColumn]) -> ShiftBlock {
        let mut block = ShiftBlock::new();

        let resource_rows = self.extract_resource(table, months);
        let hours_rows = self.extract_hours_and_days(table, months);
        debug!(
            resource_shifts = resource_rows.len(),
            hours_shifts = hours_rows.len(),
            "班次区块提取完成"
        );

        for (shift, resource) in resource_rows {
            block.set_resource(&shift, resource);
        }
        for row in hours_rows {
            block.set_hours_and_days(&row.shift, row.hours, row.days);
        }

        // 两个区块的班次名按文本相等匹配，拼写不一致只会产生 0 贡献
        let incomplete = block.incomplete_shifts();
        if !incomplete.is_empty() {
            warn!(shifts = ?incomplete, "班次只出现在一个区块中，缺失部分按 0 计算");
        }

        block
    }
}
