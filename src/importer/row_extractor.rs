// ==========================================
// 产能测算系统 - 单行序列提取
// ==========================================
// 职责: 按行名提取一行的各月数值
// 说明: 行不存在返回 None（而不是全 0 序列），由计算阶段决定默认值
// ==========================================

use crate::domain::{MonthColumn, RawTable};
use crate::importer::cursor::TableCursor;
use crate::importer::data_cleaner::DataCleaner;

/// 按行名提取月份序列
///
/// # 返回
/// - Some(Vec<f64>): 与 months 等长，无法解析的单元格为 NaN
/// - None: 表中没有该行
pub fn extract_row_series(table: &RawTable, label: &str, months: &[MonthColumn]) -> Option<Vec<f64>> {
    let cursor = TableCursor::locate(table, label)?;
    let columns: Vec<usize> = months.iter().map(|m| m.column_index).collect();
    Some(DataCleaner.coerce_series(&cursor.current().cells_at(&columns)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_row_is_none() {
        let table = RawTable::from_text_rows(&[vec!["合格率", "", "0.98"]]);
        let months = vec![MonthColumn::new("2024_AP1", 2)];
        assert!(extract_row_series(&table, "生产效率", &months).is_none());
    }

    #[test]
    fn test_present_row_follows_month_columns() {
        let table = RawTable::from_text_rows(&[vec!["合格率", "", "0.98", "skip", "", "0.95"]]);
        let months = vec![
            MonthColumn::new("2024_AP1", 2),
            MonthColumn::new("2024_AP2", 4),
            MonthColumn::new("2024_AP3", 5),
            MonthColumn::new("2024_AP4", 9),
        ];
        let series = extract_row_series(&table, "合格率", &months).unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series[0], 0.98);
        assert!(series[1].is_nan());
        assert_eq!(series[2], 0.95);
        assert!(series[3].is_nan());
    }
}
