// ==========================================
// 产能测算系统 - 表头组合
// ==========================================
// 职责: 第 0 行（年份）+ 第 1 行（期次后缀）-> 月份列
// 规则: 后缀为空的列整列跳过，不产生标签也不占下标
// ==========================================

use crate::domain::{MonthColumn, RawTable};
use crate::importer::error::{ImportError, ImportResult};

/// 月份数据列的起始列下标
pub const MONTH_START_COLUMN: usize = 2;

const YEAR_ROW: usize = 0;
const SUFFIX_ROW: usize = 1;
const PERIOD_MARKER: &str = "AP";

/// 年份单元格标准化
///
/// "2024" / "2024.0" -> "2024"；无法按数值解析时保留第一个 '.' 之前的文本
pub fn normalize_year(raw: &str) -> String {
    let y = raw.trim();
    match y.parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{}", v.trunc() as i64),
        _ => y.split('.').next().unwrap_or("").trim().to_string(),
    }
}

/// 组合单列的月份标签；后缀为空时返回 None
pub fn compose_label(year_cell: Option<&str>, suffix_cell: Option<&str>) -> Option<String> {
    let suffix = suffix_cell?.trim();
    if suffix.is_empty() {
        return None;
    }

    let year = year_cell.map(normalize_year).unwrap_or_default();
    if year.is_empty() {
        return Some(suffix.to_string());
    }

    let period = suffix.replace(PERIOD_MARKER, "");
    Some(format!("{}_{}{}", year, PERIOD_MARKER, period.trim()))
}

/// 从表头两行解析月份列
///
/// # 返回
/// - Ok(Vec<MonthColumn>): 按列顺序排列的 (标签, 列下标)
/// - Err(HeaderParse): 表格不足两行，或没有任何有效月份列
pub fn compose_month_columns(table: &RawTable, start_col: usize) -> ImportResult<Vec<MonthColumn>> {
    if table.row_count() <= SUFFIX_ROW {
        return Err(ImportError::HeaderParse(format!(
            "表头需要两行，实际只有 {} 行",
            table.row_count()
        )));
    }

    let months: Vec<MonthColumn> = (start_col..table.column_count())
        .filter_map(|col| {
            compose_label(table.cell(YEAR_ROW, col), table.cell(SUFFIX_ROW, col))
                .map(|label| MonthColumn::new(label, col))
        })
        .collect();

    if months.is_empty() {
        return Err(ImportError::HeaderParse("未解析到有效的月份列".to_string()));
    }

    Ok(months)
}
