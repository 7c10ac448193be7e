// ==========================================
// 产能测算系统 - 原始表格模型
// ==========================================
// 职责: 承载加载后的二维文本网格（不做类型推断）
// 约定: 第 0/1 行为复合表头，第 0 列为行标签，第 2 列起为数据列
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RawTable - 原始文本表格
// ==========================================
// 单元格要么是文本，要么缺失（None）
// 每次加载构造一次，提取完成后丢弃
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// 从已解析的行构造表格
    ///
    /// 空字符串单元格统一视为缺失
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.filter(|v| !v.is_empty()))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// 从字符串网格构造表格（"" 视为缺失）
    ///
    /// # 示例
    /// ```
    /// use capacity_model::domain::RawTable;
    /// let table = RawTable::from_text_rows(&[&["", "", "2024"], &["", "", "AP1"]]);
    /// assert_eq!(table.cell(0, 2), Some("2024"));
    /// assert_eq!(table.cell(0, 0), None);
    /// ```
    pub fn from_text_rows<R, S>(rows: &[R]) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|cell| Some(cell.as_ref().to_string()))
                    .collect()
            })
            .collect();
        Self::new(rows)
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数（按最长行计算）
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 读取单元格；越界或缺失返回 None
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// 读取单元格文本；缺失时返回空串
    pub fn text(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).unwrap_or("")
    }

    /// 按列下标批量读取一行中的单元格
    pub fn cells_at(&self, row: usize, columns: &[usize]) -> Vec<Option<&str>> {
        columns.iter().map(|&col| self.cell(row, col)).collect()
    }
}
