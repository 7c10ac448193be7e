// ==========================================
// 产能测算系统 - 表格游标
// ==========================================
// 职责: 按标签定位行 + 带停止条件的向下扫描
// 说明: 行标签即约定的结构，标签行上方增删行不影响定位
// ==========================================

use crate::domain::RawTable;

/// 行标签所在列
pub const LABEL_COLUMN: usize = 0;

/// 扫描时对单行的处理决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    /// 收集该行
    Accept,
    /// 跳过该行，继续扫描
    Skip,
    /// 结束扫描（该行不收集）
    Stop,
}

/// 第 0 列文本与 label 完全相等的第一行（大小写、空白均敏感）
pub fn find_row_index(table: &RawTable, label: &str) -> Option<usize> {
    (0..table.row_count()).find(|&r| table.cell(r, LABEL_COLUMN) == Some(label))
}

// ==========================================
// RowView - 行视图
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a RawTable,
    index: usize,
}

impl<'a> RowView<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// 第 0 列文本（缺失为空串）
    pub fn label(&self) -> &'a str {
        self.table.text(self.index, LABEL_COLUMN)
    }

    pub fn text(&self, col: usize) -> &'a str {
        self.table.text(self.index, col)
    }

    pub fn cell(&self, col: usize) -> Option<&'a str> {
        self.table.cell(self.index, col)
    }

    /// 按列下标读取单元格（越界为缺失）
    pub fn cells_at(&self, columns: &[usize]) -> Vec<Option<&'a str>> {
        self.table.cells_at(self.index, columns)
    }
}

// ==========================================
// TableCursor - locate -> scan -> collect
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct TableCursor<'a> {
    table: &'a RawTable,
    row: usize,
}

impl<'a> TableCursor<'a> {
    /// 定位到标签行；标签不存在时返回 None
    pub fn locate(table: &'a RawTable, label: &str) -> Option<Self> {
        find_row_index(table, label).map(|row| Self { table, row })
    }

    /// 当前所在行
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn current(&self) -> RowView<'a> {
        RowView {
            table: self.table,
            index: self.row,
        }
    }

    /// 向下移动 n 行
    pub fn advance(self, n: usize) -> Self {
        Self {
            table: self.table,
            row: self.row + n,
        }
    }

    /// 从当前行（含）开始向下扫描到表尾或 Stop
    pub fn scan<F>(&self, mut decide: F) -> Vec<RowView<'a>>
    where
        F: FnMut(&RowView<'a>) -> ScanControl,
    {
        let mut collected = Vec::new();
        for index in self.row..self.table.row_count() {
            let view = RowView {
                table: self.table,
                index,
            };
            match decide(&view) {
                ScanControl::Accept => collected.push(view),
                ScanControl::Skip => continue,
                ScanControl::Stop => break,
            }
        }
        collected
    }
}
