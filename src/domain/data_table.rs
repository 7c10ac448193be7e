// ==========================================
// 产能测算系统 - 通用数据表格
// ==========================================
// 职责: 对外交付的表格形态（每月一行，每个指标一列）
// 用途: 驾驶舱展示 / 用户自定义变换 / 预测服务请求体
// ==========================================

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// NaN 视为空值
    pub fn from_number(value: f64) -> Self {
        if value.is_nan() {
            CellValue::Empty
        } else {
            CellValue::Number(value)
        }
    }

    /// 数值视图；文本尝试解析，失败或为空时返回 NaN
    pub fn as_f64(&self) -> f64 {
        match self {
            CellValue::Number(v) => *v,
            CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            CellValue::Empty => f64::NAN,
        }
    }

    /// JSON 表示：JSON 没有 NaN/Infinity，非有限数一律输出 null
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Number(v) => Number::from_f64(*v).map(Value::Number).unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Empty => Value::Null,
        }
    }

    /// CSV 导出文本
    pub fn to_csv_field(&self) -> String {
        match self {
            CellValue::Number(v) => v.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// ==========================================
// DataTable - 列名 + 行
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 按列名取整列数值
    pub fn numbers(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(CellValue::as_f64).unwrap_or(f64::NAN))
                .collect(),
        )
    }

    /// 追加一列；已存在同名列时覆盖该列
    ///
    /// values 长度不足时以空值补齐；行短于目标列时先补齐空单元格
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) {
        let mut values = values.into_iter();
        match self.column_index(name) {
            Some(idx) => {
                for row in self.rows.iter_mut() {
                    if row.len() <= idx {
                        row.resize(idx + 1, CellValue::Empty);
                    }
                    if let Some(cell) = row.get_mut(idx) {
                        *cell = values.next().unwrap_or(CellValue::Empty);
                    }
                }
            }
            None => {
                let idx = self.columns.len();
                self.columns.push(name.to_string());
                for row in self.rows.iter_mut() {
                    if row.len() < idx {
                        row.resize(idx, CellValue::Empty);
                    }
                    row.push(values.next().unwrap_or(CellValue::Empty));
                }
            }
        }
    }

    /// 每行单元格数都等于列数
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.columns.len())
    }

    /// 转换为逐行记录（列名 -> 值），保持列顺序
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row.iter())
                    .map(|(col, cell)| (col.clone(), cell.to_json()))
                    .collect()
            })
            .collect()
    }
}
