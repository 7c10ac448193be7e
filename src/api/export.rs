// ==========================================
// 产能测算系统 - CSV 导出
// ==========================================
// 编码: UTF-8 带 BOM（Excel 直接打开不乱码）
// 文件名: {前缀}_{资源能力组}_{YYYYmmdd_HHMMSS}.csv
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::DataTable;
use chrono::NaiveDateTime;
use std::io::Write;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 导出表格为 CSV：表头一行，之后每月一行
pub fn export_csv<W: Write>(table: &DataTable, mut writer: W) -> ApiResult<()> {
    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&table.columns)?;
    for row in &table.rows {
        csv_writer.write_record(row.iter().map(|cell| cell.to_csv_field()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 导出文件名
pub fn export_file_name(prefix: &str, group: &str, now: NaiveDateTime) -> String {
    format!("{}_{}_{}.csv", prefix, group, now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;
    use chrono::NaiveDate;

    #[test]
    fn test_export_writes_bom_and_rows() {
        let table = DataTable {
            columns: vec!["日期".to_string(), "有效产能（小时）".to_string()],
            rows: vec![
                vec![CellValue::Text("2024_AP1".into()), CellValue::Number(299.2)],
                vec![CellValue::Text("2024_AP2".into()), CellValue::Empty],
            ],
        };
        let mut buf = Vec::new();
        export_csv(&table, &mut buf).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "日期,有效产能（小时）\n2024_AP1,299.2\n2024_AP2,\n");
    }

    #[test]
    fn test_export_file_name() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(8, 9, 10)
            .unwrap();
        assert_eq!(
            export_file_name("产能数据", "钳工组", now),
            "产能数据_钳工组_20240305_080910.csv"
        );
    }
}
