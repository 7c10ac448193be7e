// ==========================================
// 产能测算系统 - 文件解析器实现
// ==========================================
// 职责: 源文件 -> RawTable（阶段 0: 文件读取与解析）
// 支持: CSV (.csv, 多编码) / Excel (.xlsx/.xls)
// ==========================================

use crate::domain::RawTable;
use crate::importer::encoding::SourceEncoding;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, warn};

/// 检查文件存在
fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    encodings: Vec<SourceEncoding>,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            encodings: SourceEncoding::FALLBACK_ORDER.to_vec(),
        }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定候选编码列表（按顺序尝试）
    pub fn with_encodings(encodings: Vec<SourceEncoding>) -> Self {
        Self { encodings }
    }

    /// 读取文件并返回表格与实际使用的编码
    pub fn parse_with_encoding(&self, file_path: &Path) -> ImportResult<(RawTable, SourceEncoding)> {
        ensure_exists(file_path)?;
        let bytes = std::fs::read(file_path)?;

        let mut last_error = String::from("未配置候选编码");
        for &encoding in &self.encodings {
            match encoding
                .decode(&bytes)
                .and_then(|text| parse_csv_text(&text).map_err(|e| e.to_string()))
            {
                Ok(table) => {
                    debug!(
                        path = %file_path.display(),
                        encoding = %encoding,
                        rows = table.row_count(),
                        "CSV 读取成功"
                    );
                    return Ok((table, encoding));
                }
                Err(e) => {
                    debug!(encoding = %encoding, error = %e, "编码尝试失败");
                    last_error = e;
                }
            }
        }

        warn!(path = %file_path.display(), error = %last_error, "所有候选编码均读取失败");
        Err(ImportError::Load {
            path: file_path.display().to_string(),
            last_error,
        })
    }
}

/// 将已解码文本解析为 RawTable（无表头，允许行长度不一致）
///
/// 空文件视为解析失败
pub fn parse_csv_text(text: &str) -> ImportResult<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // 允许行长度不一致
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|v| Some(v.to_string())).collect());
    }

    if rows.is_empty() {
        return Err(ImportError::CsvParseError("文件中没有可解析的列".to_string()));
    }

    Ok(RawTable::new(rows))
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        self.parse_with_encoding(file_path).map(|(table, _)| table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取第一个工作表，单元格统一转为文本
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if !is_excel_extension(&ext) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // Range 从首个非空单元格开始，需按起始坐标补齐，保持列下标与工作表一致
        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<Option<String>>> = vec![Vec::new(); start_row];
        for data_row in range.rows() {
            let mut row: Vec<Option<String>> = vec![None; start_col];
            row.extend(data_row.iter().map(|cell| Some(cell.to_string())));
            rows.push(row);
        }

        debug!(path = %path.display(), sheet = %sheet_name, rows = rows.len(), "Excel 读取成功");
        Ok(RawTable::new(rows))
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn is_excel_extension(ext: &str) -> bool {
    matches!(ext, "xlsx" | "xls" | "xlsm")
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
#[derive(Default)]
pub struct UniversalFileParser {
    csv: CsvParser,
}

impl UniversalFileParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_csv_parser(csv: CsvParser) -> Self {
        Self { csv }
    }
}

impl FileParser for UniversalFileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        if is_excel_extension(&extension_of(file_path)) {
            ExcelParser.parse_to_raw_table(file_path)
        } else {
            self.csv.parse_to_raw_table(file_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, ",,2024,2024").unwrap();
        writeln!(temp_file, ",,AP1,AP2").unwrap();
        writeln!(temp_file, "班次,,,").unwrap();

        let parser = CsvParser::new();
        let (table, encoding) = parser.parse_with_encoding(temp_file.path()).unwrap();

        assert_eq!(encoding, SourceEncoding::Utf8Sig);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(0, 2), Some("2024"));
        assert_eq!(table.cell(1, 3), Some("AP2"));
        assert_eq!(table.cell(2, 0), Some("班次"));
        assert_eq!(table.cell(2, 1), None);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let parser = CsvParser::new();
        let result = parser.parse_to_raw_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_flexible_rows() {
        let table = parse_csv_text("a,b,c\nd\n\ne,f\n").unwrap();
        // 空行被跳过
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(1, 0), Some("d"));
        assert_eq!(table.cell(1, 2), None);
    }

    #[test]
    fn test_empty_file_is_load_error() {
        let temp_file = NamedTempFile::new().unwrap();
        let result = CsvParser::new().parse_to_raw_table(temp_file.path());
        assert!(matches!(result, Err(ImportError::Load { .. })));
    }

    #[test]
    fn test_gbk_file_falls_back() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let (bytes, _, _) = encoding_rs::GBK.encode("班次,8\n");
        temp_file.write_all(&bytes).unwrap();

        let (table, encoding) = CsvParser::new()
            .parse_with_encoding(temp_file.path())
            .unwrap();
        assert_eq!(encoding, SourceEncoding::Gbk);
        assert_eq!(table.cell(0, 0), Some("班次"));
    }

    #[test]
    fn test_excel_parser_rejects_csv_extension() {
        let temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let result = ExcelParser.parse_to_raw_table(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
