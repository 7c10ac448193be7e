// ==========================================
// 产能测算系统 - 导入层
// ==========================================
// 职责: 源文件 -> 原始表格 -> 月份列 / 班次区块 / 参数行
// 支持: CSV（多编码）, Excel
// ==========================================

// 模块声明
pub mod capacity_importer;
pub mod cursor;
pub mod data_cleaner;
pub mod encoding;
pub mod error;
pub mod file_parser;
pub mod header;
pub mod importer_trait;
pub mod labels;
pub mod row_extractor;
pub mod shift_extractor;

// 重导出核心类型
pub use capacity_importer::{
    extract_capacity, load_capacity_from_file, CapacityImport, CapacityImporterImpl,
};
pub use cursor::{find_row_index, RowView, ScanControl, TableCursor};
pub use data_cleaner::DataCleaner;
pub use encoding::SourceEncoding;
pub use error::{ImportError, ImportResult};
pub use file_parser::{parse_csv_text, CsvParser, ExcelParser, UniversalFileParser};
pub use header::{compose_month_columns, MONTH_START_COLUMN};
pub use row_extractor::extract_row_series;
pub use shift_extractor::{ShiftExtractor, ShiftHoursRow};

// 重导出 Trait 接口
pub use importer_trait::{CapacityImporter, FileParser};
