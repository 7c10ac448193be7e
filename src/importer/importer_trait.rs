// ==========================================
// 产能测算系统 - 导入 Trait
// ==========================================
// 职责: 定义文件解析与产能导入接口（不包含实现）
// ==========================================

use crate::domain::RawTable;
use crate::importer::capacity_importer::CapacityImport;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始文本表格
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawTable): 全部单元格保持文本，不做数值推断
    /// - Err(FileNotFound): 路径不存在
    /// - Err(Load): 所有候选编码均解析失败
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// CapacityImporter Trait
// ==========================================
// 用途: 产能导入主接口
// 实现者: CapacityImporterImpl
pub trait CapacityImporter: Send + Sync {
    /// 从源文件计算产能指标
    ///
    /// # 导入流程
    /// 1. 多编码读取原始表格
    /// 2. 组合两行表头得到月份列
    /// 3. 提取班次资源数量 / 班次工时与天数
    /// 4. 提取单行参数（基础产能覆写、合格率、生产效率、产能裕度、需求）
    /// 5. 计算十一条指标序列
    ///
    /// 每次调用都重新读取源文件，不做缓存
    fn import_from_file(&self, file_path: &Path) -> ImportResult<CapacityImport>;
}
