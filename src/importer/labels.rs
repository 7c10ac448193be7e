// ==========================================
// 产能测算系统 - 源表格行标签
// ==========================================
// 第 0 列中约定的区块/行名称，按文本精确匹配
// ==========================================

// ===== 区块锚点 =====
pub const SHIFT_RESOURCE_ANCHOR: &str = "每班次工作资源能力数量";
pub const SHIFT_HOURS_ANCHOR: &str = "班次";

/// 脚注行前缀
pub const FOOTNOTE_MARKER: &str = "注：";

// ===== 单行参数 =====
pub const BASE_CAPACITY_ROW: &str = "基础产能（小时）";
pub const YIELD_RATE_ROW: &str = "合格率";
pub const EFFICIENCY_ROW: &str = "生产效率";
pub const MARGIN_ROW: &str = "产能裕度";
pub const DEMAND_ROW: &str = "基本需求（小时）";
pub const OVERTIME_ROW: &str = "加班";
pub const PEAK_CAPACITY_ROW: &str = "峰值产能";

/// 资源数量区块的结束标签
pub const SHIFT_RESOURCE_STOP_LABELS: [&str; 4] = [
    SHIFT_HOURS_ANCHOR,
    BASE_CAPACITY_ROW,
    YIELD_RATE_ROW,
    EFFICIENCY_ROW,
];

/// 工时/天数区块的结束标签
pub const SHIFT_HOURS_STOP_LABELS: [&str; 6] = [
    OVERTIME_ROW,
    BASE_CAPACITY_ROW,
    YIELD_RATE_ROW,
    EFFICIENCY_ROW,
    MARGIN_ROW,
    PEAK_CAPACITY_ROW,
];
