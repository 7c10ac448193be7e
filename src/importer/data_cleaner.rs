// ==========================================
// 产能测算系统 - 数据清洗器（数值转换）
// ==========================================
// 职责: 单元格文本 -> 数值，所有提取器共用同一规则
// 规则: 空 / 缺失 / 非数值 -> NaN；仅班次工时在此基础上再归零
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// NULL 标准化（去空白后为空视为缺失）
    pub fn normalize_null<'a>(&self, value: Option<&'a str>) -> Option<&'a str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// 单个单元格转数值，失败返回 NaN
    pub fn coerce_numeric(&self, value: Option<&str>) -> f64 {
        self.normalize_null(value)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(f64::NAN)
    }

    /// 一组单元格转数值序列
    pub fn coerce_series(&self, values: &[Option<&str>]) -> Vec<f64> {
        values.iter().map(|v| self.coerce_numeric(*v)).collect()
    }

    /// 班次工时：无法解析时取 0，避免 NaN 向下游传播
    pub fn coerce_hours(&self, value: Option<&str>) -> f64 {
        let hours = self.coerce_numeric(value);
        if hours.is_nan() {
            0.0
        } else {
            hours
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numeric() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_numeric(Some("22")), 22.0);
        assert_eq!(cleaner.coerce_numeric(Some(" 0.85 ")), 0.85);
        assert_eq!(cleaner.coerce_numeric(Some("1e2")), 100.0);
        assert!(cleaner.coerce_numeric(Some("")).is_nan());
        assert!(cleaner.coerce_numeric(Some("  ")).is_nan());
        assert!(cleaner.coerce_numeric(Some("85%")).is_nan());
        assert!(cleaner.coerce_numeric(Some("1,200")).is_nan());
        assert!(cleaner.coerce_numeric(None).is_nan());
    }

    #[test]
    fn test_coerce_series_keeps_alignment() {
        let cleaner = DataCleaner;
        let series = cleaner.coerce_series(&[Some("2"), None, Some("x"), Some("3.5")]);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0], 2.0);
        assert!(series[1].is_nan());
        assert!(series[2].is_nan());
        assert_eq!(series[3], 3.5);
    }

    #[test]
    fn test_coerce_hours_never_nan() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_hours(Some("8")), 8.0);
        assert_eq!(cleaner.coerce_hours(Some("八小时")), 0.0);
        assert_eq!(cleaner.coerce_hours(None), 0.0);
        assert_eq!(cleaner.coerce_hours(Some("NaN")), 0.0);
    }
}
