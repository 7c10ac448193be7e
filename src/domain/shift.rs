// ==========================================
// 产能测算系统 - 班次数据模型
// ==========================================
// 职责: 汇总两个独立区块（资源数量 / 工时与天数）的班次数据
// 规则: 按班次名取并集，某一区块缺失的部分各自独立按 0 处理
// ==========================================

use std::collections::BTreeMap;

/// 资源数量区块识别的班次名
pub const SHIFT_NAMES: [&str; 4] = ["一班", "二班", "三班", "四班"];

// ==========================================
// ShiftRecord - 单个班次
// ==========================================
// 三个字段互不依赖，任一缺失均不影响其余字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftRecord {
    /// 每月资源数量（可含 NaN）
    pub resource: Option<Vec<f64>>,
    /// 班次工作时长（小时，已归零处理，不含 NaN）
    pub hours: Option<f64>,
    /// 每月工作天数（可含 NaN）
    pub days: Option<Vec<f64>>,
}

impl ShiftRecord {
    /// 三项是否齐全
    pub fn is_complete(&self) -> bool {
        self.resource.is_some() && self.hours.is_some() && self.days.is_some()
    }

    /// 该班次对基础产能的逐月贡献: 资源 × 工时 × 天数
    ///
    /// 资源/天数中的 NaN 与缺失月份按 0 计；工时缺失按 0 计
    pub fn contribution(&self, month_count: usize) -> Vec<f64> {
        let hours = self.hours.unwrap_or(0.0);
        (0..month_count)
            .map(|m| {
                let resource = value_or_zero(self.resource.as_deref(), m);
                let days = value_or_zero(self.days.as_deref(), m);
                resource * hours * days
            })
            .collect()
    }
}

fn value_or_zero(series: Option<&[f64]>, idx: usize) -> f64 {
    match series.and_then(|s| s.get(idx)) {
        Some(v) if !v.is_nan() => *v,
        _ => 0.0,
    }
}

// ==========================================
// ShiftBlock - 班次名 -> 班次数据
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftBlock {
    shifts: BTreeMap<String, ShiftRecord>,
}

impl ShiftBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录资源数量序列（同名班次重复出现时以后者为准）
    pub fn set_resource(&mut self, shift: &str, resource: Vec<f64>) {
        self.shifts.entry(shift.to_string()).or_default().resource = Some(resource);
    }

    /// 记录工时与天数
    pub fn set_hours_and_days(&mut self, shift: &str, hours: f64, days: Vec<f64>) {
        let record = self.shifts.entry(shift.to_string()).or_default();
        record.hours = Some(hours);
        record.days = Some(days);
    }

    pub fn get(&self, shift: &str) -> Option<&ShiftRecord> {
        self.shifts.get(shift)
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShiftRecord)> {
        self.shifts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 只出现在一个区块中的班次（名称拼写不一致时会落入此列表）
    pub fn incomplete_shifts(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, r)| !r.is_complete())
            .map(|(name, _)| name)
            .collect()
    }

    /// 所有班次贡献之和
    pub fn total_capacity(&self, month_count: usize) -> Vec<f64> {
        let mut total = vec![0.0; month_count];
        for record in self.shifts.values() {
            for (acc, v) in total.iter_mut().zip(record.contribution(month_count)) {
                *acc += v;
            }
        }
        total
    }
}
