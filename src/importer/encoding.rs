// ==========================================
// 产能测算系统 - 源文件编码
// ==========================================
// 职责: 按固定顺序尝试多种编码解码源文件字节
// 背景: 源文件来自不同地区的表格工具，编码不统一
// ==========================================

use encoding_rs::{GB18030, GBK, WINDOWS_1252};
use std::fmt;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// ==========================================
// SourceEncoding - 候选编码
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceEncoding {
    Utf8Sig, // UTF-8，去除 BOM
    Utf8,
    Gbk,
    Cp936, // GBK 超集（按 GB18030 解码）
    Latin1, // 单字节，任何输入均可解码
}

impl SourceEncoding {
    /// 默认尝试顺序
    pub const FALLBACK_ORDER: [SourceEncoding; 5] = [
        SourceEncoding::Utf8Sig,
        SourceEncoding::Utf8,
        SourceEncoding::Gbk,
        SourceEncoding::Cp936,
        SourceEncoding::Latin1,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8Sig => "utf-8-sig",
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Gbk => "gbk",
            SourceEncoding::Cp936 => "cp936",
            SourceEncoding::Latin1 => "latin1",
        }
    }

    /// 解码字节；出现非法字节序列时返回错误描述
    pub fn decode(&self, bytes: &[u8]) -> Result<String, String> {
        match self {
            SourceEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body)
                    .map(str::to_string)
                    .map_err(|e| format!("'{}' 解码失败: {}", self.name(), e))
            }
            SourceEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|e| format!("'{}' 解码失败: {}", self.name(), e)),
            SourceEncoding::Gbk => GBK
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
                .ok_or_else(|| format!("'{}' 解码失败: 存在非法字节序列", self.name())),
            SourceEncoding::Cp936 => GB18030
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
                .ok_or_else(|| format!("'{}' 解码失败: 存在非法字节序列", self.name())),
            SourceEncoding::Latin1 => {
                let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
                Ok(text.into_owned())
            }
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_sig_strips_bom() {
        let bytes = [UTF8_BOM, "班次,8".as_bytes()].concat();
        assert_eq!(SourceEncoding::Utf8Sig.decode(&bytes).unwrap(), "班次,8");
        // 普通 utf-8 保留 BOM
        assert!(SourceEncoding::Utf8.decode(&bytes).unwrap().starts_with('\u{feff}'));
    }

    #[test]
    fn test_gbk_decodes_chinese() {
        let (bytes, _, _) = GBK.encode("每班次工作资源能力数量");
        assert!(SourceEncoding::Utf8Sig.decode(&bytes).is_err());
        assert_eq!(
            SourceEncoding::Gbk.decode(&bytes).unwrap(),
            "每班次工作资源能力数量"
        );
    }

    #[test]
    fn test_latin1_never_fails() {
        let bytes = [0xFFu8, 0xFE, 0x80, 0x41];
        assert!(SourceEncoding::Utf8.decode(&bytes).is_err());
        assert!(SourceEncoding::Latin1.decode(&bytes).is_ok());
    }
}
