// ==========================================
// 源文件读取 集成测试
// ==========================================
// 测试目标: 多编码回退、文件不存在、读取失败、表头错误
// ==========================================

mod test_helpers;

use capacity_model::domain::MetricKind;
use capacity_model::importer::{
    load_capacity_from_file, CapacityImporter, CapacityImporterImpl, CsvParser, ImportError,
    SourceEncoding, UniversalFileParser,
};
use capacity_model::logging;
use test_helpers::{
    assert_series_approx, write_bytes, write_csv, write_csv_gbk, write_csv_with_bom,
    SCENARIO_CSV, WORKSHOP_CSV,
};

#[test]
fn test_utf8_bom_file() {
    logging::init_test();
    let file = write_csv_with_bom(SCENARIO_CSV).unwrap();
    let (table, encoding) = CsvParser::new().parse_with_encoding(file.path()).unwrap();
    assert_eq!(encoding, SourceEncoding::Utf8Sig);
    // BOM 不应残留在第一个单元格中
    assert_eq!(table.cell(0, 0), None);

    let series = load_capacity_from_file(file.path()).unwrap().series;
    assert_series_approx(&series.base_capacity, &[352.0, 320.0]);
}

#[test]
fn test_gbk_file_falls_back() {
    logging::init_test();
    let file = write_csv_gbk(WORKSHOP_CSV).unwrap();
    let (table, encoding) = CsvParser::new().parse_with_encoding(file.path()).unwrap();
    assert_eq!(encoding, SourceEncoding::Gbk);
    assert_eq!(table.text(2, 0), "每班次工作资源能力数量");

    let gbk = load_capacity_from_file(file.path()).unwrap().series;
    let utf8_file = write_csv(WORKSHOP_CSV).unwrap();
    let utf8 = load_capacity_from_file(utf8_file.path()).unwrap().series;
    assert_eq!(gbk.labels(), utf8.labels());
    for kind in MetricKind::ALL {
        let a: Vec<u64> = gbk.series(kind).iter().map(|v| v.to_bits()).collect();
        let b: Vec<u64> = utf8.series(kind).iter().map(|v| v.to_bits()).collect();
        assert_eq!(a, b, "{} 不一致", kind);
    }
}

#[test]
fn test_missing_file_is_not_found() {
    let result = load_capacity_from_file("/definitely/not/here/钳工组.csv");
    match result {
        Err(ImportError::FileNotFound(path)) => assert!(path.ends_with("钳工组.csv")),
        other => panic!("应为 FileNotFound，实际: {:?}", other.map(|i| i.series.len())),
    }
}

#[test]
fn test_empty_file_fails_every_encoding() {
    let file = write_bytes(b"", ".csv").unwrap();
    let result = load_capacity_from_file(file.path());
    assert!(matches!(result, Err(ImportError::Load { .. })));
}

#[test]
fn test_undecodable_bytes_with_restricted_encodings() {
    // 0xFF 在 UTF-8 和 GBK 中都不是合法首字节
    let file = write_bytes(&[0xFF, 0xFE, 0xFF, b',', b'\n'], ".csv").unwrap();
    let parser = CsvParser::with_encodings(vec![
        SourceEncoding::Utf8Sig,
        SourceEncoding::Utf8,
        SourceEncoding::Gbk,
    ]);
    let importer =
        CapacityImporterImpl::with_parser(Box::new(UniversalFileParser::with_csv_parser(parser)));

    match importer.import_from_file(file.path()) {
        Err(ImportError::Load { last_error, .. }) => assert!(last_error.contains("gbk")),
        other => panic!("应为 Load 错误，实际: {:?}", other.map(|i| i.series.len())),
    }
}

#[test]
fn test_latin1_decodes_anything() {
    let file = write_bytes(&[0xFF, 0xFE, 0xFF, b',', b'\n'], ".csv").unwrap();
    let (_, encoding) = CsvParser::new().parse_with_encoding(file.path()).unwrap();
    assert_eq!(encoding, SourceEncoding::Latin1);
}

#[test]
fn test_header_without_month_columns() {
    let file = write_csv("资源能力组,钳工组\n,\n每班次工作资源能力数量,一班\n").unwrap();
    assert!(matches!(
        load_capacity_from_file(file.path()),
        Err(ImportError::HeaderParse(_))
    ));
}

#[test]
fn test_single_row_file_is_header_error() {
    let file = write_csv(",,2024,2024\n").unwrap();
    assert!(matches!(
        load_capacity_from_file(file.path()),
        Err(ImportError::HeaderParse(_))
    ));
}

#[test]
fn test_year_less_header_keeps_suffix() {
    let file = write_csv(",,,\n,,一月,二月\n基础产能（小时）,,10,20\n").unwrap();
    let series = load_capacity_from_file(file.path()).unwrap().series;
    assert_eq!(series.labels(), vec!["一月", "二月"]);
    assert_series_approx(&series.base_capacity, &[10.0, 20.0]);
}
