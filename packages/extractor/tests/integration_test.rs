//! End-to-end integration tests for the extraction pipeline.
//!
//! Runs the extractor on fixture documents shaped like ERKNM exports.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use erknm_extractor::{
    extract_archive, extract_file, get_parser, AttributeMap, ErrorKind, Section,
};

/// Path of a fixture file.
fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Build a zip archive from fixture files and literal entries.
fn write_zip(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let mut writer = ZipWriter::new(File::create(path).expect("create zip"));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(content).expect("write entry");
    }
    writer.finish().expect("finish zip");
}

#[test]
fn test_full_document_sections() {
    let result = extract_file(&fixture("knm/full.xml"), "knm").expect("extract full.xml");

    assert_eq!(
        result.iter().map(|(name, _)| name).collect::<Vec<_>>(),
        vec![
            "decision",
            "inspectors",
            "kind_control",
            "kind_knm",
            "knm_date",
            "objects",
            "organizations",
            "places",
            "reason_risk",
        ]
    );

    assert_eq!(
        result.get("knm_date"),
        Some(&Section::Attributes(attrs(&[
            ("DATE_END", "2024-02-16"),
            ("DATE_START", "2024-02-12"),
            ("ERKNM_ID", "77240061000207612345"),
        ])))
    );
    assert_eq!(
        result.get("places").and_then(Section::as_text),
        Some("г. Москва, ул. Тверская, д. 1")
    );
    assert_eq!(
        result.get("decision"),
        Some(&Section::Attributes(attrs(&[
            ("signer", "Кузнецов Алексей Викторович"),
            ("title", "Начальник управления надзорной деятельности"),
        ])))
    );
    assert_eq!(result.get("reason_risk"), Some(&Section::empty()));
}

#[test]
fn test_full_document_inspectors_in_order() {
    let result = extract_file(&fixture("knm/full.xml"), "knm").expect("extract full.xml");
    let inspectors = result
        .get("inspectors")
        .and_then(Section::as_list)
        .expect("inspectors list");

    let names: Vec<_> = inspectors
        .iter()
        .map(|i| i["full_name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Иванов Иван Иванович",
            "Петров Пётр Петрович",
            "Сидорова Анна Сергеевна",
        ]
    );
    assert_eq!(inspectors[1]["position"], "Государственный инспектор");
    assert_eq!(inspectors[2]["position"], "");
}

#[test]
fn test_full_document_organizations_and_objects() {
    let result = extract_file(&fixture("knm/full.xml"), "knm").expect("extract full.xml");

    let orgs = result
        .get("organizations")
        .and_then(Section::as_nested)
        .expect("organizations");
    assert_eq!(
        orgs["okveds"],
        Section::Attributes(attrs(&[
            ("CODE", "47.11"),
            ("NAME", "Торговля розничная преимущественно пищевыми продуктами"),
        ]))
    );

    let objects = result.get("objects").and_then(Section::as_nested).expect("objects");
    assert_eq!(
        objects["object_sub_kind"],
        Section::Attributes(attrs(&[("ID", "124"), ("NAME", "Продовольственные магазины")]))
    );
}

#[test]
fn test_minimal_document_only_dates_populated() {
    let result = extract_file(&fixture("knm/minimal.xml"), "knm").expect("extract minimal.xml");

    assert_eq!(result.populated().collect::<Vec<_>>(), vec!["knm_date"]);
    assert_eq!(
        result.get("knm_date"),
        Some(&Section::Attributes(attrs(&[
            ("DATE_END", "2024-01-05"),
            ("DATE_START", "2024-01-01"),
        ])))
    );
}

#[test]
fn test_missing_objects_degrades_to_empty() {
    let result = extract_file(&fixture("knm/no_objects.xml"), "knm").expect("extract");

    let objects = result.get("objects").and_then(Section::as_nested).expect("objects");
    assert_eq!(objects.len(), 4);
    assert!(objects.values().all(Section::is_empty));

    let inspectors = result.get("inspectors").and_then(Section::as_list).expect("list");
    assert_eq!(inspectors.len(), 1);
    assert_eq!(inspectors[0]["guid"], "guid-orlov");
}

#[test]
fn test_idempotent_extraction() {
    let path = fixture("knm/full.xml");
    let first = extract_file(&path, "knm").expect("first");
    let second = extract_file(&path, "knm").expect("second");
    assert_eq!(first, second);
}

#[test]
fn test_preventive_visit_is_empty() {
    let result = extract_file(&fixture("pv/visit.xml"), "pv").expect("extract visit.xml");
    assert!(result.is_empty());
}

#[test]
fn test_malformed_document_is_format_error() {
    let err = extract_file(&fixture("knm/malformed.xml"), "knm").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains("malformed.xml"));
}

#[test]
fn test_windows_1251_document_matches_utf8() {
    let utf8 = fs::read_to_string(fixture("knm/full.xml")).expect("read full.xml");
    let declared = utf8.replacen(r#"encoding="UTF-8""#, r#"encoding="windows-1251""#, 1);
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1251.encode(&declared);
    assert!(!had_errors);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cp1251.xml");
    fs::write(&path, &bytes).expect("write cp1251.xml");

    let decoded = extract_file(&path, "knm").expect("extract cp1251.xml");
    let expected = extract_file(&fixture("knm/full.xml"), "knm").expect("extract full.xml");
    assert_eq!(decoded, expected);
    assert!(decoded
        .get("places")
        .and_then(Section::as_text)
        .is_some_and(|places| places.contains("Москва")));
}

#[test]
fn test_document_with_doctype() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("doctype.xml");
    fs::write(
        &path,
        r#"<?xml version="1.0"?><!DOCTYPE KNM><KNM xmlns="urn:k" DATE_START="2024-01-01"/>"#,
    )
    .expect("write doctype.xml");

    let result = extract_file(&path, "knm").expect("extract doctype.xml");
    assert_eq!(
        result.get("knm_date"),
        Some(&Section::Attributes(attrs(&[("DATE_START", "2024-01-01")])))
    );
}

#[test]
fn test_unknown_kind() {
    assert_eq!(
        get_parser("unknown").err().map(|e| e.kind()),
        Some(ErrorKind::UnknownKind)
    );
}

#[test]
fn test_archive_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let zip_path = dir.path().join("erknm.zip");
    let full = fs::read(fixture("knm/full.xml")).expect("read full.xml");
    let minimal = fs::read(fixture("knm/minimal.xml")).expect("read minimal.xml");
    write_zip(
        &zip_path,
        &[
            ("a.xml", full),
            ("b.XML", minimal),
            ("c.txt", b"not a document".to_vec()),
        ],
    );

    let dest = dir.path().join("data");
    let results = extract_archive(&zip_path, &dest, "knm").expect("extract archive");

    let paths: Vec<_> = results.iter().map(|(path, _)| path.clone()).collect();
    assert_eq!(paths, vec![dest.join("a.xml"), dest.join("b.XML")]);
    assert_eq!(
        results[1].1.populated().collect::<Vec<_>>(),
        vec!["knm_date"]
    );
}

#[test]
fn test_archive_with_malformed_entry_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let zip_path = dir.path().join("erknm.zip");
    let malformed = fs::read(fixture("knm/malformed.xml")).expect("read malformed.xml");
    write_zip(&zip_path, &[("bad.xml", malformed)]);

    let err = extract_archive(&zip_path, &dir.path().join("data"), "knm").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}
