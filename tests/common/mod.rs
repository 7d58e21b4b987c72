//! Shared test fixtures for the price list integration tests.
//!
//! Provides a small sample envelope (three singles, one of them foil) and
//! helpers that write it to a temporary directory, plain or gzipped.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;

pub const CREATED_AT: &str = "2024-01-15 10:30:00";

/// Sample envelope with products in a deliberately non-sorted order.
pub fn sample_json() -> String {
    serde_json::json!({
        "meta": {
            "created_at": CREATED_AT,
            "base_url": "https://www.cardkingdom.com/"
        },
        "data": [
            {
                "id": 231557,
                "sku": "A25-141",
                "scryfall_id": "e3285e6b-3e79-4d7c-bf96-d920f973b122",
                "url": "mtg/masters-25/lightning-bolt",
                "name": "Lightning Bolt",
                "variation": "",
                "edition": "Masters 25",
                "is_foil": "false",
                "price_retail": "2.99",
                "qty_retail": 12,
                "price_buy": "1.20",
                "qty_buying": 40,
                "condition_values": {
                    "nm_price": "2.99", "nm_qty": 5,
                    "ex_price": "2.39", "ex_qty": 4,
                    "vg_price": "1.79", "vg_qty": 2,
                    "g_price": "1.20", "g_qty": 1
                }
            },
            {
                "id": 10001,
                "sku": "FA25-050",
                "scryfall_id": "0b9d9b3a-2a43-46a4-9d0e-1c7c3c4a5a6b",
                "url": "mtg/masters-25-foil/counterspell",
                "name": "Counterspell",
                "variation": "",
                "edition": "Masters 25",
                "is_foil": "true",
                "price_retail": "12.50",
                "qty_retail": 1,
                "price_buy": "6.00",
                "qty_buying": 8,
                "condition_values": {
                    "nm_price": "12.50", "nm_qty": 1,
                    "ex_price": "10.00", "ex_qty": 0,
                    "vg_price": "7.50", "vg_qty": 0,
                    "g_price": "5.00", "g_qty": 0
                }
            },
            {
                "id": 99,
                "sku": "LEA-232",
                "scryfall_id": "bd8fa327-dd41-4737-8f19-2cf5eb1f7cdd",
                "url": "mtg/alpha/black-lotus",
                "name": "Black Lotus",
                "variation": "Artist Proof",
                "edition": "Alpha",
                "is_foil": "false",
                "price_retail": "0.00",
                "qty_retail": 0,
                "price_buy": "25000.00",
                "qty_buying": 2,
                "condition_values": {
                    "nm_price": "0.00", "nm_qty": 0,
                    "ex_price": "0.00", "ex_qty": 0,
                    "vg_price": "0.00", "vg_qty": 0,
                    "g_price": "0.00", "g_qty": 0
                }
            }
        ]
    })
    .to_string()
}

/// Write `contents` to `name` inside a fresh temporary directory.
///
/// Returns `(path, TempDir)`; keep the `TempDir` alive for the duration of
/// the test.
pub fn write_fixture(name: &str, contents: &str) -> (PathBuf, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (path, dir)
}

/// Like [`write_fixture`], gzip-compressed.
pub fn write_gz_fixture(name: &str, contents: &str) -> (PathBuf, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
    (path, dir)
}

/// Replace the first occurrence of `field`'s string value in the sample.
pub fn sample_with(field: &str, from: &str, to: &str) -> String {
    let needle = format!(r#""{field}":"{from}""#);
    let replacement = format!(r#""{field}":"{to}""#);
    let json = sample_json();
    assert!(json.contains(&needle), "sample has no {needle}");
    json.replacen(&needle, &replacement, 1)
}
