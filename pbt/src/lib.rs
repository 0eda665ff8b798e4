//! PBT テスト共通ユーティリティ

use std::io::Write;

use flate2::Compression;
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use proptest::prelude::*;

// ========================================
// 展開対象データ生成
// ========================================

/// 任意のバイト列 (ほぼ圧縮できない)
pub fn random_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..4096)
}

/// 繰り返しの多いテキスト (高圧縮率、出力バッファの拡張が何度も起きる)
pub fn repetitive_text() -> impl Strategy<Value = Vec<u8>> {
    ("[a-z ]{1,16}", 1usize..4096).prop_map(|(unit, count)| unit.repeat(count).into_bytes())
}

/// 展開対象データ
pub fn payload() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![random_bytes(), repetitive_text()]
}

/// 圧縮レベル (0-9)
pub fn level() -> impl Strategy<Value = u32> {
    0u32..=9
}

// ========================================
// 独立した圧縮器
// ========================================

/// ヘッダーなしの DEFLATE で圧縮
pub fn deflate(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).expect("write to Vec never fails");
    encoder.finish().expect("write to Vec never fails")
}

/// zlib 形式で圧縮
pub fn zlib(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).expect("write to Vec never fails");
    encoder.finish().expect("write to Vec never fails")
}

/// gzip 形式で圧縮
pub fn gzip(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).expect("write to Vec never fails");
    encoder.finish().expect("write to Vec never fails")
}
