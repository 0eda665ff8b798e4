//! 圧縮データの形式
//!
//! zlib の `windowBits` の慣習に従い、ウィンドウサイズの符号と加算値で形式を表す。
//!
//! | 形式 | windowBits |
//! |------|-----------|
//! | raw DEFLATE | `-15` |
//! | zlib | `15` |
//! | gzip | `15 + 16` |

use core::fmt;

/// 既定のウィンドウサイズ (32KB)
pub const DEFAULT_WINDOW_BITS: u8 = 15;

/// ウィンドウサイズの下限
pub const MIN_WINDOW_BITS: u8 = 9;

/// ウィンドウサイズの上限
pub const MAX_WINDOW_BITS: u8 = 15;

/// gzip ヘッダーを示すために windowBits に加算する値
pub(crate) const GZIP_WINDOW_OFFSET: i32 = 16;

/// 圧縮データの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// ヘッダーなしの DEFLATE (RFC 1951)
    Deflate,
    /// zlib ヘッダー付き DEFLATE (RFC 1950)
    Zlib,
    /// gzip ヘッダー付き DEFLATE (RFC 1952)
    Gzip,
}

impl Format {
    /// 指定したウィンドウサイズでの windowBits
    ///
    /// 展開器はこの値から raw / zlib / gzip のどれで初期化するかを決める。
    pub fn window_bits_for(&self, bits: u8) -> i32 {
        let bits = i32::from(bits);
        match self {
            Format::Deflate => -bits,
            Format::Zlib => bits,
            Format::Gzip => bits + GZIP_WINDOW_OFFSET,
        }
    }

    /// 形式名
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Deflate => "deflate-raw",
            Format::Zlib => "zlib",
            Format::Gzip => "gzip",
        }
    }

    /// Content-Encoding のトークンから形式を決定する
    ///
    /// HTTP の `deflate` は zlib 形式 (RFC 9110 Section 8.4.1.2)。
    /// `identity` や未知のトークンは `None`。
    pub fn from_content_coding(token: &str) -> Option<Format> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("gzip") || token.eq_ignore_ascii_case("x-gzip") {
            Some(Format::Gzip)
        } else if token.eq_ignore_ascii_case("deflate") {
            Some(Format::Zlib)
        } else {
            None
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
