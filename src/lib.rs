//! # shiguredo_inflate
//!
//! DEFLATE / zlib / gzip ストリームの展開ライブラリ (Sans I/O)
//!
//! ## 特徴
//!
//! - **Sans I/O**: I/O を完全に分離した設計、バイトバッファを受け取ってバイトバッファに書き込む
//! - **伸長する出力バッファ**: 出力バッファの容量は 0 から始められ、必要に応じて伸ばす
//! - **明示的な状態**: 展開器の 1 ステップの結果は `CompressionStatus` で返る
//!
//! ## 使い方
//!
//! ### 一括展開
//!
//! ```rust
//! use shiguredo_inflate::ZlibDecompression;
//!
//! let decompression = ZlibDecompression::new();
//! let compressed = [0x4b, 0x4c, 0x4a, 0x06, 0x00];
//! let decompressed = decompression.decompress_deflate_bytes(&compressed).unwrap();
//! assert_eq!(decompressed, b"abc");
//! ```
//!
//! ### バッファを使った展開
//!
//! ```rust
//! use shiguredo_inflate::{ByteBuffer, ZlibDecompression};
//!
//! let decompression = ZlibDecompression::new();
//! let mut input = ByteBuffer::from(&[0x78, 0x9c, 0xcb, 0x48, 0xcd, 0xc9, 0xc9, 0x07, 0x00, 0x06, 0x2c, 0x02, 0x15][..]);
//! let mut output = ByteBuffer::with_capacity(0);
//! decompression.decompress_zlib(&mut input, &mut output).unwrap();
//! assert_eq!(output.readable_bytes(), b"hello");
//! ```

mod buffer;
pub mod compression;
mod decompression;
mod error;
mod format;
mod inflate;
mod limits;

pub use buffer::ByteBuffer;
pub use compression::{CompressionStatus, Decompressor};
pub use decompression::{FeedStatus, InflateStream, ZlibDecompression};
pub use error::{DecompressionError, UNKNOWN_MESSAGE, status};
pub use format::{DEFAULT_WINDOW_BITS, Format, MAX_WINDOW_BITS, MIN_WINDOW_BITS};
pub use inflate::{InflateSummary, Inflater, InflaterState};
pub use limits::DecompressionLimits;
