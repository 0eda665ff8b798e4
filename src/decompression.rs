//! 展開エンジン
//!
//! 入力バッファの未読領域と出力バッファの未使用領域を展開器に渡し、
//! 出力が足りなくなるたびに出力バッファを伸ばしながら、ストリーム終端まで
//! 展開器を駆動する。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_inflate::{ByteBuffer, ZlibDecompression};
//!
//! # fn main() -> Result<(), shiguredo_inflate::DecompressionError> {
//! let decompression = ZlibDecompression::new();
//!
//! // 一括展開
//! let compressed = [
//!     0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x33, 0x34, 0x32, 0xe6,
//!     0x02, 0x00, 0x08, 0xfd, 0x82, 0x5a, 0x04, 0x00, 0x00, 0x00,
//! ];
//! assert_eq!(decompression.decompress_gzip_bytes(&compressed)?, b"123\n");
//!
//! // バッファを渡して展開
//! let mut input = ByteBuffer::from(&compressed[..]);
//! let mut output = ByteBuffer::new();
//! decompression.decompress_gzip(&mut input, &mut output)?;
//! assert_eq!(output.readable_bytes(), b"123\n");
//! # Ok(())
//! # }
//! ```

use crate::buffer::ByteBuffer;
use crate::compression::{CompressionStatus, Decompressor};
use crate::error::DecompressionError;
use crate::format::Format;
use crate::inflate::{InflateSummary, Inflater, InflaterState};
use crate::limits::DecompressionLimits;

/// 展開の進捗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// 入力を使い切った、さらに入力が必要
    NeedInput,
    /// ストリーム終端に到達
    Complete,
}

/// 一括展開エンジン
///
/// 呼び出しごとに展開器を初期化し、返る前に必ず終了処理を行う。
/// 展開器の状態を呼び出し間で共有しないので、複数スレッドから同時に使える。
#[derive(Debug, Clone, Default)]
pub struct ZlibDecompression {
    limits: DecompressionLimits,
}

impl ZlibDecompression {
    /// 既定の制限でエンジンを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 制限付きでエンジンを作成
    pub fn with_limits(limits: DecompressionLimits) -> Self {
        Self { limits }
    }

    /// 制限設定
    pub fn limits(&self) -> &DecompressionLimits {
        &self.limits
    }

    /// ヘッダーなしの DEFLATE を展開
    pub fn decompress_deflate(
        &self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
    ) -> Result<(), DecompressionError> {
        self.decompress(Format::Deflate, input, output)
    }

    /// zlib 形式を展開
    pub fn decompress_zlib(
        &self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
    ) -> Result<(), DecompressionError> {
        self.decompress(Format::Zlib, input, output)
    }

    /// gzip 形式を展開
    pub fn decompress_gzip(
        &self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
    ) -> Result<(), DecompressionError> {
        self.decompress(Format::Gzip, input, output)
    }

    /// 指定した形式で展開
    ///
    /// 入力バッファは展開器が消費した分だけ読み込み位置が進む。
    /// ストリーム終端より後ろのバイトは読まれずに残る。
    /// 出力バッファには書き込み位置から先に展開結果が書き込まれる。
    /// エラー時の出力バッファの内容は不定。
    pub fn decompress(
        &self,
        format: Format,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
    ) -> Result<(), DecompressionError> {
        let mut inflater = Inflater::with_window_bits(format, self.limits.window_bits)?;
        let drained = drain(&mut inflater, input, output, &self.limits, true);
        // 失敗していても終了処理は必ず行う
        let ended = inflater.end();
        drained?;
        ended?;
        Ok(())
    }

    /// バイト列を指定した形式で展開して新しいバイト列を返す
    pub fn decompress_bytes(
        &self,
        format: Format,
        compressed: &[u8],
    ) -> Result<Vec<u8>, DecompressionError> {
        let mut input = ByteBuffer::from(compressed);
        let mut output = ByteBuffer::with_capacity(0);
        self.decompress(format, &mut input, &mut output)?;
        Ok(output.read_all())
    }

    /// ヘッダーなしの DEFLATE のバイト列を展開
    pub fn decompress_deflate_bytes(&self, compressed: &[u8]) -> Result<Vec<u8>, DecompressionError> {
        self.decompress_bytes(Format::Deflate, compressed)
    }

    /// zlib 形式のバイト列を展開
    pub fn decompress_zlib_bytes(&self, compressed: &[u8]) -> Result<Vec<u8>, DecompressionError> {
        self.decompress_bytes(Format::Zlib, compressed)
    }

    /// gzip 形式のバイト列を展開
    pub fn decompress_gzip_bytes(&self, compressed: &[u8]) -> Result<Vec<u8>, DecompressionError> {
        self.decompress_bytes(Format::Gzip, compressed)
    }
}

/// 分割された入力を順に展開するストリーム
///
/// 入力が届くたびに `feed` を呼び、最後に `finish` を呼ぶ。
///
/// ```rust
/// use shiguredo_inflate::{ByteBuffer, FeedStatus, Format, InflateStream};
///
/// # fn main() -> Result<(), shiguredo_inflate::DecompressionError> {
/// let compressed = [0x4b, 0x4c, 0x4a, 0x06, 0x00];
/// let mut stream = InflateStream::new(Format::Deflate)?;
/// let mut input = ByteBuffer::new();
/// let mut output = ByteBuffer::new();
///
/// input.write_bytes(&compressed[..2]);
/// assert_eq!(stream.feed(&mut input, &mut output)?, FeedStatus::NeedInput);
///
/// input.write_bytes(&compressed[2..]);
/// stream.finish(&mut input, &mut output)?;
/// assert_eq!(output.readable_bytes(), b"abc");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InflateStream {
    inflater: Inflater,
    limits: DecompressionLimits,
}

impl InflateStream {
    /// 既定の制限でストリームを作成
    pub fn new(format: Format) -> Result<Self, DecompressionError> {
        Self::with_limits(format, DecompressionLimits::default())
    }

    /// 制限付きでストリームを作成
    pub fn with_limits(
        format: Format,
        limits: DecompressionLimits,
    ) -> Result<Self, DecompressionError> {
        let inflater = Inflater::with_window_bits(format, limits.window_bits)?;
        Ok(Self { inflater, limits })
    }

    /// 形式
    pub fn format(&self) -> Format {
        self.inflater.format()
    }

    /// 展開器の状態
    pub fn state(&self) -> InflaterState {
        self.inflater.state()
    }

    /// 現在ある入力を展開する
    ///
    /// ストリーム終端に到達した後は何も消費せずに `Complete` を返す。
    pub fn feed(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
    ) -> Result<FeedStatus, DecompressionError> {
        if self.inflater.state() == InflaterState::StreamEnded {
            return Ok(FeedStatus::Complete);
        }
        drain(&mut self.inflater, input, output, &self.limits, false)
    }

    /// 残りの入力を展開して終了する
    ///
    /// ストリーム終端に到達しなかった場合はエラー。
    pub fn finish(
        mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
    ) -> Result<InflateSummary, DecompressionError> {
        let drained = if self.inflater.state() == InflaterState::StreamEnded {
            Ok(FeedStatus::Complete)
        } else {
            drain(&mut self.inflater, input, output, &self.limits, true)
        };
        let ended = self.inflater.end();
        drained?;
        ended
    }
}

/// 展開器を出力が止まるまで駆動する
///
/// 出力バッファに書き込み可能な領域がなければ、展開器を呼ぶ前に必ず伸ばす。
fn drain(
    inflater: &mut Inflater,
    input: &mut ByteBuffer,
    output: &mut ByteBuffer,
    limits: &DecompressionLimits,
    last: bool,
) -> Result<FeedStatus, DecompressionError> {
    loop {
        if output.writable_len() == 0 {
            grow(output, limits)?;
        }

        let status = if last {
            inflater.finish(input.readable_bytes(), output.writable_bytes_mut())?
        } else {
            inflater.decompress(input.readable_bytes(), output.writable_bytes_mut())?
        };
        output.advance_writer(status.produced());
        input.advance_reader(status.consumed());

        if output.writer_index() > limits.max_output_size {
            return Err(DecompressionError::output_limit(limits.max_output_size));
        }

        match status {
            CompressionStatus::OutputFull { .. } => grow(output, limits)?,
            CompressionStatus::Complete { .. } => return Ok(FeedStatus::Complete),
            CompressionStatus::Continue { .. } => return Ok(FeedStatus::NeedInput),
        }
    }
}

fn grow(output: &mut ByteBuffer, limits: &DecompressionLimits) -> Result<(), DecompressionError> {
    let capacity = limits
        .next_capacity(output.capacity())
        .ok_or_else(|| DecompressionError::output_limit(limits.max_output_size))?;
    output.grow_to(capacity);
    Ok(())
}
