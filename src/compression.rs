//! 展開トレイト (Sans I/O)
//!
//! 展開器を 1 ステップずつ駆動するためのインターフェース。
//! 入力と出力はスライスで渡し、ステップごとの消費量と生成量を
//! [`CompressionStatus`] で返す。

use crate::error::DecompressionError;

/// 処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionStatus {
    /// 処理継続中、さらに入力が必要
    Continue {
        /// 消費した入力バイト数
        consumed: usize,
        /// 生成した出力バイト数
        produced: usize,
    },
    /// 処理完了 (ストリーム終端)
    Complete {
        /// 消費した入力バイト数
        consumed: usize,
        /// 生成した出力バイト数
        produced: usize,
    },
    /// 出力バッファが満杯
    OutputFull {
        /// 消費した入力バイト数
        consumed: usize,
        /// 生成した出力バイト数
        produced: usize,
    },
}

impl CompressionStatus {
    /// 消費した入力バイト数を取得
    #[inline]
    pub fn consumed(&self) -> usize {
        match self {
            CompressionStatus::Continue { consumed, .. } => *consumed,
            CompressionStatus::Complete { consumed, .. } => *consumed,
            CompressionStatus::OutputFull { consumed, .. } => *consumed,
        }
    }

    /// 生成した出力バイト数を取得
    #[inline]
    pub fn produced(&self) -> usize {
        match self {
            CompressionStatus::Continue { produced, .. } => *produced,
            CompressionStatus::Complete { produced, .. } => *produced,
            CompressionStatus::OutputFull { produced, .. } => *produced,
        }
    }

    /// 処理が完了したかどうかを判定
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, CompressionStatus::Complete { .. })
    }

    /// 出力バッファが満杯かどうかを判定
    #[inline]
    pub fn is_output_full(&self) -> bool {
        matches!(self, CompressionStatus::OutputFull { .. })
    }
}

/// 展開トレイト (Sans I/O)
///
/// # 使い方
///
/// ```rust
/// use shiguredo_inflate::{Decompressor, Format, Inflater};
///
/// # fn main() -> Result<(), shiguredo_inflate::DecompressionError> {
/// let compressed: &[u8] = &[0x4b, 0x4c, 0x4a, 0x06, 0x00];
/// let mut inflater = Inflater::new(Format::Deflate)?;
/// let mut output = vec![0u8; 64];
///
/// // これ以上入力がないので finish で展開する
/// let status = inflater.finish(compressed, &mut output)?;
/// assert!(status.is_complete());
/// assert_eq!(&output[..status.produced()], b"abc");
/// # Ok(())
/// # }
/// ```
pub trait Decompressor {
    /// 圧縮データを展開して出力バッファに書き込む
    ///
    /// 後続の入力がありうる場合に使う。
    ///
    /// # 戻り値
    /// - `Continue`: 処理継続中、さらに入力が必要
    /// - `OutputFull`: 出力バッファが満杯、出力を空けて再度呼び出す必要あり
    /// - `Complete`: 展開完了
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<CompressionStatus, DecompressionError>;

    /// 入力がこれで最後であることを伝えて展開する
    ///
    /// 戻り値は `decompress` と同じ。`Continue` が返った場合、
    /// ストリームが途中で途切れている。
    fn finish(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<CompressionStatus, DecompressionError>;

    /// 展開器をリセットして再利用可能にする
    fn reset(&mut self);
}
