//! flate2 の inflate 状態を所有する展開器
//!
//! 初期化 (`Inflater::new`)、ステップ実行 ([`Decompressor`])、終了処理
//! (`Inflater::end`) の 3 操作だけを公開する。`end` は `self` を消費するので
//! 終了処理は 1 回しか呼べない。ネイティブな状態の解放は `Drop` で行われるため、
//! エラーで途中終了した場合も必ず解放される。

use core::fmt;

use flate2::{Decompress, FlushDecompress, Status};

use crate::compression::{CompressionStatus, Decompressor};
use crate::error::{DecompressionError, status};
use crate::format::{
    DEFAULT_WINDOW_BITS, Format, GZIP_WINDOW_OFFSET, MAX_WINDOW_BITS, MIN_WINDOW_BITS,
};

/// 展開器の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflaterState {
    /// 初期化済み、まだ 1 度もステップを実行していない
    Initialized,
    /// 展開中
    Draining,
    /// ストリーム終端に到達
    StreamEnded,
    /// エラーで停止
    Failed,
}

/// 展開結果の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflateSummary {
    /// 消費した入力バイト数の合計
    pub total_in: u64,
    /// 生成した出力バイト数の合計
    pub total_out: u64,
}

/// inflate 展開器
pub struct Inflater {
    inner: Decompress,
    format: Format,
    window_bits: u8,
    state: InflaterState,
    last_code: i32,
    last_error: Option<DecompressionError>,
}

impl fmt::Debug for Inflater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inflater")
            .field("format", &self.format)
            .field("window_bits", &self.window_bits)
            .field("state", &self.state)
            .field("total_in", &self.inner.total_in())
            .field("total_out", &self.inner.total_out())
            .finish()
    }
}

impl Inflater {
    /// 既定のウィンドウサイズで展開器を初期化
    pub fn new(format: Format) -> Result<Self, DecompressionError> {
        Self::with_window_bits(format, DEFAULT_WINDOW_BITS)
    }

    /// ウィンドウサイズを指定して展開器を初期化
    ///
    /// `window_bits` が 9 から 15 の範囲外の場合は `Z_STREAM_ERROR` を返す。
    pub fn with_window_bits(format: Format, window_bits: u8) -> Result<Self, DecompressionError> {
        if !(MIN_WINDOW_BITS..=MAX_WINDOW_BITS).contains(&window_bits) {
            return Err(DecompressionError::stream(&format!(
                "invalid window size: {}",
                window_bits
            )));
        }

        Ok(Self {
            inner: new_decompress(format, window_bits),
            format,
            window_bits,
            state: InflaterState::Initialized,
            last_code: status::Z_OK,
            last_error: None,
        })
    }

    /// 形式
    pub fn format(&self) -> Format {
        self.format
    }

    /// 現在の状態
    pub fn state(&self) -> InflaterState {
        self.state
    }

    /// 最後に観測したステータスコード
    pub fn last_code(&self) -> i32 {
        self.last_code
    }

    /// 消費した入力バイト数の合計
    pub fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    /// 生成した出力バイト数の合計
    pub fn total_out(&self) -> u64 {
        self.inner.total_out()
    }

    /// 展開器を終了する
    ///
    /// ストリーム終端に到達していない場合は、最後に観測したステータスコードを持つ
    /// エラーを返す。ステップで失敗していた場合はそのエラーを返す。
    pub fn end(self) -> Result<InflateSummary, DecompressionError> {
        let last_code = self.last_code;
        match self.state {
            InflaterState::StreamEnded => Ok(InflateSummary {
                total_in: self.inner.total_in(),
                total_out: self.inner.total_out(),
            }),
            InflaterState::Failed => Err(self
                .last_error
                .unwrap_or_else(|| DecompressionError::new(last_code, None))),
            InflaterState::Initialized | InflaterState::Draining => {
                // 途中で途切れたストリームは FINISH 指定時の zlib と同じく Z_BUF_ERROR
                let code = if last_code == status::Z_OK {
                    status::Z_BUF_ERROR
                } else {
                    last_code
                };
                Err(DecompressionError::new(code, None))
            }
        }
    }

    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushDecompress,
    ) -> Result<CompressionStatus, DecompressionError> {
        match self.state {
            InflaterState::StreamEnded => {
                return Err(DecompressionError::stream("stream already finished"));
            }
            InflaterState::Failed => {
                return Err(self
                    .last_error
                    .clone()
                    .unwrap_or_else(|| DecompressionError::new(self.last_code, None)));
            }
            InflaterState::Initialized | InflaterState::Draining => {}
        }
        self.state = InflaterState::Draining;

        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let result = self.inner.decompress(input, output, flush);
        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;

        match result {
            Ok(Status::StreamEnd) => {
                self.last_code = status::Z_STREAM_END;
                self.state = InflaterState::StreamEnded;
                Ok(CompressionStatus::Complete { consumed, produced })
            }
            Ok(s) => {
                self.last_code = match s {
                    Status::BufError => status::Z_BUF_ERROR,
                    _ => status::Z_OK,
                };
                if produced == output.len() {
                    Ok(CompressionStatus::OutputFull { consumed, produced })
                } else {
                    Ok(CompressionStatus::Continue { consumed, produced })
                }
            }
            Err(e) => {
                let error = DecompressionError::from(e);
                self.last_code = error.code;
                self.last_error = Some(error.clone());
                self.state = InflaterState::Failed;
                Err(error)
            }
        }
    }
}

impl Decompressor for Inflater {
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<CompressionStatus, DecompressionError> {
        self.step(input, output, FlushDecompress::None)
    }

    fn finish(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<CompressionStatus, DecompressionError> {
        self.step(input, output, FlushDecompress::Finish)
    }

    fn reset(&mut self) {
        // Decompress::reset は gzip の設定を保持しないので作り直す
        self.inner = new_decompress(self.format, self.window_bits);
        self.state = InflaterState::Initialized;
        self.last_code = status::Z_OK;
        self.last_error = None;
    }
}

/// windowBits から展開器を作る
///
/// 負なら raw DEFLATE、16 が加算されていれば gzip、それ以外は zlib。
/// `window_bits` は呼び出し元で 9 から 15 に検証済み。
fn new_decompress(format: Format, window_bits: u8) -> Decompress {
    let bits = format.window_bits_for(window_bits);
    if bits < 0 {
        Decompress::new_with_window_bits(false, bits.unsigned_abs() as u8)
    } else if bits > i32::from(MAX_WINDOW_BITS) {
        Decompress::new_gzip((bits - GZIP_WINDOW_OFFSET) as u8)
    } else {
        Decompress::new_with_window_bits(true, bits as u8)
    }
}
