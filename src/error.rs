use std::fmt;

/// zlib 互換のステータスコード
///
/// 展開器が返すネイティブなステータスコードをそのまま保持する。
pub mod status {
    /// 正常
    pub const Z_OK: i32 = 0;
    /// ストリーム終端に到達
    pub const Z_STREAM_END: i32 = 1;
    /// プリセット辞書が必要
    pub const Z_NEED_DICT: i32 = 2;
    /// ストリーム状態が不正
    pub const Z_STREAM_ERROR: i32 = -2;
    /// 入力データが不正
    pub const Z_DATA_ERROR: i32 = -3;
    /// メモリ不足
    pub const Z_MEM_ERROR: i32 = -4;
    /// 進捗なし (入力不足または出力バッファ不足)
    pub const Z_BUF_ERROR: i32 = -5;
}

/// 展開器がメッセージを返さなかった場合のメッセージ
pub const UNKNOWN_MESSAGE: &str = "Unknown";

/// 展開エラー
///
/// ネイティブなステータスコードと、展開器が返した診断メッセージを持つ。
/// メッセージがない場合は `"Unknown"` になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressionError {
    /// ステータスコード
    pub code: i32,
    /// 診断メッセージ
    pub message: String,
}

impl DecompressionError {
    /// 新しいエラーを作成
    pub fn new(code: i32, message: Option<&str>) -> Self {
        let message = match message {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => UNKNOWN_MESSAGE.to_string(),
        };
        Self { code, message }
    }

    /// 入力データが不正
    pub(crate) fn data(message: Option<&str>) -> Self {
        Self::new(status::Z_DATA_ERROR, message)
    }

    /// ストリーム状態が不正
    pub(crate) fn stream(message: &str) -> Self {
        Self::new(status::Z_STREAM_ERROR, Some(message))
    }

    /// プリセット辞書が要求された
    pub(crate) fn need_dict(adler: u32) -> Self {
        Self::new(
            status::Z_NEED_DICT,
            Some(format!("preset dictionary required (adler32 {:#010x})", adler).as_str()),
        )
    }

    /// 出力サイズ上限を超えた
    pub(crate) fn output_limit(limit: usize) -> Self {
        Self::new(
            status::Z_BUF_ERROR,
            Some(format!("output size limit exceeded: {} bytes", limit).as_str()),
        )
    }

    /// 入力データ不正によるエラーかどうか
    pub fn is_data_error(&self) -> bool {
        self.code == status::Z_DATA_ERROR
    }
}

impl fmt::Display for DecompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decompression error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for DecompressionError {}

impl From<flate2::DecompressError> for DecompressionError {
    fn from(e: flate2::DecompressError) -> Self {
        match e.needs_dictionary() {
            Some(adler) => DecompressionError::need_dict(adler),
            None => DecompressionError::data(e.message()),
        }
    }
}
