//! 読み込み位置と書き込み位置を持つバイトバッファ
//!
//! ```text
//! +-------------------+------------------+------------------+
//! | 読み込み済み      | 読み込み可能     | 書き込み可能     |
//! +-------------------+------------------+------------------+
//! 0            reader_index       writer_index          capacity
//! ```
//!
//! 入力バッファとしては `reader_index` から先を展開器に渡し、
//! 出力バッファとしては `writer_index` から先の未使用領域を展開器に渡す。

/// 伸長可能なバイトバッファ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    /// 長さが常に容量と一致する (未使用領域は 0 埋め)
    storage: Vec<u8>,
    reader_index: usize,
    writer_index: usize,
}

impl ByteBuffer {
    /// 空のバッファを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した容量のバッファを作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity],
            reader_index: 0,
            writer_index: 0,
        }
    }

    /// 容量
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// 読み込み位置
    #[inline]
    pub fn reader_index(&self) -> usize {
        self.reader_index
    }

    /// 書き込み位置
    #[inline]
    pub fn writer_index(&self) -> usize {
        self.writer_index
    }

    /// 読み込み可能なバイト数
    #[inline]
    pub fn readable_len(&self) -> usize {
        self.writer_index - self.reader_index
    }

    /// 読み込み可能なバイトがないかどうか
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.readable_len() == 0
    }

    /// 書き込み可能なバイト数
    #[inline]
    pub fn writable_len(&self) -> usize {
        self.capacity() - self.writer_index
    }

    /// 読み込み可能な領域
    #[inline]
    pub fn readable_bytes(&self) -> &[u8] {
        &self.storage[self.reader_index..self.writer_index]
    }

    /// 書き込み可能な領域 (未使用の末尾)
    #[inline]
    pub fn writable_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.writer_index..]
    }

    /// 読み込み位置を進める
    ///
    /// # Panics
    ///
    /// `n` が読み込み可能なバイト数を超える場合
    pub fn advance_reader(&mut self, n: usize) {
        assert!(
            n <= self.readable_len(),
            "advance_reader out of range: {} > {}",
            n,
            self.readable_len()
        );
        self.reader_index += n;
    }

    /// 書き込み位置を進める
    ///
    /// # Panics
    ///
    /// `n` が書き込み可能なバイト数を超える場合
    pub fn advance_writer(&mut self, n: usize) {
        assert!(
            n <= self.writable_len(),
            "advance_writer out of range: {} > {}",
            n,
            self.writable_len()
        );
        self.writer_index += n;
    }

    /// 容量を `capacity` まで拡張する
    ///
    /// 現在の容量以下を指定した場合は何もしない。書き込み済みのデータは保持される。
    pub fn grow_to(&mut self, capacity: usize) {
        if capacity > self.capacity() {
            self.storage.resize(capacity, 0);
        }
    }

    /// 少なくとも `additional` バイト書き込めるように容量を確保する
    pub fn reserve(&mut self, additional: usize) {
        let required = self.writer_index.saturating_add(additional);
        self.grow_to(required);
    }

    /// データを末尾に書き込む
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.try_reclaim();
        self.reserve(data.len());
        let end = self.writer_index + data.len();
        self.storage[self.writer_index..end].copy_from_slice(data);
        self.writer_index = end;
    }

    /// 読み込み可能なバイトをすべて読み出す
    pub fn read_all(&mut self) -> Vec<u8> {
        let data = self.readable_bytes().to_vec();
        self.reader_index = self.writer_index;
        data
    }

    /// 読み込み可能なバイトを `Vec<u8>` として取り出す
    pub fn into_vec(mut self) -> Vec<u8> {
        self.storage.truncate(self.writer_index);
        self.storage.drain(..self.reader_index);
        self.storage
    }

    /// 読み込み位置と書き込み位置をリセットする (容量は保持)
    pub fn clear(&mut self) {
        self.reader_index = 0;
        self.writer_index = 0;
    }

    /// 空なら先頭から使い直す
    #[inline]
    fn try_reclaim(&mut self) {
        if self.is_empty() {
            self.clear();
        }
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(storage: Vec<u8>) -> Self {
        let writer_index = storage.len();
        Self {
            storage,
            reader_index: 0,
            writer_index,
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.readable_bytes()
    }
}
