use crate::format::DEFAULT_WINDOW_BITS;

/// 展開の制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressionLimits {
    /// 容量 0 の出力バッファを最初に拡張するときの容量 (デフォルト: 1KB)
    pub initial_capacity: usize,
    /// 出力バッファを拡張するときの最小増分 (デフォルト: 1KB)
    ///
    /// 拡張後の容量は「現在の容量の 2 倍」と「現在の容量 + 最小増分」の大きい方。
    pub min_growth: usize,
    /// 最大出力サイズ (デフォルト: 制限なし)
    ///
    /// 出力バッファの書き込み済みバイト数がこのサイズを超える場合はエラーになる。
    /// 信頼できない入力を展開する場合は上限を設定すること。
    pub max_output_size: usize,
    /// ウィンドウサイズ (デフォルト: 15)
    ///
    /// 9 から 15 まで。範囲外の場合は展開器の初期化に失敗する。
    pub window_bits: u8,
}

impl Default for DecompressionLimits {
    fn default() -> Self {
        Self {
            initial_capacity: 1024, // 1KB
            min_growth: 1024,       // 1KB
            max_output_size: usize::MAX,
            window_bits: DEFAULT_WINDOW_BITS,
        }
    }
}

impl DecompressionLimits {
    /// 最大出力サイズを指定した設定を作成
    pub fn with_max_output_size(max_output_size: usize) -> Self {
        Self {
            max_output_size,
            ..Self::default()
        }
    }

    /// 現在の容量から次の容量を決める
    ///
    /// 超過を検出できるように、容量は最大出力サイズより 1 バイトだけ大きくなりうる。
    /// それ以上拡張できない場合は `None`
    pub fn next_capacity(&self, current: usize) -> Option<usize> {
        let ceiling = self.max_output_size.saturating_add(1);
        if current >= ceiling {
            return None;
        }
        let next = if current == 0 {
            self.initial_capacity
        } else {
            current
                .saturating_mul(2)
                .max(current.saturating_add(self.min_growth))
        };
        // 増分 0 の設定でも必ず 1 バイトは拡張する
        Some(next.max(current + 1).min(ceiling))
    }
}
