//! 展開エンジンのシナリオテスト
//!
//! PBT ではカバーしにくい、具体的な入力に対する挙動を確認する。
//!
//! - 既知の gzip ペイロードの展開結果
//! - 途中で途切れたストリーム、空の入力、形式の取り違えがエラーになること
//! - エラーが成功扱いにならず、途中までの出力を返さないこと

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use shiguredo_inflate::{
    ByteBuffer, DecompressionError, DecompressionLimits, FeedStatus, Format, InflateStream,
    ZlibDecompression, status,
};

const GZIP_123: &str = "H4sIAAAAAAAAAzM0MuYCAAj9gloEAAAA";

fn compress(format: Format, data: &[u8]) -> Vec<u8> {
    match format {
        Format::Deflate => {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        Format::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        Format::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
    }
}

fn text() -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. ".repeat(500)
}

fn assert_codec_error(result: Result<Vec<u8>, DecompressionError>) -> DecompressionError {
    let err = result.expect_err("decompression must fail");
    assert_ne!(err.code, status::Z_OK);
    assert_ne!(err.code, status::Z_STREAM_END);
    assert!(!err.message.is_empty());
    err
}

/// 既知の gzip ペイロード
///
/// gzip のトレーラーに記録された元のサイズは 4 バイトで、
/// 展開結果は "123" に改行が続いたもの。
#[test]
fn gzip_known_payload() {
    let compressed = STANDARD.decode(GZIP_123).unwrap();
    let decompression = ZlibDecompression::new();

    let decompressed = decompression.decompress_gzip_bytes(&compressed).unwrap();
    assert_eq!(decompressed, b"123\n");
    assert_eq!(decompressed.trim_ascii_end(), b"123");
}

#[test]
fn gzip_known_payload_with_buffers() {
    let compressed = STANDARD.decode(GZIP_123).unwrap();
    let decompression = ZlibDecompression::new();
    let mut input = ByteBuffer::from(compressed.clone());
    let mut output = ByteBuffer::with_capacity(0);

    decompression
        .decompress_gzip(&mut input, &mut output)
        .unwrap();

    assert_eq!(input.reader_index(), compressed.len());
    assert_eq!(output.writer_index(), 4);
    assert_eq!(output.read_all(), b"123\n");
}

#[test]
fn truncated_stream_is_error() {
    let decompression = ZlibDecompression::new();
    for format in [Format::Deflate, Format::Zlib, Format::Gzip] {
        let compressed = compress(format, &text());
        let truncated = &compressed[..compressed.len() - 1];
        assert_codec_error(decompression.decompress_bytes(format, truncated));
    }
}

#[test]
fn truncated_known_payload_reports_buf_error() {
    let compressed = STANDARD.decode(GZIP_123).unwrap();
    let decompression = ZlibDecompression::new();

    let err = assert_codec_error(
        decompression.decompress_gzip_bytes(&compressed[..compressed.len() - 1]),
    );
    assert_eq!(err.code, status::Z_BUF_ERROR);
    assert_eq!(err.message, "Unknown");
}

#[test]
fn empty_input_is_error() {
    let decompression = ZlibDecompression::new();
    for format in [Format::Deflate, Format::Zlib, Format::Gzip] {
        assert_codec_error(decompression.decompress_bytes(format, &[]));
    }
}

#[test]
fn gzip_to_deflate_is_error() {
    let decompression = ZlibDecompression::new();
    let compressed = compress(Format::Gzip, &text());
    let err = assert_codec_error(decompression.decompress_deflate_bytes(&compressed));
    assert_eq!(err.code, status::Z_DATA_ERROR);
}

#[test]
fn deflate_to_gzip_is_error() {
    let decompression = ZlibDecompression::new();
    let compressed = compress(Format::Deflate, &text());
    let err = assert_codec_error(decompression.decompress_gzip_bytes(&compressed));
    assert_eq!(err.code, status::Z_DATA_ERROR);
    assert_ne!(err.message, "Unknown");
}

#[test]
fn gzip_to_zlib_is_error() {
    let decompression = ZlibDecompression::new();
    let compressed = compress(Format::Gzip, &text());
    assert_codec_error(decompression.decompress_zlib_bytes(&compressed));
}

#[test]
fn corrupted_checksum_is_error() {
    let decompression = ZlibDecompression::new();
    let mut compressed = compress(Format::Gzip, &text());
    // CRC32 の先頭バイトを壊す
    let crc_offset = compressed.len() - 8;
    compressed[crc_offset] ^= 0xff;

    let err = assert_codec_error(decompression.decompress_gzip_bytes(&compressed));
    assert_eq!(err.code, status::Z_DATA_ERROR);
}

#[test]
fn presized_output_matches_zero_capacity() {
    let decompression = ZlibDecompression::new();
    let data = text();
    let compressed = compress(Format::Gzip, &data);

    let mut zero = ByteBuffer::with_capacity(0);
    decompression
        .decompress_gzip(&mut ByteBuffer::from(compressed.clone()), &mut zero)
        .unwrap();

    let mut exact = ByteBuffer::with_capacity(data.len());
    decompression
        .decompress_gzip(&mut ByteBuffer::from(compressed), &mut exact)
        .unwrap();

    assert_eq!(zero.readable_bytes(), exact.readable_bytes());
    assert_eq!(exact.readable_bytes(), &data[..]);
}

/// 既定の設定では出力サイズに上限がない
#[test]
fn default_engine_inflates_beyond_64mib() {
    let size = 64 * 1024 * 1024 + 1;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(&vec![0u8; size]).unwrap();
    let compressed = encoder.finish().unwrap();

    let decompressed = ZlibDecompression::new()
        .decompress_gzip_bytes(&compressed)
        .unwrap();
    assert_eq!(decompressed.len(), size);
    assert!(decompressed.iter().all(|&b| b == 0));
}

#[test]
fn explicit_limit_rejects_larger_output() {
    let data = text();
    let compressed = compress(Format::Gzip, &data);
    let decompression =
        ZlibDecompression::with_limits(DecompressionLimits::with_max_output_size(data.len() - 1));

    let err = assert_codec_error(decompression.decompress_gzip_bytes(&compressed));
    assert_eq!(err.code, status::Z_BUF_ERROR);
    assert_eq!(
        err.message,
        format!("output size limit exceeded: {} bytes", data.len() - 1)
    );
}

#[test]
fn trailing_bytes_stay_in_input() {
    let decompression = ZlibDecompression::new();
    let mut compressed = compress(Format::Gzip, b"payload");
    let stream_len = compressed.len();
    compressed.extend_from_slice(b"next");

    let mut input = ByteBuffer::from(compressed);
    let mut output = ByteBuffer::new();
    decompression
        .decompress_gzip(&mut input, &mut output)
        .unwrap();

    assert_eq!(input.reader_index(), stream_len);
    assert_eq!(input.readable_bytes(), b"next");
    assert_eq!(output.readable_bytes(), b"payload");
}

#[test]
fn content_coding_selects_format() {
    let decompression = ZlibDecompression::new();
    let data = text();

    let format = Format::from_content_coding("gzip").unwrap();
    let compressed = compress(Format::Gzip, &data);
    assert_eq!(decompression.decompress_bytes(format, &compressed).unwrap(), data);

    // HTTP の deflate は zlib 形式
    let format = Format::from_content_coding("deflate").unwrap();
    let compressed = compress(Format::Zlib, &data);
    assert_eq!(decompression.decompress_bytes(format, &compressed).unwrap(), data);
}

/// 2 つに分割した入力を順に与えても、一括展開と同じ結果になる
#[test]
fn split_feed_matches_single_shot() {
    let data = text();
    let compressed = compress(Format::Gzip, &data);
    let expected = ZlibDecompression::new()
        .decompress_gzip_bytes(&compressed)
        .unwrap();

    for split in [1, compressed.len() / 3, compressed.len() - 1] {
        let mut stream = InflateStream::new(Format::Gzip).unwrap();
        let mut input = ByteBuffer::new();
        let mut output = ByteBuffer::new();

        input.write_bytes(&compressed[..split]);
        assert_eq!(
            stream.feed(&mut input, &mut output).unwrap(),
            FeedStatus::NeedInput
        );
        assert!(input.is_empty());

        input.write_bytes(&compressed[split..]);
        stream.finish(&mut input, &mut output).unwrap();
        assert_eq!(output.readable_bytes(), &expected[..]);
    }
}

#[test]
fn concurrent_calls_are_independent() {
    let decompression = ZlibDecompression::new();
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let decompression = decompression.clone();
            std::thread::spawn(move || {
                let data = vec![i; 10_000 + i as usize];
                let compressed = compress(Format::Zlib, &data);
                let decompressed = decompression.decompress_zlib_bytes(&compressed).unwrap();
                assert_eq!(decompressed, data);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
