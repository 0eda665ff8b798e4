#![no_main]

use std::io::Write;

use arbitrary::Arbitrary;
use flate2::Compression;
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use libfuzzer_sys::fuzz_target;
use shiguredo_inflate::{Format, ZlibDecompression};

#[derive(Arbitrary, Debug)]
struct FuzzRoundtrip {
    level: u8,
    data: Vec<u8>,
}

fn compress(format: Format, data: &[u8], level: u32) -> Vec<u8> {
    let level = Compression::new(level);
    match format {
        Format::Deflate => {
            let mut encoder = DeflateEncoder::new(Vec::new(), level);
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        Format::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), level);
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        Format::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), level);
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
    }
}

fuzz_target!(|input: FuzzRoundtrip| {
    let level = u32::from(input.level % 10);
    let decompression = ZlibDecompression::new();

    for format in [Format::Deflate, Format::Zlib, Format::Gzip] {
        let compressed = compress(format, &input.data, level);
        let decompressed = decompression
            .decompress_bytes(format, &compressed)
            .expect("roundtrip must succeed");
        assert_eq!(decompressed, input.data);

        if !compressed.is_empty() {
            let truncated = &compressed[..compressed.len() - 1];
            assert!(decompression.decompress_bytes(format, truncated).is_err());
        }
    }
});
