#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_inflate::{
    ByteBuffer, DecompressionLimits, Format, ZlibDecompression, status,
};

#[derive(Arbitrary, Debug)]
enum FuzzFormat {
    Deflate,
    Zlib,
    Gzip,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    format: FuzzFormat,
    initial_capacity: u16,
    max_output_size: u16,
    data: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let format = match input.format {
        FuzzFormat::Deflate => Format::Deflate,
        FuzzFormat::Zlib => Format::Zlib,
        FuzzFormat::Gzip => Format::Gzip,
    };
    let max_output_size = input.max_output_size as usize;
    let decompression = ZlibDecompression::with_limits(DecompressionLimits {
        initial_capacity: input.initial_capacity as usize,
        max_output_size,
        ..DecompressionLimits::default()
    });

    let mut compressed = ByteBuffer::from(input.data);
    let mut output = ByteBuffer::new();
    match decompression.decompress(format, &mut compressed, &mut output) {
        Ok(()) => {
            assert!(output.readable_len() <= max_output_size);
        }
        Err(e) => {
            assert_ne!(e.code, status::Z_OK);
            assert_ne!(e.code, status::Z_STREAM_END);
            assert!(!e.message.is_empty());
        }
    }
});
