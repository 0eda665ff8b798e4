#![no_main]

use std::io::Write;

use arbitrary::Arbitrary;
use flate2::Compression;
use flate2::write::GzEncoder;
use libfuzzer_sys::fuzz_target;
use shiguredo_inflate::{ByteBuffer, FeedStatus, Format, InflateStream};

#[derive(Arbitrary, Debug)]
struct FuzzStream {
    data: Vec<u8>,
    split_hint: u8,
}

fuzz_target!(|input: FuzzStream| {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&input.data).unwrap();
    let compressed = encoder.finish().unwrap();

    let split_size = (input.split_hint as usize % 64) + 1;
    let Ok(mut stream) = InflateStream::new(Format::Gzip) else {
        return;
    };
    let mut buffer = ByteBuffer::new();
    let mut output = ByteBuffer::new();

    let mut complete = false;
    for part in compressed.chunks(split_size) {
        buffer.write_bytes(part);
        match stream.feed(&mut buffer, &mut output) {
            Ok(FeedStatus::Complete) => complete = true,
            Ok(FeedStatus::NeedInput) => assert!(!complete),
            Err(e) => panic!("feed failed: {}", e),
        }
    }

    stream
        .finish(&mut buffer, &mut output)
        .expect("finish must succeed");
    assert_eq!(output.into_vec(), input.data);
});
