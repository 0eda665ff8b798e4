//! 圧縮ファイルを展開して標準出力に書き出す例
//!
//! 使い方:
//!   cargo run -p inflate_file -- response.gz
//!   cargo run -p inflate_file -- --format zlib body.bin
//!   cargo run -p inflate_file -- --format deflate --max-output-size 1048576 raw.bin > out.txt

use std::io::Write;

use shiguredo_inflate::{ByteBuffer, DecompressionLimits, Format, ZlibDecompression};

struct Options {
    format: Format,
    max_output_size: Option<usize>,
    path: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    let compressed = std::fs::read(&options.path)?;
    eprintln!(
        "Decompressing {} ({}, {} bytes) ...",
        options.path,
        options.format,
        compressed.len()
    );

    let decompression = match options.max_output_size {
        Some(size) => ZlibDecompression::with_limits(DecompressionLimits::with_max_output_size(size)),
        None => ZlibDecompression::new(),
    };

    let mut input = ByteBuffer::from(compressed);
    let mut output = ByteBuffer::new();
    if let Err(e) = decompression.decompress(options.format, &mut input, &mut output) {
        eprintln!("Failed to decompress: {}", e);
        std::process::exit(1);
    }

    if !input.is_empty() {
        eprintln!(
            "Warning: {} trailing bytes after end of stream",
            input.readable_len()
        );
    }
    eprintln!("Decompressed {} bytes", output.readable_len());

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.readable_bytes())?;
    stdout.flush()?;

    Ok(())
}

fn parse_args() -> Result<Options, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "inflate_file";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --format オプション
    let format: Format = noargs::opt("format")
        .short('f')
        .doc("Compressed data format: gzip, zlib or deflate (raw) (default: gzip)")
        .default("gzip")
        .take(&mut args)
        .then(|o| parse_format(o.value()))
        .map_err(|e| format!("{:?}", e))?;

    // --max-output-size オプション
    let max_output_size: Option<usize> = noargs::opt("max-output-size")
        .doc("Maximum decompressed size in bytes (default: unlimited)")
        .take(&mut args)
        .present_and_then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // 位置引数: ファイルパス
    let path: String = noargs::arg("<PATH>")
        .doc("Path to the compressed file")
        .take(&mut args)
        .then(|a| Ok::<_, &str>(a.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(Options {
        format,
        max_output_size,
        path,
    })
}

fn parse_format(value: &str) -> Result<Format, String> {
    match value.to_ascii_lowercase().as_str() {
        "gzip" | "gz" => Ok(Format::Gzip),
        "zlib" => Ok(Format::Zlib),
        "deflate" | "raw" => Ok(Format::Deflate),
        other => Err(format!("unknown format: {}", other)),
    }
}
