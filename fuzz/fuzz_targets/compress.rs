// cargo fuzz run compress corpus/compress -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;

use sketchgif::lzw::{decompress, Compressor};
use sketchgif::pack::pack_codes;

fuzz_target!(|data: &[u8]| {
    let indices: Vec<u8> = data.iter().map(|b| b & 0b111).collect();
    let codes = Compressor::new(3).compress(&indices);
    let bits: usize = codes.iter().map(|(_, b)| usize::from(*b)).sum();
    assert!(codes.iter().all(|(c, b)| *c < 4096 && *b <= 12));
    let packed = pack_codes(&codes);
    assert_eq!(packed.len(), (bits + 7) / 8);
    assert_eq!(decompress(&packed, 3), indices);
});
