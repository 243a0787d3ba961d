use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sketchgif::lzw::Compressor;
use sketchgif::{Canvas, Color, FrameOptions, GifWriter, Palette, Shape};

fn drawing() -> Canvas {
    let mut canvas = Canvas::new(500, 500, Palette::default()).unwrap();
    for i in 0..50 {
        let r = f64::from(i) * 4.0 + 10.0;
        canvas.draw(&Shape::circle(250.0, 250.0, r, Color::ALL[i as usize % 8]));
    }
    canvas.draw(&Shape::line(0.0, 0.0, 490.0, 490.0, Color::Black));
    canvas.draw(&Shape::line(490.0, 0.0, 0.0, 490.0, Color::Black));
    canvas
}

fn compress_canvas(crit: &mut Criterion) {
    let indices = drawing().index_stream();
    crit.bench_function("compress_canvas", |b| {
        b.iter(|| Compressor::new(3).compress(black_box(&indices)))
    });
}

fn encode_frame(crit: &mut Criterion) {
    let canvas = drawing();
    crit.bench_function("encode_frame", |b| {
        b.iter(|| {
            let mut gif = GifWriter::new(
                Vec::with_capacity(32768),
                Palette::default(),
                500,
                500,
                0,
            )
            .unwrap();
            gif.append_frame(black_box(&canvas), FrameOptions::default())
                .unwrap();
            gif.into_inner().unwrap()
        })
    });
}

criterion_group!(benches, compress_canvas, encode_frame);
criterion_main!(benches);
