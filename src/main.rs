// main.rs      sketchgif command
//
// Copyright (c) 2019-2025  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, Arg, ArgMatches};
use sketchgif::{Canvas, Color, FrameOptions, GifWriter, Palette, Shape};
use std::error::Error;
use std::io::Write;
use termcolor::{Color as TermColor, ColorChoice, ColorSpec, StandardStream,
    WriteColor};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new("sketchgif")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Draw a demo animation as a GIF")
        .arg(Arg::with_name("output")
            .help("Output file (.gif is appended if missing)")
            .required(true))
        .arg(Arg::with_name("width")
            .long("width")
            .takes_value(true)
            .default_value("500")
            .help("Canvas width"))
        .arg(Arg::with_name("height")
            .long("height")
            .takes_value(true)
            .default_value("500")
            .help("Canvas height"))
        .arg(Arg::with_name("loops")
            .long("loops")
            .takes_value(true)
            .default_value("0")
            .help("Animation repeats (0 = forever)"))
        .arg(Arg::with_name("delay")
            .long("delay")
            .takes_value(true)
            .default_value("10")
            .help("Frame delay in hundredths of a second"))
        .get_matches();
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    let mut red = ColorSpec::new();
    red.set_fg(Some(TermColor::Red)).set_intense(true);
    if let Err(e) = run(&matches, &mut out) {
        out.set_color(&red)?;
        writeln!(out, "error: {}", e)?;
        out.reset()?;
        std::process::exit(1);
    }
    out.reset()?;
    Ok(())
}

/// Append `.gif` unless the name already has it (any case)
fn normalize_filename(name: &str) -> String {
    if name.to_lowercase().ends_with(".gif") {
        name.to_string()
    } else {
        format!("{}.gif", name)
    }
}

fn run(matches: &ArgMatches, out: &mut StandardStream)
    -> Result<(), Box<dyn Error>>
{
    let width: u16 = matches.value_of("width").unwrap_or("500").parse()?;
    let height: u16 = matches.value_of("height").unwrap_or("500").parse()?;
    let loops: i64 = matches.value_of("loops").unwrap_or("0").parse()?;
    let delay: u16 = matches.value_of("delay").unwrap_or("10").parse()?;
    let path = normalize_filename(matches.value_of("output").unwrap_or("demo"));
    let palette = Palette::default();
    let gif = GifWriter::create(&path, palette, width, height, loops)?;
    let frames = gif.scoped(|gif| {
        let mut canvas = Canvas::new(width, height, palette)?;
        let opts = FrameOptions::default().with_delay_time_cs(delay);
        let (w, h) = (f64::from(width) - 10.0, f64::from(height) - 10.0);
        canvas.draw(&Shape::line(0.0, 0.0, w, h, Color::Black));
        gif.append_frame(&canvas, opts)?;
        canvas.draw(&Shape::line(w, 0.0, 0.0, h, Color::Black));
        gif.append_frame(&canvas, opts)?;
        let (cx, cy) = canvas.center();
        let r = cx.min(cy) / 2.0;
        canvas.draw(&Shape::circle(cx, cy, r, Color::Red));
        canvas.draw(&Shape::point_sized(cx, cy, 3, Color::Blue));
        gif.append_frame(&canvas, opts)?;
        Ok(gif.frames())
    })?;
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(TermColor::White)).set_intense(true).set_bold(true);
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(TermColor::Magenta));
    out.set_color(&magenta)?;
    writeln!(out, "{}", path)?;
    out.set_color(&bold)?;
    writeln!(out, "GIF89a {}x{}, frames: {}", width, height, frames)?;
    Ok(())
}
