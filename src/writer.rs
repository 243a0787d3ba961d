// writer.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Animated GIF writer
use crate::block::*;
use crate::canvas::Canvas;
use crate::encode::BlockEnc;
use crate::error::{Error, Result};
use crate::palette::{Color, Palette};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Options for one animation frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameOptions {
    left: u16,
    top: u16,
    delay_time_cs: u16,
    overlap: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        FrameOptions {
            left: 0,
            top: 0,
            delay_time_cs: 10,
            overlap: true,
        }
    }
}

impl FrameOptions {
    /// Set the left position on the logical screen
    pub fn with_left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }

    /// Set the top position on the logical screen
    pub fn with_top(mut self, top: u16) -> Self {
        self.top = top;
        self
    }

    /// Set the delay before the next frame, in hundredths of a second
    pub fn with_delay_time_cs(mut self, delay_time_cs: u16) -> Self {
        self.delay_time_cs = delay_time_cs;
        self
    }

    /// Keep the previous frame under this one (`true`), or restore the
    /// background first (`false`)
    pub fn with_overlap(mut self, overlap: bool) -> Self {
        self.overlap = overlap;
        self
    }
}

/// Animated GIF writer.
///
/// The header, logical screen descriptor, global color table and looping
/// extension are written on creation.  The trailer is written by [close],
/// [into_inner], [scoped], or on drop, whichever happens first.
///
/// ## Example
/// ```
/// use sketchgif::{Canvas, Color, FrameOptions, GifWriter, Palette, Shape};
///
/// # fn main() -> Result<(), sketchgif::Error> {
/// let palette = Palette::default();
/// let mut canvas = Canvas::new(16, 16, palette)?;
/// let mut gif = GifWriter::new(Vec::new(), palette, 16, 16, 0)?;
/// canvas.draw(&Shape::line(0.0, 0.0, 15.0, 15.0, Color::Black));
/// gif.append_frame(&canvas, FrameOptions::default())?;
/// canvas.draw(&Shape::circle(8.0, 8.0, 5.0, Color::Red));
/// gif.append_frame(&canvas, FrameOptions::default().with_delay_time_cs(50))?;
/// let bytes = gif.into_inner()?;
/// assert_eq!(bytes.last(), Some(&0x3B));
/// # Ok(())
/// # }
/// ```
///
/// [close]: struct.GifWriter.html#method.close
/// [into_inner]: struct.GifWriter.html#method.into_inner
/// [scoped]: struct.GifWriter.html#method.scoped
pub struct GifWriter<W: Write> {
    /// Block encoder (taken by `into_inner`)
    enc: Option<BlockEnc<W>>,
    /// Palette for color indices
    palette: Palette,
    /// Trailer written
    closed: bool,
    /// Number of frames appended
    frames: usize,
}

impl GifWriter<BufWriter<File>> {
    /// Create a GIF file
    pub fn create<P: AsRef<Path>>(
        path: P,
        palette: Palette,
        width: u16,
        height: u16,
        loop_count: i64,
    ) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), palette, width, height, loop_count)
    }
}

impl<W: Write> GifWriter<W> {
    /// Create a new writer, writing the GIF preamble.
    ///
    /// `loop_count` is the number of animation repeats, with 0 meaning
    /// forever; values outside `0..=65535` become 0.  A zero `width` or
    /// `height` is rejected with [InvalidDimensions] before anything is
    /// written.
    ///
    /// [InvalidDimensions]: enum.Error.html#variant.InvalidDimensions
    pub fn new(
        writer: W,
        palette: Palette,
        width: u16,
        height: u16,
        loop_count: i64,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions);
        }
        let loop_count = u16::try_from(loop_count).unwrap_or_else(|_| {
            debug!("loop count {} out of range, looping forever", loop_count);
            0
        });
        let mut enc = BlockEnc::new(writer);
        let tbl = ColorTableConfig::with_palette(&palette);
        enc.encode(&Header::default().into())?;
        enc.encode(
            &LogicalScreenDesc::default()
                .with_screen_width(width)
                .with_screen_height(height)
                .with_color_resolution(8)
                .with_color_table_config(&tbl)
                .with_background_color_idx(palette.index(Color::White))
                .into(),
        )?;
        enc.encode(&GlobalColorTable::with_palette(&palette).into())?;
        enc.encode(&Application::with_loop_count(loop_count).into())?;
        Ok(GifWriter {
            enc: Some(enc),
            palette,
            closed: false,
            frames: 0,
        })
    }

    /// Get the number of frames appended
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Check if the trailer has been written
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Get the block encoder, if still open
    fn encoder(&mut self) -> Result<&mut BlockEnc<W>> {
        match (&mut self.enc, self.closed) {
            (Some(enc), false) => Ok(enc),
            _ => Err(Error::WriterClosed),
        }
    }

    /// Append a frame with the current contents of a canvas
    pub fn append_frame(&mut self, canvas: &Canvas, opts: FrameOptions)
        -> Result<()>
    {
        let min_code_size = self.palette.index_bits();
        let enc = self.encoder()?;
        let gc = GraphicControl::default()
            .with_disposal_method(DisposalMethod::with_overlap(opts.overlap))
            .with_delay_time_cs(opts.delay_time_cs);
        enc.encode(&gc.into())?;
        let desc = ImageDesc::default()
            .with_left(opts.left)
            .with_top(opts.top)
            .with_width(canvas.width())
            .with_height(canvas.height());
        debug!("compressing {}x{} frame", desc.width(), desc.height());
        let data = ImageData::with_indices(min_code_size, canvas.index_stream());
        enc.encode(&desc.into())?;
        enc.encode(&data.into())?;
        self.frames += 1;
        Ok(())
    }

    /// Append a plain text extension.
    ///
    /// Few decoders render these.
    pub fn append_text(
        &mut self,
        text: &str,
        left: u16,
        top: u16,
        color: Color,
        background: Color,
    ) -> Result<()> {
        let fg = self.palette.index(color);
        let bg = self.palette.index(background);
        let block = PlainText::with_text(text)
            .with_left(left)
            .with_top(top)
            .with_foreground_idx(fg)
            .with_background_idx(bg);
        self.encoder()?.encode(&block.into())?;
        Ok(())
    }

    /// Write the trailer and flush.
    ///
    /// No frames may be appended afterwards.
    pub fn close(&mut self) -> Result<()> {
        let enc = match (&mut self.enc, self.closed) {
            (Some(enc), false) => enc,
            _ => return Err(Error::WriterClosed),
        };
        // closed even if the write fails
        self.closed = true;
        enc.encode(&Trailer::default().into())?;
        enc.flush()?;
        debug!("trailer written after {} frames", self.frames);
        Ok(())
    }

    /// Close (if needed) and get the inner writer
    pub fn into_inner(mut self) -> Result<W> {
        if !self.closed {
            self.close()?;
        }
        self.enc
            .take()
            .map(BlockEnc::into_inner)
            .ok_or(Error::WriterClosed)
    }

    /// Run a closure with this writer, then close it.
    ///
    /// The writer is closed whether or not the closure succeeds; an error
    /// from the closure takes precedence over one from closing.
    pub fn scoped<T, F>(mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let res = f(&mut self);
        let closed = if self.closed { Ok(()) } else { self.close() };
        let value = res?;
        closed?;
        Ok(value)
    }
}

impl<W: Write> Drop for GifWriter<W> {
    fn drop(&mut self) {
        if !self.closed && self.enc.is_some() {
            if let Err(e) = self.close() {
                warn!("trailer not written: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lzw::decompress;
    use crate::shape::Shape;
    use std::io;

    fn preamble(width: u16, height: u16, loops: u16) -> Vec<u8> {
        let mut v = b"GIF89a".to_vec();
        v.extend_from_slice(&width.to_le_bytes());
        v.extend_from_slice(&height.to_le_bytes());
        v.extend_from_slice(&[0xF2, 0, 0]);
        v.extend_from_slice(&Palette::default().colors());
        v.extend_from_slice(&[0x21, 0xFF, 11]);
        v.extend_from_slice(b"NETSCAPE2.0");
        v.extend_from_slice(&[3, 1]);
        v.extend_from_slice(&loops.to_le_bytes());
        v.push(0);
        v
    }

    fn writer(loops: i64) -> GifWriter<Vec<u8>> {
        GifWriter::new(vec![], Palette::default(), 2, 2, loops).unwrap()
    }

    #[test]
    fn empty_animation() {
        let bytes = writer(0).into_inner().unwrap();
        let mut expected = preamble(2, 2, 0);
        expected.push(0x3B);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn zero_size_screen() {
        for (w, h) in [(0, 2), (2, 0), (0, 0)] {
            let mut out = vec![];
            assert!(matches!(
                GifWriter::new(&mut out, Palette::default(), w, h, 0),
                Err(Error::InvalidDimensions)
            ));
            assert!(out.is_empty());
        }
    }

    #[test]
    fn white_frame() {
        let canvas = Canvas::new(2, 2, Palette::default()).unwrap();
        let mut gif = writer(3);
        gif.append_frame(&canvas, FrameOptions::default()).unwrap();
        assert_eq!(gif.frames(), 1);
        let bytes = gif.into_inner().unwrap();
        let mut expected = preamble(2, 2, 3);
        expected.extend_from_slice(&[0x21, 0xF9, 4, 0b100, 10, 0, 0, 0]);
        expected.extend_from_slice(&[0x2C, 0, 0, 0, 0, 2, 0, 2, 0, 0]);
        expected.extend_from_slice(&[3, 3, 0x08, 0x0A, 0x09, 0]);
        expected.push(0x3B);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn frame_options() {
        let canvas = Canvas::new(2, 2, Palette::default()).unwrap();
        let mut gif = writer(0);
        let opts = FrameOptions::default()
            .with_left(1)
            .with_top(258)
            .with_delay_time_cs(500)
            .with_overlap(false);
        gif.append_frame(&canvas, opts).unwrap();
        let bytes = gif.into_inner().unwrap();
        let n = preamble(2, 2, 0).len();
        assert_eq!(&bytes[n..n + 8], &[0x21, 0xF9, 4, 0b1000, 0xF4, 1, 0, 0]);
        assert_eq!(&bytes[n + 8..n + 13], &[0x2C, 1, 0, 2, 1]);
    }

    #[test]
    fn loop_count_clamped() {
        for (loops, expected) in
            [(-1, 0), (65_536, 0), (65_535, 65_535), (7, 7), (0, 0)]
        {
            let bytes = writer(loops).into_inner().unwrap();
            let n = preamble(2, 2, 0).len();
            assert_eq!(&bytes[n - 3..n - 1], &u16::to_le_bytes(expected));
        }
    }

    #[test]
    fn closed_writer() {
        let canvas = Canvas::new(2, 2, Palette::default()).unwrap();
        let mut gif = writer(0);
        gif.close().unwrap();
        assert!(gif.is_closed());
        assert!(matches!(
            gif.append_frame(&canvas, FrameOptions::default()),
            Err(Error::WriterClosed)
        ));
        assert!(matches!(
            gif.append_text("x", 0, 0, Color::Black, Color::White),
            Err(Error::WriterClosed)
        ));
        assert!(matches!(gif.close(), Err(Error::WriterClosed)));
        let bytes = gif.into_inner().unwrap();
        assert_eq!(bytes.iter().filter(|b| **b == 0x3B).count(), 1);
    }

    #[test]
    fn drop_writes_trailer() {
        let mut out = vec![];
        {
            let canvas = Canvas::new(2, 2, Palette::default()).unwrap();
            let mut gif =
                GifWriter::new(&mut out, Palette::default(), 2, 2, 0).unwrap();
            gif.append_frame(&canvas, FrameOptions::default()).unwrap();
        }
        assert_eq!(out.last(), Some(&0x3B));
    }

    #[test]
    fn scoped_closes_on_error() {
        let mut out = vec![];
        let gif = GifWriter::new(&mut out, Palette::default(), 4, 4, 0).unwrap();
        let res: Result<()> = gif.scoped(|gif| {
            let mut canvas = Canvas::new(4, 4, Palette::default())?;
            canvas.draw(&Shape::point(2.0, 2.0, Color::Blue));
            gif.append_frame(&canvas, FrameOptions::default())?;
            let color: Color = "chartreuse".parse()?;
            canvas.draw(&Shape::point(1.0, 1.0, color));
            gif.append_frame(&canvas, FrameOptions::default())
        });
        assert!(matches!(res, Err(Error::InvalidColor(_))));
        assert_eq!(out.last(), Some(&0x3B));
    }

    #[test]
    fn text_block() {
        let mut gif = writer(0);
        gif.append_text("ok", 1, 2, Color::Red, Color::Cyan).unwrap();
        let bytes = gif.into_inner().unwrap();
        let n = preamble(2, 2, 0).len();
        assert_eq!(
            &bytes[n..],
            &[
                0x21, 0x01, 12, 1, 0, 2, 0, 16, 0, 8, 0, 8, 8, 2, 7, 2, b'o',
                b'k', 0, 0x3B,
            ]
        );
    }

    #[test]
    fn large_frame_sub_blocks() {
        let mut canvas = Canvas::new(200, 200, Palette::default()).unwrap();
        for i in 0..40 {
            let r = f64::from(i) * 2.0 + 3.0;
            let color = Color::ALL[i as usize % 8];
            canvas.draw(&Shape::circle(100.0, 100.0, r, color));
        }
        let mut gif = GifWriter::new(vec![], Palette::default(), 200, 200, 0)
            .unwrap();
        gif.append_frame(&canvas, FrameOptions::default()).unwrap();
        let bytes = gif.into_inner().unwrap();
        // walk the image data sub-blocks
        let mut pos = preamble(200, 200, 0).len() + 8 + 10;
        assert_eq!(bytes[pos], 3);
        pos += 1;
        let mut sizes = vec![];
        let mut data = vec![];
        while bytes[pos] != 0 {
            let len = bytes[pos] as usize;
            sizes.push(bytes[pos]);
            data.extend_from_slice(&bytes[pos + 1..pos + 1 + len]);
            pos += len + 1;
        }
        assert_eq!(decompress(&data, 3), canvas.index_stream());
        assert!(sizes.len() > 1);
        assert!(sizes[..sizes.len() - 1].iter().all(|s| *s == 255));
        assert_eq!(&bytes[pos..], &[0, 0x3B]);
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn io_failure() {
        let res = GifWriter::new(FailingSink, Palette::default(), 2, 2, 0);
        assert!(matches!(res, Err(Error::Io(_))));
    }
}
