// encode.rs
//
// Copyright (c) 2019  Douglas Lau
//
use crate::block::*;
use crate::lzw::Compressor;
use crate::pack::pack_codes;
use std::io::{self, Write};

/// Block encoder
pub struct BlockEnc<W: Write> {
    writer: W,
}

impl<W: Write> BlockEnc<W> {
    pub fn new(writer: W) -> Self {
        BlockEnc { writer }
    }
    pub fn encode(&mut self, block: &Block) -> io::Result<()> {
        use crate::block::Block::*;
        let w = &mut self.writer;
        match block {
            Header(b) => b.format(w),
            LogicalScreenDesc(b) => b.format(w),
            GlobalColorTable(b) => b.format(w),
            PlainText(b) => b.format(w),
            GraphicControl(b) => b.format(w),
            Application(b) => b.format(w),
            ImageDesc(b) => b.format(w),
            ImageData(b) => b.format(w),
            Trailer(b) => b.format(w),
        }
    }
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl Header {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(b"GIF")?;
        w.write_all(&self.version())
    }
}

impl LogicalScreenDesc {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut buf = Vec::with_capacity(7);
        buf.extend_from_slice(&self.screen_width().to_le_bytes());
        buf.extend_from_slice(&self.screen_height().to_le_bytes());
        buf.push(self.flags());
        buf.push(self.background_color_idx());
        buf.push(self.pixel_aspect_ratio());
        w.write_all(&buf)
    }
}

impl GlobalColorTable {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.colors())
    }
}

impl PlainText {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Extension_.signature())?;
        let mut buf = Vec::with_capacity(14);
        buf.push(ExtensionCode::PlainText_.into());
        buf.push(12);   // block size
        buf.extend_from_slice(&self.left().to_le_bytes());
        buf.extend_from_slice(&self.top().to_le_bytes());
        buf.extend_from_slice(&self.grid_width().to_le_bytes());
        buf.extend_from_slice(&self.grid_height().to_le_bytes());
        buf.push(Self::CELL_SIZE);  // cell width
        buf.push(Self::CELL_SIZE);  // cell height
        buf.push(self.foreground_idx());
        buf.push(self.background_idx());
        w.write_all(&buf)?;
        let mut bw = BlockWriter::new(w);
        bw.write_all(self.text())?;
        bw.flush()?;
        w.write_all(&[0])   // block size
    }
}

impl GraphicControl {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Extension_.signature())?;
        let mut buf = Vec::with_capacity(7);
        buf.push(ExtensionCode::GraphicControl_.into());
        buf.push(4);    // block size
        buf.push(self.flags());
        buf.extend_from_slice(&self.delay_time_cs().to_le_bytes());
        buf.push(self.transparent_color_idx());
        buf.push(0);    // block size
        w.write_all(&buf)
    }
}

impl Application {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Extension_.signature())?;
        w.write_all(&[ExtensionCode::Application_.into()])?;
        for c in self.app_data() {
            assert!(c.len() < 256);
            let len = c.len() as u8;
            w.write_all(&[len])?;   // block size
            w.write_all(c)?;
        }
        w.write_all(&[0])   // block size
    }
}

impl ImageDesc {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::ImageDesc_.signature())?;
        let mut buf = Vec::with_capacity(9);
        buf.extend_from_slice(&self.left().to_le_bytes());
        buf.extend_from_slice(&self.top().to_le_bytes());
        buf.extend_from_slice(&self.width().to_le_bytes());
        buf.extend_from_slice(&self.height().to_le_bytes());
        buf.push(self.flags());
        w.write_all(&buf)
    }
}

impl ImageData {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&[self.min_code_size()])?;
        let codes = Compressor::new(self.min_code_size()).compress(self.data());
        let bytes = pack_codes(&codes);
        debug!("compressed {} indices into {} bytes", self.data().len(),
            bytes.len());
        let mut bw = BlockWriter::new(w);
        bw.write_all(&bytes)?;
        bw.flush()?;
        w.write_all(&[0])
    }
}

/// Writer which splits data into sub-blocks of up to 255 bytes
struct BlockWriter<'a, W: Write> {
    writer: &'a mut W,
    buf: Vec<u8>,
}

impl<'a, W: Write> BlockWriter<'a, W> {
    fn new(writer: &'a mut W) -> Self {
        let buf = Vec::with_capacity(256);
        BlockWriter { writer, buf }
    }
}

impl<'a, W: Write> Write for BlockWriter<'a, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let remaining = 0xFF - self.buf.len();
        let consumed = remaining.min(buf.len());
        self.buf.extend_from_slice(&buf[..consumed]);
        if self.buf.len() == 0xFF {
            self.writer.write_all(&[0xFF])?;
            self.writer.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(consumed)
    }
    fn flush(&mut self) -> io::Result<()> {
        let len = self.buf.len();
        if len > 0 {
            self.writer.write_all(&[len as u8])?;
            self.writer.write_all(&self.buf[..len])?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Trailer {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Trailer_.signature())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn encode(block: Block) -> Vec<u8> {
        let mut enc = BlockEnc::new(vec![]);
        enc.encode(&block).unwrap();
        enc.into_inner()
    }

    #[test]
    fn sub_blocks() {
        let mut out = vec![];
        let data: Vec<u8> = (0..600).map(|i| i as u8).collect();
        let mut bw = BlockWriter::new(&mut out);
        bw.write_all(&data).unwrap();
        bw.flush().unwrap();
        assert_eq!(out.len(), 600 + 3);
        assert_eq!(out[0], 255);
        assert_eq!(out[256], 255);
        assert_eq!(out[512], 90);
        assert_eq!(&out[1..4], &[0, 1, 2]);
        assert_eq!(out[513], 254);
    }

    #[test]
    fn exact_sub_block() {
        let mut out = vec![];
        let mut bw = BlockWriter::new(&mut out);
        bw.write_all(&[7; 255]).unwrap();
        bw.flush().unwrap();
        // no empty sub-block after a full one
        assert_eq!(out.len(), 256);
    }

    #[test]
    fn graphic_control() {
        let gc = GraphicControl::default()
            .with_disposal_method(DisposalMethod::Keep)
            .with_delay_time_cs(300);
        assert_eq!(
            encode(gc.into()),
            vec![0x21, 0xF9, 4, 0b100, 0x2C, 0x01, 0, 0]
        );
    }

    #[test]
    fn image_desc() {
        let d = ImageDesc::default()
            .with_left(1)
            .with_top(0x0102)
            .with_width(500)
            .with_height(2);
        assert_eq!(
            encode(d.into()),
            vec![0x2C, 1, 0, 2, 1, 0xF4, 1, 2, 0, 0]
        );
    }

    #[test]
    fn image_data() {
        let d = ImageData::with_indices(3, vec![0, 0, 0, 0]);
        assert_eq!(encode(d.into()), vec![3, 3, 0x08, 0x0A, 0x09, 0]);
    }

    #[test]
    fn plain_text() {
        let t = PlainText::with_text("Hi")
            .with_left(3)
            .with_top(4)
            .with_foreground_idx(1)
            .with_background_idx(0);
        assert_eq!(
            encode(t.into()),
            vec![
                0x21, 0x01, 12, 3, 0, 4, 0, 16, 0, 8, 0, 8, 8, 1, 0, 2, b'H',
                b'i', 0,
            ]
        );
    }

    #[test]
    fn application() {
        let a = Application::with_loop_count(5);
        let mut expected = vec![0x21, 0xFF, 11];
        expected.extend_from_slice(b"NETSCAPE2.0");
        expected.extend_from_slice(&[3, 1, 5, 0, 0]);
        assert_eq!(encode(a.into()), expected);
    }
}
