// block.rs
//
// Copyright (c) 2019  Douglas Lau
//
//! GIF blocks
use crate::palette::Palette;

/// Global color table size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTableConfig {
    table_len: usize,   // must be between 2...256
}

impl ColorTableConfig {
    pub fn new(table_len: u16) -> Self {
        let table_len = (table_len as usize).max(2).next_power_of_two().min(256);
        ColorTableConfig { table_len }
    }
    /// Global table config for a palette
    pub fn with_palette(palette: &Palette) -> Self {
        Self::new(palette.len() as u16)
    }
    fn len_bits(&self) -> u8 {
        let sz = self.table_len;
        for b in 0..7 {
            if (sz >> (b + 1)) == 1 {
                return b;
            }
        }
        7
    }
}

/// Frame disposal method
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisposalMethod {
    Keep,
    Background,
}

impl Default for DisposalMethod {
    fn default() -> Self {
        DisposalMethod::Keep
    }
}

impl DisposalMethod {
    /// Get disposal for a frame which overlaps (keeps) the previous one
    pub fn with_overlap(overlap: bool) -> Self {
        if overlap {
            DisposalMethod::Keep
        } else {
            DisposalMethod::Background
        }
    }
}

impl From<DisposalMethod> for u8 {
    fn from(d: DisposalMethod) -> Self {
        use self::DisposalMethod::*;
        match d {
            Keep => 1,
            Background => 2,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BlockCode {
    Extension_,
    ImageDesc_,
    Trailer_,
}

impl BlockCode {
    pub fn signature(&self) -> &'static [u8] {
        use self::BlockCode::*;
        match self {
            ImageDesc_ => b",", // (0x2C) Image separator
            Extension_ => b"!", // (0x21) Extension introducer
            Trailer_ => b";",   // (0x3B) GIF trailer
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ExtensionCode {
    PlainText_,
    GraphicControl_,
    Application_,
}

impl From<ExtensionCode> for u8 {
    fn from(t: ExtensionCode) -> Self {
        use self::ExtensionCode::*;
        match t {
            PlainText_ => 0x01,
            GraphicControl_ => 0xF9,
            Application_ => 0xFF,
        }
    }
}

#[derive(Debug)]
pub struct Header {
    version: [u8; 3],
}

impl Default for Header {
    fn default() -> Self {
        Self::with_version(*b"89a")
    }
}

impl Header {
    pub fn with_version(version: [u8; 3]) -> Self {
        Header { version }
    }
    pub fn version(&self) -> [u8; 3] {
        self.version
    }
}

#[derive(Debug, Default)]
pub struct LogicalScreenDesc {
    screen_width: u16,
    screen_height: u16,
    flags: u8,
    background_color_idx: u8,   // index into global color table
    pixel_aspect_ratio: u8,
}

impl LogicalScreenDesc {
    const COLOR_TABLE_PRESENT: u8  = 0b1000_0000;
    const COLOR_RESOLUTION: u8     = 0b0111_0000;
    const COLOR_TABLE_SIZE: u8     = 0b0000_0111;

    pub fn with_screen_width(mut self, screen_width: u16) -> Self {
        self.screen_width = screen_width;
        self
    }
    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }
    pub fn with_screen_height(mut self, screen_height: u16) -> Self {
        self.screen_height = screen_height;
        self
    }
    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }
    pub fn flags(&self) -> u8 {
        self.flags
    }
    pub fn with_color_table_config(mut self, tbl: &ColorTableConfig) -> Self {
        let mut flags = self.flags & Self::COLOR_RESOLUTION;
        flags |= tbl.len_bits() & Self::COLOR_TABLE_SIZE;
        flags |= Self::COLOR_TABLE_PRESENT;
        self.flags = flags;
        self
    }
    /// Set color resolution (bits per primary color, 1...8)
    pub fn with_color_resolution(mut self, bits: u8) -> Self {
        let res = (bits.max(1).min(8) - 1) << 4;
        self.flags = (self.flags & !Self::COLOR_RESOLUTION) | res;
        self
    }
    pub fn with_background_color_idx(mut self, background_color_idx: u8)
        -> Self
    {
        self.background_color_idx = background_color_idx;
        self
    }
    pub fn background_color_idx(&self) -> u8 {
        self.background_color_idx
    }
    pub fn pixel_aspect_ratio(&self) -> u8 {
        self.pixel_aspect_ratio
    }
}

#[derive(Debug)]
pub struct GlobalColorTable {
    colors: Vec<u8>,
}

impl GlobalColorTable {
    pub fn with_palette(palette: &Palette) -> Self {
        GlobalColorTable { colors: palette.colors() }
    }
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }
}

/// Plain text extension: text drawn on a grid of 8x8 character cells
#[derive(Debug, Default)]
pub struct PlainText {
    left: u16,
    top: u16,
    foreground_idx: u8,
    background_idx: u8,
    text: Vec<u8>,
}

impl PlainText {
    pub const CELL_SIZE: u8 = 8;

    pub fn with_text(text: &str) -> Self {
        let text = text.bytes().collect();
        PlainText { text, ..Default::default() }
    }
    pub fn with_left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }
    pub fn left(&self) -> u16 {
        self.left
    }
    pub fn with_top(mut self, top: u16) -> Self {
        self.top = top;
        self
    }
    pub fn top(&self) -> u16 {
        self.top
    }
    pub fn with_foreground_idx(mut self, foreground_idx: u8) -> Self {
        self.foreground_idx = foreground_idx;
        self
    }
    pub fn foreground_idx(&self) -> u8 {
        self.foreground_idx
    }
    pub fn with_background_idx(mut self, background_idx: u8) -> Self {
        self.background_idx = background_idx;
        self
    }
    pub fn background_idx(&self) -> u8 {
        self.background_idx
    }
    /// Text grid width in pixels (one cell per character)
    pub fn grid_width(&self) -> u16 {
        (self.text.len() * usize::from(Self::CELL_SIZE)).min(0xFFFF) as u16
    }
    /// Text grid height in pixels (one row of cells)
    pub fn grid_height(&self) -> u16 {
        Self::CELL_SIZE.into()
    }
    pub fn text(&self) -> &[u8] {
        &self.text
    }
}

#[derive(Debug, Default)]
pub struct GraphicControl {
    flags: u8,
    delay_time_cs: u16,      // delay in centiseconds (hundredths of a second)
    transparent_color_idx: u8,
}

impl GraphicControl {
    const DISPOSAL_METHOD: u8   = 0b0001_1100;

    pub fn flags(&self) -> u8 {
        self.flags
    }
    pub fn with_disposal_method(mut self, disposal_method: DisposalMethod)
        -> Self
    {
        let d: u8 = disposal_method.into();
        self.flags = (self.flags & !Self::DISPOSAL_METHOD) | (d << 2);
        self
    }
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }
    pub fn with_delay_time_cs(mut self, delay_time_cs: u16) -> Self {
        self.delay_time_cs = delay_time_cs;
        self
    }
    pub fn transparent_color_idx(&self) -> u8 {
        self.transparent_color_idx
    }
}

#[derive(Debug, Default)]
pub struct Application {
    app_data: Vec<Vec<u8>>,     // sequence of sub-blocks
}

impl Application {
    pub fn with_loop_count(loop_count: u16) -> Self {
        let mut app_data = vec![];
        app_data.push(b"NETSCAPE2.0".to_vec());
        let mut v = vec![1];
        v.extend_from_slice(&loop_count.to_le_bytes());
        app_data.push(v);
        Application { app_data }
    }
    pub fn app_data(&self) -> &Vec<Vec<u8>> {
        &self.app_data
    }
}

#[derive(Debug, Default)]
pub struct ImageDesc {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    flags: u8,
}

impl ImageDesc {
    pub fn with_left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }
    pub fn left(&self) -> u16 {
        self.left
    }
    pub fn with_top(mut self, top: u16) -> Self {
        self.top = top;
        self
    }
    pub fn top(&self) -> u16 {
        self.top
    }
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }
    pub fn width(&self) -> u16 {
        self.width
    }
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }
    pub fn height(&self) -> u16 {
        self.height
    }
    pub fn flags(&self) -> u8 {
        self.flags
    }
}

#[derive(Debug)]
pub struct ImageData {
    min_code_size: u8,
    data: Vec<u8>,  // uncompressed color indices
}

impl ImageData {
    pub fn with_indices(min_code_size: u8, data: Vec<u8>) -> Self {
        ImageData { min_code_size, data }
    }
    pub fn min_code_size(&self) -> u8 {
        self.min_code_size.max(2)    // must be >= 2
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Debug, Default)]
pub struct Trailer { }

#[derive(Debug)]
pub enum Block {
    Header(Header),
    LogicalScreenDesc(LogicalScreenDesc),
    GlobalColorTable(GlobalColorTable),
    PlainText(PlainText),
    GraphicControl(GraphicControl),
    Application(Application),
    ImageDesc(ImageDesc),
    ImageData(ImageData),
    Trailer(Trailer),
}

impl From<Header> for Block {
    fn from(b: Header) -> Self {
        Block::Header(b)
    }
}

impl From<LogicalScreenDesc> for Block {
    fn from(b: LogicalScreenDesc) -> Self {
        Block::LogicalScreenDesc(b)
    }
}

impl From<GlobalColorTable> for Block {
    fn from(b: GlobalColorTable) -> Self {
        Block::GlobalColorTable(b)
    }
}

impl From<PlainText> for Block {
    fn from(b: PlainText) -> Self {
        Block::PlainText(b)
    }
}

impl From<GraphicControl> for Block {
    fn from(b: GraphicControl) -> Self {
        Block::GraphicControl(b)
    }
}

impl From<Application> for Block {
    fn from(b: Application) -> Self {
        Block::Application(b)
    }
}

impl From<ImageDesc> for Block {
    fn from(b: ImageDesc) -> Self {
        Block::ImageDesc(b)
    }
}

impl From<ImageData> for Block {
    fn from(b: ImageData) -> Self {
        Block::ImageData(b)
    }
}

impl From<Trailer> for Block {
    fn from(b: Trailer) -> Self {
        Block::Trailer(b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn color_table_len() {
        assert_eq!(ColorTableConfig::new(0).len_bits(), 0); // 0-2
        assert_eq!(ColorTableConfig::new(7).len_bits(), 2); // 5-8
        assert_eq!(ColorTableConfig::new(130).len_bits(), 7); // 129-256
        let t = ColorTableConfig::with_palette(&Palette::default());
        assert_eq!(t.len_bits(), 2);
    }

    #[test]
    fn screen_flags() {
        let tbl = ColorTableConfig::with_palette(&Palette::default());
        let d = LogicalScreenDesc::default()
            .with_color_resolution(8)
            .with_color_table_config(&tbl);
        assert_eq!(d.flags(), 0xF2);
    }

    #[test]
    fn disposal_flags() {
        let gc = GraphicControl::default()
            .with_disposal_method(DisposalMethod::with_overlap(true));
        assert_eq!(gc.flags(), 0b0000_0100);
        let gc = gc.with_disposal_method(DisposalMethod::with_overlap(false));
        assert_eq!(gc.flags(), 0b0000_1000);
    }

    #[test]
    fn loop_count() {
        let b = Application::with_loop_count(0);
        assert_eq!(b.app_data()[0], b"NETSCAPE2.0".to_vec());
        assert_eq!(b.app_data()[1], vec![1, 0, 0]);
        let b = Application::with_loop_count(0x1234);
        assert_eq!(b.app_data()[1], vec![1, 0x34, 0x12]);
    }

    #[test]
    fn plain_text_grid() {
        let t = PlainText::with_text("Hi there");
        assert_eq!(t.grid_width(), 64);
        assert_eq!(t.grid_height(), 8);
    }
}
