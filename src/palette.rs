// palette.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Fixed eight color palette
use crate::error::{Error, Result};
use pix::rgb::{Rgb, SRgb8};
use std::fmt;
use std::str::FromStr;

/// Number of entries in the palette
const PALETTE_LEN: usize = 8;

/// Symbolic palette color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl Color {
    /// All colors, in palette order
    pub const ALL: [Color; PALETTE_LEN] = [
        Color::White,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
    ];

    /// Get the symbolic name
    pub fn name(self) -> &'static str {
        use self::Color::*;
        match self {
            White => "white",
            Black => "black",
            Red => "red",
            Green => "green",
            Blue => "blue",
            Yellow => "yellow",
            Magenta => "magenta",
            Cyan => "cyan",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::InvalidColor(name.to_string()))
    }
}

/// Palette mapping each [Color] to an RGB triple and a color index.
///
/// Entry order is fixed; the position of a color is its index in the
/// global color table.
///
/// [Color]: enum.Color.html
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    entries: [(Color, SRgb8); PALETTE_LEN],
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            entries: [
                (Color::White, SRgb8::new(255, 255, 255)),
                (Color::Black, SRgb8::new(0, 0, 0)),
                (Color::Red, SRgb8::new(243, 16, 0)),
                (Color::Green, SRgb8::new(18, 206, 8)),
                (Color::Blue, SRgb8::new(0, 0, 255)),
                (Color::Yellow, SRgb8::new(255, 255, 0)),
                (Color::Magenta, SRgb8::new(255, 0, 255)),
                (Color::Cyan, SRgb8::new(0, 255, 255)),
            ],
        }
    }
}

impl Palette {
    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the number of index bits (log2 of entry count)
    pub fn index_bits(&self) -> u8 {
        self.len().trailing_zeros() as u8
    }

    /// Get the color index of a color
    pub fn index(&self, color: Color) -> u8 {
        self.entries
            .iter()
            .position(|(c, _)| *c == color)
            .unwrap_or(0) as u8
    }

    /// Get the color at an index
    pub fn color(&self, idx: u8) -> Option<Color> {
        self.entries.get(usize::from(idx)).map(|(c, _)| *c)
    }

    /// Get the RGB value of a color
    pub fn rgb(&self, color: Color) -> SRgb8 {
        self.entries[usize::from(self.index(color))].1
    }

    /// Get the color table as packed RGB bytes
    pub fn colors(&self) -> Vec<u8> {
        let mut colors = Vec::with_capacity(self.len() * 3);
        for (_, rgb) in self.entries.iter() {
            colors.push(u8::from(Rgb::red(*rgb)));
            colors.push(u8::from(Rgb::green(*rgb)));
            colors.push(u8::from(Rgb::blue(*rgb)));
        }
        colors
    }
}
