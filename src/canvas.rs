// canvas.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Indexed color drawing surface
use crate::error::{Error, Result};
use crate::palette::{Color, Palette};
use crate::shape::{round, PixelMap, Shape};
use pix::gray::{Gray, Gray8};
use pix::Raster;

/// Dense grid of palette colors.
///
/// Row 0 is the bottom of the image; [index_stream] flips rows into the
/// top-down order of GIF image data.
///
/// [index_stream]: struct.Canvas.html#method.index_stream
pub struct Canvas {
    /// Palette for color indices
    palette: Palette,
    /// Background color
    background: Color,
    /// Color indices
    raster: Raster<Gray8>,
    /// Origin offset
    origin: (f64, f64),
    /// Saved origin
    saved_origin: Option<(f64, f64)>,
}

impl Canvas {
    /// Create a new canvas filled with white
    pub fn new(width: u16, height: u16, palette: Palette) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions);
        }
        let raster = Raster::with_clear(width.into(), height.into());
        let mut canvas = Canvas {
            palette,
            background: Color::White,
            raster,
            origin: (0.0, 0.0),
            saved_origin: None,
        };
        canvas.clear();
        Ok(canvas)
    }

    /// Set the background color, clearing the canvas
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self.clear();
        self
    }

    /// Get the width
    pub fn width(&self) -> u16 {
        self.raster.width() as u16
    }

    /// Get the height
    pub fn height(&self) -> u16 {
        self.raster.height() as u16
    }

    /// Get the center point
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width()) / 2.0, f64::from(self.height()) / 2.0)
    }

    /// Get the palette
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Get the current origin
    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    /// Reset every cell to the background color
    pub fn clear(&mut self) {
        let bg = Gray8::new(self.palette.index(self.background));
        let (w, h) = (self.raster.width() as i32, self.raster.height() as i32);
        for y in 0..h {
            for x in 0..w {
                *self.raster.pixel_mut(x, y) = bg;
            }
        }
    }

    /// Get the color of one cell
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.contains(x, y) {
            let idx = u8::from(Gray::value(self.raster.pixel(x, y)));
            self.palette.color(idx)
        } else {
            None
        }
    }

    /// Check if a cell is on the canvas
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && x < i32::from(self.width())
            && y < i32::from(self.height())
    }

    /// Commit pixels relative to the origin; pixels off the canvas are
    /// dropped.
    pub fn commit(&mut self, pixels: &PixelMap) {
        let (ox, oy) = self.origin;
        for ((x, y), color) in pixels.iter() {
            let x = round(f64::from(*x) + ox);
            let y = round(f64::from(*y) + oy);
            if self.contains(x, y) {
                let idx = self.palette.index(*color);
                *self.raster.pixel_mut(x, y) = Gray8::new(idx);
            }
        }
    }

    /// Rasterize a shape and commit it
    pub fn draw(&mut self, shape: &Shape) {
        self.commit(&shape.pixels());
    }

    /// Move the origin, relative to the current origin
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.origin = (self.origin.0 + dx, self.origin.1 + dy);
    }

    /// Save the current origin
    pub fn save_origin(&mut self) {
        self.saved_origin = Some(self.origin);
    }

    /// Restore the most recently saved origin.
    ///
    /// Must be paired with a prior call to [save_origin].
    ///
    /// [save_origin]: struct.Canvas.html#method.save_origin
    pub fn restore_origin(&mut self) {
        match self.saved_origin {
            Some(origin) => self.origin = origin,
            None => warn!("restore_origin without save_origin"),
        }
    }

    /// Get color indices in GIF scan order (top row first)
    pub fn index_stream(&self) -> Vec<u8> {
        let (w, h) = (self.raster.width(), self.raster.height());
        let mut stream = Vec::with_capacity(w as usize * h as usize);
        for y in (0..h as i32).rev() {
            for x in 0..w as i32 {
                stream.push(u8::from(Gray::value(self.raster.pixel(x, y))));
            }
        }
        stream
    }
}
