// lib.rs      sketchgif crate.
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Draw simple vector shapes on an eight color canvas and write them out as
//! animated GIF frames.
//!
//! * [Shape]s rasterize into [PixelMap]s
//! * a [Canvas] commits pixel maps onto a grid of palette colors
//! * a [GifWriter] compresses each canvas state into a GIF frame
//!
//! [Canvas]: struct.Canvas.html
//! [GifWriter]: struct.GifWriter.html
//! [PixelMap]: struct.PixelMap.html
//! [Shape]: enum.Shape.html
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

pub mod block;
mod canvas;
mod encode;
mod error;
pub mod lzw;
pub mod pack;
mod palette;
mod shape;
mod writer;

pub use crate::canvas::Canvas;
pub use crate::error::{Error, Result};
pub use crate::palette::{Color, Palette};
pub use crate::shape::{overlay, PixelMap, Shape};
pub use crate::writer::{FrameOptions, GifWriter};
