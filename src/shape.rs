// shape.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Vector shape rasterization
use crate::error::{Error, Result};
use crate::palette::Color;
use std::collections::hash_map::{HashMap, Iter};

/// Round to the nearest integer, ties to even
pub(crate) fn round(v: f64) -> i32 {
    v.round_ties_even() as i32
}

/// Sparse mapping from pixel coordinates to colors.
///
/// Coordinates are not bounded; clipping happens when a map is committed
/// to a [Canvas](struct.Canvas.html).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelMap {
    pixels: HashMap<(i32, i32), Color>,
}

impl PixelMap {
    /// Create an empty pixel map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one pixel, replacing any color already there
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        self.pixels.insert((x, y), color);
    }

    /// Get the color of one pixel
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.pixels.get(&(x, y)).copied()
    }

    /// Get the number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the map has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Iterate over all pixels (unordered)
    pub fn iter(&self) -> Iter<'_, (i32, i32), Color> {
        self.pixels.iter()
    }

    /// Overlay another map on top of this one.
    ///
    /// Pixels from `top` win at shared coordinates.
    pub fn overlay(mut self, top: PixelMap) -> Self {
        self.pixels.extend(top.pixels);
        self
    }

    /// Get a copy moved by an offset
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        let pixels = self
            .pixels
            .iter()
            .map(|((x, y), c)| ((x + dx, y + dy), *c))
            .collect();
        PixelMap { pixels }
    }
}

/// Overlay a sequence of maps; later maps win at shared coordinates.
pub fn overlay<I: IntoIterator<Item = PixelMap>>(maps: I) -> PixelMap {
    maps.into_iter().fold(PixelMap::new(), PixelMap::overlay)
}

/// Vector shape primitive
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Straight line between two points
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    },
    /// Circle outline
    Circle {
        xmid: f64,
        ymid: f64,
        r: f64,
        color: Color,
    },
    /// Filled square of side `2 * r`
    Point { x: f64, y: f64, r: i32, color: Color },
    /// Lines connecting a sequence of points
    Polyline {
        points: Vec<(f64, f64)>,
        color: Color,
        close: bool,
    },
    /// Sampled function graph.
    ///
    /// Each run is a stretch of samples without a discontinuity.  The last
    /// run is drawn closed, all others open.
    Curve {
        runs: Vec<Vec<(f64, f64)>>,
        color: Color,
    },
}

impl Shape {
    /// Create a line
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, color: Color) -> Self {
        Shape::Line {
            x1,
            y1,
            x2,
            y2,
            color,
        }
    }

    /// Create a circle
    pub fn circle(xmid: f64, ymid: f64, r: f64, color: Color) -> Self {
        Shape::Circle {
            xmid,
            ymid,
            r,
            color,
        }
    }

    /// Create a 2x2 point
    pub fn point(x: f64, y: f64, color: Color) -> Self {
        Self::point_sized(x, y, 1, color)
    }

    /// Create a point with a half-width of `r` pixels
    pub fn point_sized(x: f64, y: f64, r: i32, color: Color) -> Self {
        Shape::Point { x, y, r, color }
    }

    /// Create a polyline
    pub fn polyline(points: &[(f64, f64)], color: Color, close: bool) -> Self {
        Shape::Polyline {
            points: points.to_vec(),
            color,
            close,
        }
    }

    /// Create a curve by sampling a function.
    ///
    /// `f` is evaluated at `xmin`, `xmin + resolution`, ... up to `xmax`
    /// inclusive.  A sample returning [DivisionByZero] (or a non-finite
    /// value) is dropped, and the curve is split there instead of bridging
    /// the gap.  Any other error is returned.
    ///
    /// [DivisionByZero]: enum.Error.html#variant.DivisionByZero
    pub fn sampled_curve<F>(
        mut f: F,
        xmin: i32,
        xmax: i32,
        color: Color,
        resolution: u32,
    ) -> Result<Self>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        let step = resolution.max(1) as usize;
        let mut runs = vec![];
        let mut run = vec![];
        for x in (xmin..=xmax).step_by(step) {
            let x = f64::from(x);
            match f(x) {
                Ok(y) if y.is_finite() => run.push((x, y)),
                Ok(_) | Err(Error::DivisionByZero) => {
                    debug!("curve discontinuity at x = {}", x);
                    if !run.is_empty() {
                        runs.push(std::mem::take(&mut run));
                    }
                }
                Err(e) => return Err(e),
            }
        }
        runs.push(run);
        Ok(Shape::Curve { runs, color })
    }

    /// Rasterize into a pixel map
    pub fn pixels(&self) -> PixelMap {
        match self {
            Shape::Line {
                x1,
                y1,
                x2,
                y2,
                color,
            } => line_pixels(*x1, *y1, *x2, *y2, *color),
            Shape::Circle {
                xmid,
                ymid,
                r,
                color,
            } => circle_pixels(*xmid, *ymid, *r, *color),
            Shape::Point { x, y, r, color } => point_pixels(*x, *y, *r, *color),
            Shape::Polyline {
                points,
                color,
                close,
            } => polyline_pixels(points, *color, *close),
            Shape::Curve { runs, color } => {
                let last = runs.len().saturating_sub(1);
                overlay(runs.iter().enumerate().map(|(i, run)| {
                    polyline_pixels(run, *color, i == last)
                }))
            }
        }
    }
}

/// Rasterize a line, one pixel per unit step along the dominant axis
fn line_pixels(x1: f64, y1: f64, x2: f64, y2: f64, color: Color) -> PixelMap {
    let mut pixels = PixelMap::new();
    let vertical = x2 - x1 == 0.0;
    let k = if vertical { 0.0 } else { (y2 - y1) / (x2 - x1) };
    let steep = vertical || k.abs() > 1.0;
    if steep {
        let (x0, y0) = if y2 < y1 { (x2, y2) } else { (x1, y1) };
        let k = if vertical { 0.0 } else { k.recip() };
        for step in 0..=round((y1 - y2).abs()) {
            let step = f64::from(step);
            pixels.set(round(x0 + step * k), round(y0 + step), color);
        }
    } else {
        let (x0, y0) = if x2 < x1 { (x2, y2) } else { (x1, y1) };
        for step in 0..=round((x1 - x2).abs()) {
            let step = f64::from(step);
            pixels.set(round(x0 + step), round(y0 + step * k), color);
        }
    }
    pixels
}

/// Rasterize a circle from one octant mirrored eight ways
fn circle_pixels(xmid: f64, ymid: f64, r: f64, color: Color) -> PixelMap {
    let mut x = f64::from(round(r));
    let mut y = 0.0;
    let mut octant = vec![(x, y)];
    while x >= y {
        // rounding error can make the radicand slightly negative
        x = (x * x - 2.0 * y - 1.0).max(0.0).sqrt();
        y += 1.0;
        octant.push((x, y));
    }
    let mut pixels = PixelMap::new();
    for (x, y) in octant {
        for (px, py) in [(x, y), (y, x)] {
            for (sx, sy) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)]
            {
                pixels.set(round(sx * px + xmid), round(sy * py + ymid), color);
            }
        }
    }
    pixels
}

/// Rasterize a filled square centered on a point
fn point_pixels(x: f64, y: f64, r: i32, color: Color) -> PixelMap {
    let (x, y) = (round(x), round(y));
    let mut pixels = PixelMap::new();
    for px in x - r..x + r {
        for py in y - r..y + r {
            pixels.set(px, py, color);
        }
    }
    pixels
}

/// Rasterize lines between consecutive points
fn polyline_pixels(points: &[(f64, f64)], color: Color, close: bool)
    -> PixelMap
{
    let segments = points.windows(2).map(|w| (w[0], w[1]));
    let closing = match (points.first(), points.last()) {
        (Some(first), Some(last)) if close => Some((*last, *first)),
        _ => None,
    };
    overlay(segments.chain(closing).map(|((x1, y1), (x2, y2))| {
        line_pixels(x1, y1, x2, y2, color)
    }))
}
