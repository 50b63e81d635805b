//! Waveform chart rasterization
//!
//! Draws the pulse waveform returned by the analysis service into an RGBA
//! pixel buffer: a faint reference grid, a stroked polyline with round
//! joins, and a low-opacity tint filling the area under the curve. A pure
//! function of the sample data and the style; rendering the same inputs
//! twice produces identical buffers.

use crate::render::RenderError;
use image::{Rgba, RgbaImage};

/// Visual parameters of the waveform chart
#[derive(Debug, Clone)]
pub struct WaveformStyle {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Panel background
    pub background: Rgba<u8>,
    /// Reference grid lines (faint)
    pub grid: Rgba<u8>,
    /// Polyline stroke
    pub stroke: Rgba<u8>,
    /// Area-under-curve tint (low opacity)
    pub fill: Rgba<u8>,
    /// Stroke thickness in pixels
    pub stroke_width: f32,
}

impl Default for WaveformStyle {
    fn default() -> Self {
        Self {
            width: 600,
            height: 200,
            background: Rgba([13, 20, 33, 255]),
            grid: Rgba([255, 255, 255, 26]),
            stroke: Rgba([0, 229, 255, 255]),
            fill: Rgba([0, 229, 255, 26]),
            stroke_width: 3.0,
        }
    }
}

impl WaveformStyle {
    /// Style with an explicit surface size
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

/// Map waveform samples to surface coordinates.
///
/// Point `i` of `N` samples lands at `(i * W/(N-1), H - (v/100) * H)`:
/// value 0 on the bottom edge, value 100 on the top edge, linear in
/// between. Samples outside 0-100 are clamped to the band.
pub fn plot_points(data: &[f64], width: u32, height: u32) -> Vec<(f32, f32)> {
    let w = width as f32;
    let h = height as f32;
    let step = w / (data.len().saturating_sub(1)).max(1) as f32;
    data.iter()
        .enumerate()
        .map(|(i, value)| {
            let value = value.clamp(0.0, 100.0) as f32;
            (i as f32 * step, h - (value / 100.0) * h)
        })
        .collect()
}

/// Render the waveform into a fresh RGBA buffer.
///
/// Fails with [`RenderError::InsufficientData`] when fewer than two samples
/// are given (a single point cannot be drawn as a line) and
/// [`RenderError::EmptySurface`] for a zero-area surface.
pub fn render(data: &[f64], style: &WaveformStyle) -> Result<RgbaImage, RenderError> {
    if data.len() < 2 {
        return Err(RenderError::InsufficientData { points: data.len() });
    }
    if style.width == 0 || style.height == 0 {
        return Err(RenderError::EmptySurface {
            width: style.width,
            height: style.height,
        });
    }

    let mut canvas = RgbaImage::from_pixel(style.width, style.height, style.background);
    draw_grid(&mut canvas, style);

    let points = plot_points(data, style.width, style.height);
    fill_under_curve(&mut canvas, &points, style.fill);
    for pair in points.windows(2) {
        stroke_segment(&mut canvas, pair[0], pair[1], style.stroke, style.stroke_width);
    }

    Ok(canvas)
}

/// 10 vertical and 5 horizontal divisions, edge to edge. Decorative; not
/// derived from the data.
fn draw_grid(canvas: &mut RgbaImage, style: &WaveformStyle) {
    let (width, height) = canvas.dimensions();
    let step_x = width as f32 / 10.0;
    let step_y = height as f32 / 5.0;

    for i in 0..=10 {
        let x = ((i as f32 * step_x).round() as u32).min(width - 1);
        for y in 0..height {
            blend_pixel(canvas, x as i64, y as i64, style.grid);
        }
    }
    for j in 0..=5 {
        let y = ((j as f32 * step_y).round() as u32).min(height - 1);
        for x in 0..width {
            blend_pixel(canvas, x as i64, y as i64, style.grid);
        }
    }
}

/// Tint every column from the interpolated curve down to the bottom edge.
fn fill_under_curve(canvas: &mut RgbaImage, points: &[(f32, f32)], tint: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    for x in 0..width {
        let curve_y = interpolate_y(points, x as f32 + 0.5);
        let top = curve_y.max(0.0) as u32;
        for y in top..height {
            blend_pixel(canvas, x as i64, y as i64, tint);
        }
    }
}

/// Linear interpolation of the polyline's y at an arbitrary x.
fn interpolate_y(points: &[(f32, f32)], x: f32) -> f32 {
    let (first_x, first_y) = points[0];
    if x <= first_x {
        return first_y;
    }
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
            return y0 + (y1 - y0) * t;
        }
    }
    points[points.len() - 1].1
}

/// Stroke one segment by stamping discs along it; the discs give the line
/// round caps and round joins where segments meet.
fn stroke_segment(canvas: &mut RgbaImage, from: (f32, f32), to: (f32, f32), color: Rgba<u8>, width: f32) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let length = (dx * dx + dy * dy).sqrt();
    let steps = length.ceil().max(1.0) as u32;
    let radius = (width / 2.0).max(0.5);

    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        stamp_disc(canvas, from.0 + dx * t, from.1 + dy * t, radius, color);
    }
}

fn stamp_disc(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let min_x = (cx - radius).floor() as i64;
    let max_x = (cx + radius).ceil() as i64;
    let min_y = (cy - radius).floor() as i64;
    let max_y = (cy + radius).ceil() as i64;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                blend_pixel(canvas, x, y, color);
            }
        }
    }
}

/// Source-over blend of one pixel; coordinates outside the surface are
/// clipped, matching canvas edge behavior.
fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
        return;
    }
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    let alpha = color.0[3] as f32 / 255.0;
    for channel in 0..3 {
        let blended = color.0[channel] as f32 * alpha + pixel.0[channel] as f32 * (1.0 - alpha);
        pixel.0[channel] = blended.round() as u8;
    }
    pixel.0[3] = 255;
}
