//! PNG bar chart of the inactivity histogram.

use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};

use crate::core::histogram::Histogram;

/// Default file name for the rendered histogram.
pub const DEFAULT_PLOT_PATH: &str = "mlists.png";

pub const WIDTH: u32 = 640;
pub const HEIGHT: u32 = 480;
const MARGIN: u32 = 40;
const BAR_GAP: u32 = 1;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const BAR: Rgb<u8> = Rgb([31, 119, 180]);

/// Draw one bar per bucket, heights scaled to the tallest bucket.
///
/// The canvas widens past [`WIDTH`] when there are more buckets than plot
/// columns, so every bucket gets at least one column inside the margins.
pub fn render_histogram(histogram: &Histogram) -> RgbImage {
    let buckets = histogram.counts.len().max(1) as u32;
    let width = WIDTH.max(2 * MARGIN + buckets);
    let mut canvas = RgbImage::from_pixel(width, HEIGHT, BACKGROUND);
    let plot_width = width - 2 * MARGIN;
    let plot_height = HEIGHT - 2 * MARGIN;
    let baseline = HEIGHT - MARGIN;

    let tallest = histogram.tallest();
    if tallest > 0 {
        for (index, &count) in histogram.counts.iter().enumerate() {
            let (left, next) = bucket_columns(index as u32, buckets, plot_width);
            let right = next.saturating_sub(BAR_GAP).max(left + 1);
            let bar_height = (count as u64 * u64::from(plot_height) / tallest as u64) as u32;
            fill_rect(&mut canvas, left, baseline - bar_height, right, baseline, BAR);
        }
    }

    fill_rect(&mut canvas, MARGIN, baseline, MARGIN + plot_width, baseline + 1, AXIS);
    fill_rect(&mut canvas, MARGIN - 1, MARGIN, MARGIN, baseline + 1, AXIS);
    canvas
}

/// Left edge of bucket `index` and of the bucket after it.
fn bucket_columns(index: u32, buckets: u32, plot_width: u32) -> (u32, u32) {
    let edge = |i: u32| MARGIN + (u64::from(i) * u64::from(plot_width) / u64::from(buckets)) as u32;
    (edge(index), edge(index + 1))
}

/// Render and save the histogram as PNG.
pub fn write_histogram_png(path: &Path, histogram: &Histogram) -> Result<()> {
    render_histogram(histogram)
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("write {}", path.display()))
}

fn fill_rect(canvas: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(canvas.height()) {
        for x in x0..x1.min(canvas.width()) {
            canvas.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taller_bucket_draws_taller_bar() {
        let histogram = Histogram {
            min: 0,
            max: 10,
            counts: vec![1, 2],
        };
        let canvas = render_histogram(&histogram);
        let slot = (WIDTH - 2 * MARGIN) / 2;
        let column_height = |x: u32| {
            (MARGIN..HEIGHT - MARGIN)
                .filter(|&y| *canvas.get_pixel(x, y) == BAR)
                .count()
        };
        let first = column_height(MARGIN + slot / 2);
        let second = column_height(MARGIN + slot + slot / 2);
        assert_eq!(second, (HEIGHT - 2 * MARGIN) as usize);
        assert_eq!(first, second / 2);
    }

    #[test]
    fn every_bucket_lands_inside_plot_area() {
        let values: Vec<u64> = (0..2000).collect();
        let histogram = Histogram::build(&values);
        assert_eq!(histogram.counts.len(), 1000);
        let canvas = render_histogram(&histogram);
        let plot_width = canvas.width() - 2 * MARGIN;
        let bar_row = HEIGHT - MARGIN - 1;
        for index in 0..1000 {
            let (left, _) = bucket_columns(index, 1000, plot_width);
            assert_eq!(*canvas.get_pixel(left, bar_row), BAR, "bucket {index}");
        }
        for x in canvas.width() - MARGIN..canvas.width() {
            assert_ne!(*canvas.get_pixel(x, bar_row), BAR);
        }
    }

    #[test]
    fn empty_histogram_renders_axes_only() {
        let canvas = render_histogram(&Histogram::build(&[]));
        assert!(canvas.pixels().all(|pixel| *pixel != BAR));
        assert_eq!(*canvas.get_pixel(MARGIN + 5, HEIGHT - MARGIN), AXIS);
    }

    #[test]
    fn writes_png_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("mlists.png");
        write_histogram_png(&path, &Histogram::build(&[3, 9, 27, 81])).expect("write");
        let decoded = image::open(&path).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (WIDTH, HEIGHT));
    }
}
