//! Photo colour sampling.
//!
//! Reduces a photo to one flat "cartoon" colour: the photo is squared,
//! resized, smoothed, and a small central grid is posterized into buckets.
//! The most populated bucket wins and its unquantized pixels are averaged.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use tracing::debug;

use crate::config::RenderOptions;
use crate::error::{EmojiError, Result};
use crate::types::{Colour, Region, MAX_SIZE};

/// PIL-style SMOOTH kernel; `filter3x3` normalizes by its sum (13).
const SMOOTH_KERNEL: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];

/// Side of the grid the sample region is reduced to before averaging.
const GRID_SIDE: u32 = 10;

/// Decode raw photo bytes in any format the `image` crate recognises.
pub fn decode_photo(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(EmojiError::EmptyInput);
    }
    image::load_from_memory(bytes).map_err(|e| EmojiError::Decode {
        message: e.to_string(),
    })
}

/// Keep the top `bits` bits of a channel value.
pub fn posterize(value: u8, bits: u8) -> u8 {
    let shift = 8 - bits.clamp(1, 8);
    (value >> shift) << shift
}

/// Colour sampler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    working_size: u32,
    posterize_bits: u8,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_options(&RenderOptions::default())
    }
}

impl Sampler {
    pub fn from_options(opts: &RenderOptions) -> Self {
        Self {
            working_size: opts.working_size.clamp(8, MAX_SIZE),
            posterize_bits: opts.posterize_bits.clamp(1, 8),
        }
    }

    /// Working canvas side; sample regions are expressed in these coordinates.
    pub fn working_size(&self) -> u32 {
        self.working_size
    }

    /// Decode `bytes` and sample them.
    pub fn sample_bytes(&self, bytes: &[u8], region: Option<Region>) -> Result<Colour> {
        let photo = decode_photo(bytes)?;
        Ok(self.sample(&photo, region))
    }

    /// Sample a decoded photo.
    ///
    /// `region` is a box on the squared, resized working canvas; `None`
    /// samples the middle quarter of the area. A region mixing several
    /// colours yields its majority colour, not a blend.
    pub fn sample(&self, photo: &DynamicImage, region: Option<Region>) -> Colour {
        let working = self.prepare(photo);
        let smooth = imageops::filter3x3(&working, &SMOOTH_KERNEL);

        // filter3x3 leaves the outermost ring unfiltered, so sample inside it.
        let interior = self.working_size - 2;
        let region = region.unwrap_or_else(|| Region::centre_of(self.working_size));
        let inner = Region::new(
            region.x.saturating_sub(1),
            region.y.saturating_sub(1),
            region.width,
            region.height,
        )
        .clamp_to(interior, interior);

        let patch =
            imageops::crop_imm(&smooth, inner.x + 1, inner.y + 1, inner.width, inner.height)
                .to_image();
        let grid = imageops::resize(&patch, GRID_SIDE, GRID_SIDE, FilterType::Triangle);

        let colour = dominant_mean(&grid, self.posterize_bits);
        debug!(%colour, ?region, "sampled photo colour");
        colour
    }

    /// Crop to a centred square and resize to the working size.
    fn prepare(&self, photo: &DynamicImage) -> RgbImage {
        let rgb = photo.to_rgb8();
        let (w, h) = rgb.dimensions();
        let side = w.min(h).max(1);
        let square = imageops::crop_imm(&rgb, (w - side) / 2, (h - side) / 2, side, side).to_image();
        imageops::resize(
            &square,
            self.working_size,
            self.working_size,
            FilterType::Lanczos3,
        )
    }
}

struct Bucket {
    key: [u8; 3],
    count: u32,
    sum: [u32; 3],
}

/// Mean of the pixels in the most populated posterize bucket.
///
/// Ties go to the bucket seen first in row-major order.
fn dominant_mean(grid: &RgbImage, bits: u8) -> Colour {
    let mut buckets: Vec<Bucket> = Vec::new();

    for pixel in grid.pixels() {
        let [r, g, b] = pixel.0;
        let key = [posterize(r, bits), posterize(g, bits), posterize(b, bits)];
        let bucket = match buckets.iter_mut().position(|bk| bk.key == key) {
            Some(i) => &mut buckets[i],
            None => {
                buckets.push(Bucket {
                    key,
                    count: 0,
                    sum: [0; 3],
                });
                let last = buckets.len() - 1;
                &mut buckets[last]
            }
        };
        bucket.count += 1;
        bucket.sum[0] += u32::from(r);
        bucket.sum[1] += u32::from(g);
        bucket.sum[2] += u32::from(b);
    }

    let mut best: Option<&Bucket> = None;
    for bucket in &buckets {
        if best.map_or(true, |b| bucket.count > b.count) {
            best = Some(bucket);
        }
    }

    match best {
        Some(b) => Colour::rgb(
            (b.sum[0] / b.count) as u8,
            (b.sum[1] / b.count) as u8,
            (b.sum[2] / b.count) as u8,
        ),
        None => Colour::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(rgb));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn assert_close(actual: Colour, expected: [u8; 3]) {
        let got = [actual.r, actual.g, actual.b];
        for (a, e) in got.iter().zip(expected.iter()) {
            assert!(
                (i16::from(*a) - i16::from(*e)).abs() <= 1,
                "expected {:?}, got {:?}",
                expected,
                got
            );
        }
    }

    #[test]
    fn test_posterize_three_bits() {
        assert_eq!(posterize(255, 3), 224);
        assert_eq!(posterize(31, 3), 0);
        assert_eq!(posterize(32, 3), 32);
        assert_eq!(posterize(200, 8), 200);
        assert_eq!(posterize(200, 0), 128); // clamped to 1 bit
    }

    #[test]
    fn test_monochrome_photo_keeps_colour() {
        let sampler = Sampler::default();
        for rgb in [[200, 100, 50], [17, 203, 99], [0, 0, 0], [255, 255, 255]] {
            let colour = sampler.sample_bytes(&solid_png(64, 48, rgb), None).unwrap();
            assert_close(colour, rgb);
            assert!(colour.is_opaque());
        }
    }

    #[test]
    fn test_photo_smaller_than_working_size() {
        let colour = Sampler::default()
            .sample_bytes(&solid_png(3, 5, [10, 20, 30]), None)
            .unwrap();
        assert_close(colour, [10, 20, 30]);
    }

    #[test]
    fn test_single_pixel_photo() {
        let colour = Sampler::default()
            .sample_bytes(&solid_png(1, 1, [90, 180, 45]), None)
            .unwrap();
        assert_close(colour, [90, 180, 45]);
    }

    #[test]
    fn test_centre_dominates_border() {
        // Red frame around a large green centre.
        let mut img = RgbImage::from_pixel(100, 100, Rgb([255, 0, 0]));
        for y in 20..80 {
            for x in 20..80 {
                img.put_pixel(x, y, Rgb([0, 160, 0]));
            }
        }
        let colour = Sampler::default().sample(&DynamicImage::ImageRgb8(img), None);
        assert_close(colour, [0, 160, 0]);
    }

    #[test]
    fn test_explicit_region() {
        // Left half blue, right half yellow.
        let mut img = RgbImage::from_pixel(200, 200, Rgb([0, 0, 255]));
        for y in 0..200 {
            for x in 100..200 {
                img.put_pixel(x, y, Rgb([255, 255, 0]));
            }
        }
        let sampler = Sampler::default();
        let photo = DynamicImage::ImageRgb8(img);
        let left = sampler.sample(&photo, Some(Region::new(10, 100, 60, 60)));
        let right = sampler.sample(&photo, Some(Region::new(180, 100, 60, 60)));
        assert_close(left, [0, 0, 255]);
        assert_close(right, [255, 255, 0]);
    }

    #[test]
    fn test_region_outside_canvas_is_clamped() {
        let colour = Sampler::default()
            .sample_bytes(&solid_png(32, 32, [40, 40, 40]), Some(Region::new(5000, 5000, 10, 10)))
            .unwrap();
        assert_close(colour, [40, 40, 40]);
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = Sampler::default()
            .sample_bytes(b"definitely not an image", None)
            .unwrap_err();
        assert!(matches!(err, EmojiError::Decode { .. }));
    }

    #[test]
    fn test_decode_empty_is_empty_input() {
        assert!(matches!(decode_photo(&[]), Err(EmojiError::EmptyInput)));
    }

    #[test]
    fn test_dominant_bucket_ties_go_to_first() {
        let mut grid = RgbImage::from_pixel(2, 1, Rgb([0, 0, 0]));
        grid.put_pixel(1, 0, Rgb([255, 255, 255]));
        assert_eq!(dominant_mean(&grid, 3), Colour::BLACK);
    }

    #[test]
    fn test_mixed_grid_yields_majority_colour() {
        let mut grid = RgbImage::from_pixel(10, 1, Rgb([200, 0, 0]));
        for x in 7..10 {
            grid.put_pixel(x, 0, Rgb([0, 0, 200]));
        }
        assert_eq!(dominant_mean(&grid, 3), Colour::from([200, 0, 0]));
    }
}
