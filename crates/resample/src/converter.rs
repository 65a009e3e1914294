/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Uniform pixel reads over every storage layout
//!
//! A [`Converter`] turns any pixel of a source into a [`ColorSample`],
//! four `f32` channels in `[0, 1]`.
//!
//! Coordinates outside the source are clamped to the nearest edge
//! per axis (border replication), so reads never fail.
//!
//! All variants agree bit for bit with the generic one, they only differ
//! in how fast they get there.
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use resample_core::bit_depth::BitDepth;
use resample_image::color_convert::ycbcr_to_rgb;
use resample_image::image::{Image, PixelData, PixelLayout};
use resample_image::traits::PixelSource;

/// Red, green, blue and alpha as normalized floats
pub type ColorSample = [f32; 4];

/// Scale a 16 bit value into `[0, 1]`
#[inline(always)]
fn normalize(value: u16) -> f32 {
    f32::from(value) / 65535.0
}

#[inline(always)]
fn normalize_u8(value: u8) -> f32 {
    normalize(BitDepth::expand_u8(value))
}

/// Clamp `position` into `[0, length)`
///
/// `length` must not be zero.
#[inline(always)]
pub fn replicate_border(position: isize, length: usize) -> usize {
    if position < 0 {
        0
    } else if position as usize >= length {
        length - 1
    } else {
        position as usize
    }
}

/// A reader of pixels in one specific storage layout
///
/// Pick one with [`Converter::new`], it looks at the layout
/// once so the per pixel reads don't have to.
#[derive(Copy, Clone)]
pub enum Converter<'a> {
    /// Anything, read through [`PixelSource::pixel_rgba16`]
    Generic(&'a dyn PixelSource),
    /// Interleaved 8 bit RGBA
    Rgba8 {
        pixels: &'a [u8],
        width:  usize,
        height: usize
    },
    /// Interleaved 16 bit RGBA
    Rgba16 {
        pixels: &'a [u16],
        width:  usize,
        height: usize
    },
    /// 8 bit grayscale
    Gray8 {
        pixels: &'a [u8],
        width:  usize,
        height: usize
    },
    /// 16 bit grayscale
    Gray16 {
        pixels: &'a [u16],
        width:  usize,
        height: usize
    },
    /// Planar luma with possibly subsampled chroma
    YCbCr {
        y:            &'a [u8],
        cb:           &'a [u8],
        cr:           &'a [u8],
        width:        usize,
        height:       usize,
        chroma_width: usize,
        /// horizontal and vertical subsampling factors
        factors:      (usize, usize)
    }
}

impl<'a> Converter<'a> {
    /// Choose the reader for an image
    ///
    /// Layouts without a dedicated reader fall back to [`Converter::Generic`]
    pub fn new(image: &'a Image) -> Converter<'a> {
        let (width, height) = image.dimensions();

        match (image.layout(), image.data()) {
            (PixelLayout::Rgba8, PixelData::U8(pixels)) => Converter::Rgba8 {
                pixels,
                width,
                height
            },
            (PixelLayout::Rgba16, PixelData::U16(pixels)) => Converter::Rgba16 {
                pixels,
                width,
                height
            },
            (PixelLayout::Luma8, PixelData::U8(pixels)) => Converter::Gray8 {
                pixels,
                width,
                height
            },
            (PixelLayout::Luma16, PixelData::U16(pixels)) => Converter::Gray16 {
                pixels,
                width,
                height
            },
            (PixelLayout::YCbCr(ratio), PixelData::YCbCr { y, cb, cr, .. }) => {
                let (chroma_width, _) = ratio.chroma_dimensions(width, height);

                Converter::YCbCr {
                    y,
                    cb,
                    cr,
                    width,
                    height,
                    chroma_width,
                    factors: ratio.factors()
                }
            }
            _ => Converter::Generic(image)
        }
    }

    /// A reader that only uses the per pixel accessor
    pub fn generic(source: &'a dyn PixelSource) -> Converter<'a> {
        Converter::Generic(source)
    }

    /// Width and height of the underlying source
    pub fn dimensions(&self) -> (usize, usize) {
        match *self {
            Converter::Generic(source) => source.dimensions(),
            Converter::Rgba8 { width, height, .. }
            | Converter::Rgba16 { width, height, .. }
            | Converter::Gray8 { width, height, .. }
            | Converter::Gray16 { width, height, .. }
            | Converter::YCbCr { width, height, .. } => (width, height)
        }
    }

    /// Name of the reader, for logs
    pub const fn name(&self) -> &'static str {
        match self {
            Converter::Generic(_) => "generic",
            Converter::Rgba8 { .. } => "rgba8",
            Converter::Rgba16 { .. } => "rgba16",
            Converter::Gray8 { .. } => "gray8",
            Converter::Gray16 { .. } => "gray16",
            Converter::YCbCr { .. } => "ycbcr"
        }
    }

    /// Read the pixel at `(x, y)`
    ///
    /// Out of range coordinates read the nearest edge pixel.
    ///
    /// # Panics
    /// If the source has no pixels
    #[inline]
    pub fn sample(&self, x: isize, y: isize) -> ColorSample {
        let (width, height) = self.dimensions();
        let x = replicate_border(x, width);
        let y = replicate_border(y, height);

        match *self {
            Converter::Generic(source) => source.pixel_rgba16(x, y).map(normalize),
            Converter::Rgba8 { pixels, .. } => {
                let i = (y * width + x) * 4;
                let px = &pixels[i..i + 4];

                [
                    normalize_u8(px[0]),
                    normalize_u8(px[1]),
                    normalize_u8(px[2]),
                    normalize_u8(px[3])
                ]
            }
            Converter::Rgba16 { pixels, .. } => {
                let i = (y * width + x) * 4;
                let px = &pixels[i..i + 4];

                [
                    normalize(px[0]),
                    normalize(px[1]),
                    normalize(px[2]),
                    normalize(px[3])
                ]
            }
            Converter::Gray8 { pixels, .. } => {
                let g = normalize_u8(pixels[y * width + x]);
                [g, g, g, 1.0]
            }
            Converter::Gray16 { pixels, .. } => {
                let g = normalize(pixels[y * width + x]);
                [g, g, g, 1.0]
            }
            Converter::YCbCr {
                y: luma,
                cb,
                cr,
                chroma_width,
                factors: (h, v),
                ..
            } => {
                let c = (y / v) * chroma_width + x / h;
                let [r, g, b] = ycbcr_to_rgb(luma[y * width + x], cb[c], cr[c]);

                [normalize_u8(r), normalize_u8(g), normalize_u8(b), 1.0]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use resample_core::colorspace::{ColorSpace, YCbCrSubsampleRatio};
    use resample_image::image::Image;

    use crate::converter::{replicate_border, Converter};

    fn random_u8(rand: &mut nanorand::WyRand, length: usize) -> Vec<u8> {
        (0..length).map(|_| rand.generate::<u8>()).collect()
    }

    fn random_u16(rand: &mut nanorand::WyRand, length: usize) -> Vec<u16> {
        (0..length).map(|_| rand.generate::<u16>()).collect()
    }

    /// Every image with a fast path, all 5x3
    fn fast_path_images() -> Vec<Image> {
        let mut rand = nanorand::WyRand::new_seed(42);
        let (w, h) = (5, 3);

        let ratios = [
            YCbCrSubsampleRatio::Ratio444,
            YCbCrSubsampleRatio::Ratio422,
            YCbCrSubsampleRatio::Ratio420,
            YCbCrSubsampleRatio::Ratio440,
            YCbCrSubsampleRatio::Ratio411,
            YCbCrSubsampleRatio::Ratio410
        ];

        let mut images = vec![
            Image::from_rgba8(random_u8(&mut rand, w * h * 4), w, h).unwrap(),
            Image::from_rgba16(random_u16(&mut rand, w * h * 4), w, h).unwrap(),
            Image::from_luma8(random_u8(&mut rand, w * h), w, h).unwrap(),
            Image::from_luma16(random_u16(&mut rand, w * h), w, h).unwrap()
        ];
        for ratio in ratios {
            let (cw, ch) = ratio.chroma_dimensions(w, h);

            images.push(
                Image::from_ycbcr(
                    random_u8(&mut rand, w * h),
                    random_u8(&mut rand, cw * ch),
                    random_u8(&mut rand, cw * ch),
                    w,
                    h,
                    ratio
                )
                .unwrap()
            );
        }
        images
    }

    #[test]
    fn test_replicate_border() {
        assert_eq!(replicate_border(-5, 10), 0);
        assert_eq!(replicate_border(0, 10), 0);
        assert_eq!(replicate_border(9, 10), 9);
        assert_eq!(replicate_border(10, 10), 9);
        assert_eq!(replicate_border(isize::MAX, 10), 9);
    }

    #[test]
    fn test_dispatch() {
        let names: Vec<&str> = fast_path_images()
            .iter()
            .map(|x| Converter::new(x).name())
            .collect();
        assert_eq!(
            names,
            [
                "rgba8", "rgba16", "gray8", "gray16", "ycbcr", "ycbcr", "ycbcr", "ycbcr", "ycbcr",
                "ycbcr"
            ]
        );

        let rgb = Image::fill::<u8>(0, ColorSpace::RGB, 2, 2).unwrap();
        assert_eq!(Converter::new(&rgb).name(), "generic");
    }

    #[test]
    fn test_fast_paths_match_generic() {
        for image in fast_path_images() {
            let fast = Converter::new(&image);
            let generic = Converter::generic(&image);
            let (w, h) = image.dimensions();

            for y in -2..(h as isize + 2) {
                for x in -2..(w as isize + 2) {
                    assert_eq!(
                        fast.sample(x, y),
                        generic.sample(x, y),
                        "{} differs at ({x},{y})",
                        fast.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_border_replication_every_variant() {
        let mut images = fast_path_images();
        images.push(Image::from_u8(vec![10, 20, 30, 40, 50, 60], 2, 1, ColorSpace::BGR).unwrap());

        for image in &images {
            let converter = Converter::new(image);
            let (w, h) = image.dimensions();
            let (last_x, last_y) = (w as isize - 1, h as isize - 1);

            assert_eq!(converter.sample(-1000, -1000), converter.sample(0, 0));
            assert_eq!(converter.sample(1000, -3), converter.sample(last_x, 0));
            assert_eq!(converter.sample(-7, 1000), converter.sample(0, last_y));
            assert_eq!(converter.sample(1000, 1000), converter.sample(last_x, last_y));
            assert_eq!(converter.sample(1, 1000), converter.sample(1, last_y));
        }
    }

    #[test]
    fn test_bit_replication() {
        let image = Image::from_rgba8(vec![0, 128, 255, 1], 1, 1).unwrap();
        let sample = Converter::new(&image).sample(0, 0);

        assert_eq!(sample[0], 0.0);
        assert_eq!(sample[1], f32::from(0x8080_u16) / 65535.0);
        assert_eq!(sample[2], 1.0);
        assert_eq!(sample[3], f32::from(0x0101_u16) / 65535.0);
    }

    #[test]
    fn test_gray_is_opaque() {
        let image = Image::from_luma16(vec![0x8000], 1, 1).unwrap();
        let sample = Converter::new(&image).sample(0, 0);

        assert_eq!(sample[0], sample[1]);
        assert_eq!(sample[1], sample[2]);
        assert_eq!(sample[3], 1.0);
    }
}
