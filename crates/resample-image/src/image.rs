/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single image
//!
//! An image is represented as
//!
//! - a width and a height
//!     - a colorspace
//!         - a bit depth
//!             - and the pixels, either interleaved or, for luma/chroma, planar
//!
//! Fully supported bit depths are 8 and 16.
use resample_core::bit_depth::BitDepth;
use resample_core::colorspace::{ColorSpace, YCbCrSubsampleRatio};

use crate::color_convert::ycbcr_to_rgb;
use crate::errors::ImageErrors;
use crate::traits::{PixelSource, ZuneInts};

/// Pixel storage of an image
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PixelData {
    /// Interleaved 8 bit samples, `colorspace.num_components()` per pixel
    U8(Vec<u8>),
    /// Interleaved 16 bit samples in native endian
    U16(Vec<u16>),
    /// Planar 8 bit luma/chroma, chroma planes may be subsampled
    YCbCr {
        y:     Vec<u8>,
        cb:    Vec<u8>,
        cr:    Vec<u8>,
        ratio: YCbCrSubsampleRatio
    }
}

/// The storage class of an image
///
/// This is what readers dispatch on, layouts with a dedicated
/// variant have fast paths, everything else goes through
/// [`PixelSource::pixel_rgba16`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelLayout {
    /// Interleaved 8 bit RGBA
    Rgba8,
    /// Interleaved 16 bit RGBA
    Rgba16,
    /// 8 bit grayscale
    Luma8,
    /// 16 bit grayscale
    Luma16,
    /// Planar 8 bit luma/chroma
    YCbCr(YCbCrSubsampleRatio),
    /// Any other interleaved layout
    Interleaved(ColorSpace, BitDepth)
}

/// Represents a single image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    depth:      BitDepth,
    data:       PixelData
}

fn checked_length(width: usize, height: usize, components: usize) -> Result<usize, ImageErrors> {
    width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(components))
        .ok_or(ImageErrors::TooLargeDimensions(width, height))
}

impl Image {
    /// Create an image from interleaved samples
    ///
    /// The sample type decides the bit depth, `u8` for 8 bit images
    /// and `u16` for 16 bit images.
    ///
    /// # Arguments
    /// - data: Interleaved pixels, `colorspace.num_components()` samples per pixel
    /// - width: The image width
    /// - height: The image height
    /// - colorspace: The colorspace of the pixels, `YCbCr` images must use [`Image::from_ycbcr`]
    ///
    /// # Errors
    /// - The colorspace is [`ColorSpace::YCbCr`] or [`ColorSpace::Unknown`]
    /// - `data.len()` is not `width * height * components`
    pub fn from_samples<T: ZuneInts>(
        data: Vec<T>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        if matches!(colorspace, ColorSpace::YCbCr | ColorSpace::Unknown) {
            return Err(ImageErrors::UnsupportedColorspace(
                colorspace,
                "interleaved pixel storage"
            ));
        }
        let expected = checked_length(width, height, colorspace.num_components())?;

        if data.len() != expected {
            return Err(ImageErrors::DimensionsMisMatch(expected, data.len()));
        }

        Ok(Image {
            width,
            height,
            colorspace,
            depth: T::DEPTH,
            data: T::into_pixel_data(data)
        })
    }

    /// Create an 8 bit image from interleaved samples
    ///
    /// See [`Image::from_samples`]
    pub fn from_u8(
        data: Vec<u8>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        Image::from_samples(data, width, height, colorspace)
    }

    /// Create a 16 bit image from interleaved native endian samples
    ///
    /// See [`Image::from_samples`]
    pub fn from_u16(
        data: Vec<u16>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        Image::from_samples(data, width, height, colorspace)
    }

    pub fn from_rgba8(data: Vec<u8>, width: usize, height: usize) -> Result<Image, ImageErrors> {
        Image::from_samples(data, width, height, ColorSpace::RGBA)
    }

    pub fn from_rgba16(data: Vec<u16>, width: usize, height: usize) -> Result<Image, ImageErrors> {
        Image::from_samples(data, width, height, ColorSpace::RGBA)
    }

    pub fn from_luma8(data: Vec<u8>, width: usize, height: usize) -> Result<Image, ImageErrors> {
        Image::from_samples(data, width, height, ColorSpace::Luma)
    }

    pub fn from_luma16(data: Vec<u16>, width: usize, height: usize) -> Result<Image, ImageErrors> {
        Image::from_samples(data, width, height, ColorSpace::Luma)
    }

    /// Create a luma/chroma image from its three planes
    ///
    /// # Arguments
    /// - y: Luma plane, `width * height` samples
    /// - cb, cr: Chroma planes, sized by [`YCbCrSubsampleRatio::chroma_dimensions`]
    /// - ratio: How the chroma planes are subsampled
    ///
    /// # Errors
    /// Any plane length not matching the dimensions and ratio
    pub fn from_ycbcr(
        y: Vec<u8>, cb: Vec<u8>, cr: Vec<u8>, width: usize, height: usize,
        ratio: YCbCrSubsampleRatio
    ) -> Result<Image, ImageErrors> {
        let expected = checked_length(width, height, 1)?;

        if y.len() != expected {
            return Err(ImageErrors::DimensionsMisMatch(expected, y.len()));
        }
        let (c_width, c_height) = ratio.chroma_dimensions(width, height);
        let c_expected = c_width * c_height;

        for plane in [&cb, &cr] {
            if plane.len() != c_expected {
                return Err(ImageErrors::ChromaDimensionsMisMatch(
                    c_expected,
                    plane.len()
                ));
            }
        }

        Ok(Image {
            width,
            height,
            colorspace: ColorSpace::YCbCr,
            depth: BitDepth::Eight,
            data: PixelData::YCbCr { y, cb, cr, ratio }
        })
    }

    /// Create an image with every sample set to `pixel`
    ///
    /// For [`ColorSpace::YCbCr`] this creates three full resolution
    /// planes and only accepts `u8` samples.
    ///
    /// # Example
    /// ```
    /// use resample_core::colorspace::ColorSpace;
    /// use resample_image::image::Image;
    /// let image = Image::fill::<u8>(233, ColorSpace::RGB, 100, 100).unwrap();
    /// assert_eq!(image.dimensions(), (100, 100));
    /// ```
    pub fn fill<T: ZuneInts>(
        pixel: T, colorspace: ColorSpace, width: usize, height: usize
    ) -> Result<Image, ImageErrors> {
        if colorspace == ColorSpace::YCbCr {
            if T::DEPTH != BitDepth::Eight {
                return Err(ImageErrors::WrongDepth(T::DEPTH, "luma/chroma images"));
            }
            let plane = vec![bytemuck::cast::<T, u8>(pixel); checked_length(width, height, 1)?];

            return Image::from_ycbcr(
                plane.clone(),
                plane.clone(),
                plane,
                width,
                height,
                YCbCrSubsampleRatio::Ratio444
            );
        }
        let length = checked_length(width, height, colorspace.num_components())?;

        Image::from_samples(vec![pixel; length], width, height, colorspace)
    }

    /// Create an image with every sample set to zero
    ///
    /// # Errors
    /// - `depth` is neither [`BitDepth::Eight`] nor [`BitDepth::Sixteen`]
    /// - See [`Image::fill`]
    pub fn new_empty(
        width: usize, height: usize, colorspace: ColorSpace, depth: BitDepth
    ) -> Result<Image, ImageErrors> {
        match depth {
            BitDepth::Eight => Image::fill::<u8>(0, colorspace, width, height),
            BitDepth::Sixteen => Image::fill::<u16>(0, colorspace, width, height),
            _ => Err(ImageErrors::WrongDepth(depth, "new images"))
        }
    }

    /// Get image dimensions as a tuple of (width,height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return true if the image has no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the colorspace this image is stored in
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Get the image depth of this image
    pub const fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Return the storage class of this image
    pub fn layout(&self) -> PixelLayout {
        match (&self.data, self.colorspace) {
            (PixelData::YCbCr { ratio, .. }, _) => PixelLayout::YCbCr(*ratio),
            (PixelData::U8(_), ColorSpace::RGBA) => PixelLayout::Rgba8,
            (PixelData::U16(_), ColorSpace::RGBA) => PixelLayout::Rgba16,
            (PixelData::U8(_), ColorSpace::Luma) => PixelLayout::Luma8,
            (PixelData::U16(_), ColorSpace::Luma) => PixelLayout::Luma16,
            (_, colorspace) => PixelLayout::Interleaved(colorspace, self.depth)
        }
    }

    /// Return a reference to the underlying pixel storage
    pub const fn data(&self) -> &PixelData {
        &self.data
    }

    /// Consume the image returning its pixel storage
    pub fn into_data(self) -> PixelData {
        self.data
    }

    /// Convert image to a byte representation
    ///
    /// # Note
    /// For 16 bit images native endian is used, i.e each sample
    /// becomes two bytes in the platform's byte order.
    ///
    /// Luma/chroma images return the three planes one after the other.
    pub fn to_u8(&self) -> Vec<u8> {
        match &self.data {
            PixelData::U8(data) => data.clone(),
            PixelData::U16(data) => bytemuck::cast_slice::<u16, u8>(data).to_vec(),
            PixelData::YCbCr { y, cb, cr, .. } => {
                let mut out = Vec::with_capacity(y.len() + cb.len() + cr.len());
                out.extend_from_slice(y);
                out.extend_from_slice(cb);
                out.extend_from_slice(cr);
                out
            }
        }
    }

    /// Offset of the chroma sample serving the luma sample at `(x, y)`
    #[inline]
    pub fn chroma_offset(&self, x: usize, y: usize, ratio: YCbCrSubsampleRatio) -> usize {
        let (c_width, _) = ratio.chroma_dimensions(self.width, self.height);
        let (h, v) = ratio.factors();

        (y / v) * c_width + x / h
    }
}

/// Map one interleaved pixel to 16 bit RGBA
#[inline]
fn interleaved_to_rgba16<T: ZuneInts>(pixel: &[T], colorspace: ColorSpace) -> [u16; 4] {
    const OPAQUE: u16 = u16::MAX;

    let p = |i: usize| pixel[i].to_u16();

    match colorspace {
        ColorSpace::RGB => [p(0), p(1), p(2), OPAQUE],
        ColorSpace::RGBA => [p(0), p(1), p(2), p(3)],
        ColorSpace::BGR => [p(2), p(1), p(0), OPAQUE],
        ColorSpace::BGRA => [p(2), p(1), p(0), p(3)],
        ColorSpace::ARGB => [p(1), p(2), p(3), p(0)],
        ColorSpace::Luma => [p(0), p(0), p(0), OPAQUE],
        ColorSpace::LumaA => [p(0), p(0), p(0), p(1)],
        // rejected by the constructors
        _ => [0, 0, 0, OPAQUE]
    }
}

impl PixelSource for Image {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn pixel_rgba16(&self, x: usize, y: usize) -> [u16; 4] {
        let index = y * self.width + x;

        match &self.data {
            PixelData::U8(data) => {
                let n = self.colorspace.num_components();
                interleaved_to_rgba16(&data[index * n..(index + 1) * n], self.colorspace)
            }
            PixelData::U16(data) => {
                let n = self.colorspace.num_components();
                interleaved_to_rgba16(&data[index * n..(index + 1) * n], self.colorspace)
            }
            PixelData::YCbCr {
                y: luma,
                cb,
                cr,
                ratio
            } => {
                let c = self.chroma_offset(x, y, *ratio);
                let [r, g, b] = ycbcr_to_rgb(luma[index], cb[c], cr[c]);

                [
                    BitDepth::expand_u8(r),
                    BitDepth::expand_u8(g),
                    BitDepth::expand_u8(b),
                    u16::MAX
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use resample_core::bit_depth::BitDepth;
    use resample_core::colorspace::{ColorSpace, YCbCrSubsampleRatio, ALL_COLORSPACES};

    use crate::errors::ImageErrors;
    use crate::image::{Image, PixelLayout};
    use crate::traits::PixelSource;

    #[test]
    fn test_wrong_length_is_rejected() {
        let err = Image::from_rgba8(vec![0; 15], 2, 2).unwrap_err();
        assert!(matches!(err, ImageErrors::DimensionsMisMatch(16, 15)));
    }

    #[test]
    fn test_ycbcr_chroma_length_is_checked() {
        // 5x3 at 4:2:0 needs 3x2 chroma planes
        let err = Image::from_ycbcr(
            vec![0; 15],
            vec![0; 6],
            vec![0; 5],
            5,
            3,
            YCbCrSubsampleRatio::Ratio420
        )
        .unwrap_err();
        assert!(matches!(err, ImageErrors::ChromaDimensionsMisMatch(6, 5)));

        Image::from_ycbcr(
            vec![0; 15],
            vec![0; 6],
            vec![0; 6],
            5,
            3,
            YCbCrSubsampleRatio::Ratio420
        )
        .unwrap();
    }

    #[test]
    fn test_interleaved_ycbcr_is_rejected() {
        let err = Image::from_u8(vec![0; 12], 2, 2, ColorSpace::YCbCr).unwrap_err();
        assert!(matches!(
            err,
            ImageErrors::UnsupportedColorspace(ColorSpace::YCbCr, _)
        ));
    }

    #[test]
    fn test_fill_every_colorspace() {
        for colorspace in ALL_COLORSPACES {
            let image = Image::fill::<u8>(17, colorspace, 10, 7).unwrap();
            assert_eq!(image.dimensions(), (10, 7));
            assert_eq!(image.colorspace(), colorspace);
        }
        assert!(Image::fill::<u16>(17, ColorSpace::YCbCr, 10, 7).is_err());
    }

    #[test]
    fn test_new_empty() {
        let image = Image::new_empty(3, 2, ColorSpace::BGRA, BitDepth::Sixteen).unwrap();
        assert_eq!(image.depth(), BitDepth::Sixteen);
        assert!(image.to_u8().iter().all(|x| *x == 0));

        assert!(Image::new_empty(3, 2, ColorSpace::RGB, BitDepth::Unknown).is_err());
    }

    #[test]
    fn test_layouts() {
        let rgba8 = Image::fill::<u8>(0, ColorSpace::RGBA, 2, 2).unwrap();
        let rgba16 = Image::fill::<u16>(0, ColorSpace::RGBA, 2, 2).unwrap();
        let luma8 = Image::fill::<u8>(0, ColorSpace::Luma, 2, 2).unwrap();
        let luma16 = Image::fill::<u16>(0, ColorSpace::Luma, 2, 2).unwrap();
        let bgr = Image::fill::<u16>(0, ColorSpace::BGR, 2, 2).unwrap();

        assert_eq!(rgba8.layout(), PixelLayout::Rgba8);
        assert_eq!(rgba16.layout(), PixelLayout::Rgba16);
        assert_eq!(luma8.layout(), PixelLayout::Luma8);
        assert_eq!(luma16.layout(), PixelLayout::Luma16);
        assert_eq!(
            bgr.layout(),
            PixelLayout::Interleaved(ColorSpace::BGR, BitDepth::Sixteen)
        );
    }

    #[test]
    fn test_pixel_accessor_reorders_channels() {
        let bgra = Image::from_u8(vec![1, 2, 3, 4], 1, 1, ColorSpace::BGRA).unwrap();
        assert_eq!(bgra.pixel_rgba16(0, 0), [0x0303, 0x0202, 0x0101, 0x0404]);

        let argb = Image::from_u16(vec![1, 2, 3, 4], 1, 1, ColorSpace::ARGB).unwrap();
        assert_eq!(argb.pixel_rgba16(0, 0), [2, 3, 4, 1]);

        let luma_a = Image::from_u8(vec![255, 0], 1, 1, ColorSpace::LumaA).unwrap();
        assert_eq!(luma_a.pixel_rgba16(0, 0), [u16::MAX, u16::MAX, u16::MAX, 0]);
    }

    #[test]
    fn test_subsampled_chroma_lookup() {
        // 4x2 at 4:2:2, chroma is 2x2, every chroma sample serves two luma samples
        let image = Image::from_ycbcr(
            vec![0; 8],
            vec![0, 1, 2, 3],
            vec![0; 4],
            4,
            2,
            YCbCrSubsampleRatio::Ratio422
        )
        .unwrap();

        assert_eq!(image.chroma_offset(0, 0, YCbCrSubsampleRatio::Ratio422), 0);
        assert_eq!(image.chroma_offset(1, 0, YCbCrSubsampleRatio::Ratio422), 0);
        assert_eq!(image.chroma_offset(2, 0, YCbCrSubsampleRatio::Ratio422), 1);
        assert_eq!(image.chroma_offset(3, 1, YCbCrSubsampleRatio::Ratio422), 3);
    }

    #[test]
    fn test_quartered_chroma_lookup() {
        // 9x3, chroma is 3 columns wide, 3 rows at 4:1:1 and 2 rows at 4:1:0
        let image_411 = Image::from_ycbcr(
            vec![0; 27],
            vec![0; 9],
            vec![0; 9],
            9,
            3,
            YCbCrSubsampleRatio::Ratio411
        )
        .unwrap();
        assert_eq!(image_411.chroma_offset(3, 0, YCbCrSubsampleRatio::Ratio411), 0);
        assert_eq!(image_411.chroma_offset(8, 2, YCbCrSubsampleRatio::Ratio411), 8);

        let image_410 = Image::from_ycbcr(
            vec![0; 27],
            vec![0; 6],
            vec![0; 6],
            9,
            3,
            YCbCrSubsampleRatio::Ratio410
        )
        .unwrap();
        assert_eq!(image_410.chroma_offset(4, 1, YCbCrSubsampleRatio::Ratio410), 1);
        assert_eq!(image_410.chroma_offset(8, 2, YCbCrSubsampleRatio::Ratio410), 5);
    }

    #[test]
    fn test_to_u8_is_native_endian() {
        let image = Image::from_luma16(vec![0x0102], 1, 1).unwrap();
        assert_eq!(image.to_u8(), 0x0102_u16.to_ne_bytes().to_vec());
    }
}
