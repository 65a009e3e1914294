/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image Colorspace information and manipulation utilities.

/// All possible image colorspaces
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ColorSpace {
    /// Red, Green , Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA,
    /// Luma and two chroma planes, BT.601 full range
    ///
    /// Chroma may be subsampled, see [`YCbCrSubsampleRatio`]
    YCbCr,
    /// Grayscale colorspace
    Luma,
    /// Grayscale with alpha colorspace
    LumaA,
    /// Blue, Green, Red
    BGR,
    /// Blue, Green, Red, Alpha
    BGRA,
    /// Alpha Red Green Blue
    ARGB,
    /// The colorspace is unknown
    Unknown
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::RGB | Self::YCbCr | Self::BGR => 3,
            Self::RGBA | Self::BGRA | Self::ARGB => 4,
            Self::Luma => 1,
            Self::LumaA => 2,
            Self::Unknown => 0
        }
    }
}

/// Encapsulates all colorspaces supported by
/// the library
pub static ALL_COLORSPACES: [ColorSpace; 8] = [
    ColorSpace::RGB,
    ColorSpace::RGBA,
    ColorSpace::LumaA,
    ColorSpace::Luma,
    ColorSpace::BGRA,
    ColorSpace::BGR,
    ColorSpace::YCbCr,
    ColorSpace::ARGB
];

/// Chroma subsampling of a luma/chroma image
///
/// The ratio decides how many luma samples share a single
/// pair of chroma samples.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum YCbCrSubsampleRatio {
    /// No subsampling, one chroma pair per luma sample
    #[default]
    Ratio444,
    /// Chroma halved horizontally
    Ratio422,
    /// Chroma halved horizontally and vertically
    Ratio420,
    /// Chroma halved vertically
    Ratio440,
    /// Chroma quartered horizontally
    Ratio411,
    /// Chroma quartered horizontally and halved vertically
    Ratio410
}

impl YCbCrSubsampleRatio {
    /// Horizontal and vertical subsampling factors
    pub const fn factors(self) -> (usize, usize) {
        match self {
            Self::Ratio444 => (1, 1),
            Self::Ratio422 => (2, 1),
            Self::Ratio420 => (2, 2),
            Self::Ratio440 => (1, 2),
            Self::Ratio411 => (4, 1),
            Self::Ratio410 => (4, 2)
        }
    }

    /// Dimensions of a chroma plane for a luma plane of `width` x `height`
    ///
    /// Odd dimensions round up so the last luma column/row still
    /// has chroma.
    ///
    /// ```
    /// use resample_core::colorspace::YCbCrSubsampleRatio;
    /// assert_eq!(YCbCrSubsampleRatio::Ratio420.chroma_dimensions(5, 3), (3, 2));
    /// assert_eq!(YCbCrSubsampleRatio::Ratio410.chroma_dimensions(9, 3), (3, 2));
    /// ```
    pub const fn chroma_dimensions(self, width: usize, height: usize) -> (usize, usize) {
        let (h, v) = self.factors();
        (width.div_ceil(h), height.div_ceil(v))
    }
}
