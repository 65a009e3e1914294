/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when building an image
use std::fmt::{Debug, Display, Formatter};

use resample_core::bit_depth::BitDepth;
use resample_core::colorspace::ColorSpace;

/// All possible image errors that can occur.
///
/// Resizing itself never fails, these come from assembling
/// an [`Image`](crate::image::Image) out of caller provided buffers.
pub enum ImageErrors {
    /// The buffer length does not match the one implied by the dimensions.
    ///
    /// The first value is the expected length, the second is the one found
    DimensionsMisMatch(usize, usize),
    /// A chroma plane does not match the subsampling ratio
    ///
    /// The first value is the expected length, the second is the one found
    ChromaDimensionsMisMatch(usize, usize),
    /// A colorspace cannot be used with the constructor that was called
    UnsupportedColorspace(ColorSpace, &'static str),
    /// The sample type does not match the requested depth
    WrongDepth(BitDepth, &'static str),
    /// Width times height times components does not fit in a usize
    TooLargeDimensions(usize, usize)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected a buffer of length {expected} but found {found}"
                )
            }
            Self::ChromaDimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Chroma plane mismatch, expected a plane of length {expected} but found {found}"
                )
            }
            Self::UnsupportedColorspace(colorspace, operation) => {
                writeln!(
                    f,
                    "Unsupported colorspace {colorspace:?}, for the operation {operation}"
                )
            }
            Self::WrongDepth(depth, operation) => {
                writeln!(f, "Bit depth {depth:?} cannot be used for {operation}")
            }
            Self::TooLargeDimensions(width, height) => {
                writeln!(f, "Too large dimensions {width}x{height}, overflows usize")
            }
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {}
