/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits shared between the image container and its consumers
use bytemuck::Pod;
use resample_core::bit_depth::BitDepth;

use crate::image::PixelData;

/// A uniform per pixel accessor
///
/// This is the slow but universal way of reading pixels, every
/// storage layout can answer it. The resampler uses it when it has
/// no specialized reader for a layout.
///
/// Implementors must be `Sync` since the resampler reads them
/// from multiple threads at once.
pub trait PixelSource: Sync {
    /// Width and height of the source
    fn dimensions(&self) -> (usize, usize);

    /// Return the pixel at `(x, y)` as 16 bit, non premultiplied RGBA
    ///
    /// Callers must keep `x < width` and `y < height`.
    fn pixel_rgba16(&self, x: usize, y: usize) -> [u16; 4];
}

/// Sample types an image can be stored in
pub trait ZuneInts: Copy + Default + Pod + Send + Sync + 'static {
    /// The bit depth this sample type represents
    const DEPTH: BitDepth;

    /// Widen the sample to 16 bits, see [`BitDepth::expand_u8`]
    fn to_u16(self) -> u16;

    /// Wrap interleaved samples into pixel storage
    fn into_pixel_data(data: Vec<Self>) -> PixelData;
}

impl ZuneInts for u8 {
    const DEPTH: BitDepth = BitDepth::Eight;

    #[inline(always)]
    fn to_u16(self) -> u16 {
        BitDepth::expand_u8(self)
    }

    fn into_pixel_data(data: Vec<Self>) -> PixelData {
        PixelData::U8(data)
    }
}

impl ZuneInts for u16 {
    const DEPTH: BitDepth = BitDepth::Sixteen;

    #[inline(always)]
    fn to_u16(self) -> u16 {
        self
    }

    fn into_pixel_data(data: Vec<Self>) -> PixelData {
        PixelData::U16(data)
    }
}
