/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image bit depth, information and manipulations

/// The image bit depth.
///
/// The library supports depths of 8 and 16 bits, stored
/// as [`u8`] and [`u16`] respectively.
///
/// Whatever the depth, the resampler works on 16 bit equivalent
/// precision internally, see [`BitDepth::expand_u8`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum BitDepth {
    /// Eight bit depth.
    ///
    /// Images with such bit depth use [`u8`] to store
    /// pixels and use the whole range from 0-255.
    Eight,
    /// Sixteen bit depth
    ///
    /// Images with such bit depths use [`u16`] to store values and use the whole range
    /// i.e 0-65535
    ///
    /// Data is stored and processed in native endian.
    Sixteen,
    /// Bit depth information is unknown
    #[default]
    Unknown
}

impl BitDepth {
    /// Expand an 8 bit sample to 16 bits by bit replication
    ///
    /// `v` becomes `(v << 8) | v`, so 0 maps to 0 and 255 maps to 65535
    /// exactly, unlike a plain shift.
    ///
    /// ```
    /// use resample_core::bit_depth::BitDepth;
    /// assert_eq!(BitDepth::expand_u8(0xAB), 0xABAB);
    /// assert_eq!(BitDepth::expand_u8(255), u16::MAX);
    /// ```
    #[inline(always)]
    pub const fn expand_u8(value: u8) -> u16 {
        ((value as u16) << 8) | (value as u16)
    }
}
