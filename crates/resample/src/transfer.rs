/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! sRGB transfer helpers
//!
//! Weighting samples in linear light avoids darkening edges when
//! shrinking. The resampler only applies these when asked to,
//! see [`ResizeOptions::set_linear_light`](crate::options::ResizeOptions::set_linear_light).
//!
//! Values outside `[0, 1]`, as produced by kernels with negative lobes,
//! are accepted. Below the break points the curves are linear, so
//! negative values stay finite.

use crate::converter::ColorSample;

#[inline]
/// Linear transfer function for sRGB
pub fn srgb_to_linear(gamma: f32) -> f32 {
    if gamma <= 0.04045 {
        gamma / 12.92
    } else {
        ((gamma + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
/// Gamma transfer function for sRGB
pub fn srgb_from_linear(linear: f32) -> f32 {
    if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert the color channels of a sample from sRGB to linear light
///
/// Alpha is left untouched.
#[inline]
pub fn to_linear(sample: ColorSample) -> ColorSample {
    let [r, g, b, a] = sample;
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
}

/// Convert the color channels of a sample from linear light to sRGB
///
/// Alpha is left untouched.
#[inline]
pub fn to_srgb(sample: ColorSample) -> ColorSample {
    let [r, g, b, a] = sample;
    [
        srgb_from_linear(r),
        srgb_from_linear(g),
        srgb_from_linear(b),
        a
    ]
}
