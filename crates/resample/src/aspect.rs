/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Target dimension helpers
//!
//! These do no resampling, they compute `(width, height)` pairs
//! that keep an image's aspect ratio, to be handed to
//! [`resize`](crate::resize::resize).
//!
//! Extents with a zero side have no aspect ratio, every helper
//! returns `(0, 0)` for them.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

/// Dimensions for resizing an image of `extent` to `width`
/// while preserving its aspect ratio
///
/// ```
/// use resample::aspect::from_width;
/// assert_eq!(from_width((100, 200), 100), (100, 200));
/// ```
pub fn from_width(extent: (usize, usize), width: usize) -> (usize, usize) {
    let (w, h) = extent;

    if w == 0 || h == 0 {
        return (0, 0);
    }
    let aspect_inv = h as f32 / w as f32;

    (width, (width as f32 * aspect_inv) as usize)
}

/// Dimensions for resizing an image of `extent` to `height`
/// while preserving its aspect ratio
///
/// ```
/// use resample::aspect::from_height;
/// assert_eq!(from_height((100, 200), 200), (100, 200));
/// ```
pub fn from_height(extent: (usize, usize), height: usize) -> (usize, usize) {
    let (w, h) = extent;

    if w == 0 || h == 0 {
        return (0, 0);
    }
    let aspect = w as f32 / h as f32;

    ((height as f32 * aspect) as usize, height)
}

/// Dimensions for shrinking an image of `extent` to fit in
/// `max_width` x `max_height`, preserving its aspect ratio
///
/// Images that already fit are returned unchanged, this never enlarges.
/// Neither side of the result drops below one pixel, except that a zero
/// extent or a zero bound has no fit and yields `(0, 0)`.
///
/// ```
/// use resample::aspect::thumbnail;
/// assert_eq!(thumbnail((200, 100), 150, 50), (100, 50));
/// assert_eq!(thumbnail((20, 10), 150, 50), (20, 10));
/// ```
pub fn thumbnail(extent: (usize, usize), max_width: usize, max_height: usize) -> (usize, usize) {
    let (w, h) = extent;

    if w == 0 || h == 0 || max_width == 0 || max_height == 0 {
        return (0, 0);
    }
    if max_width >= w && max_height >= h {
        return (w, h);
    }
    let (mut new_width, mut new_height) = (w, h);

    if w > max_width {
        new_height = ((h as u128 * max_width as u128) / w as u128).max(1) as usize;
        new_width = max_width;
    }
    if new_height > max_height {
        new_width = ((new_width as u128 * max_height as u128) / new_height as u128).max(1) as usize;
        new_height = max_height;
    }
    (new_width, new_height)
}
