/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The image container of the resample family
//!
//! An [`Image`](image::Image) owns dense pixel storage in one of a few layouts
//!
//! - interleaved 8 bit samples of any supported colorspace
//! - interleaved 16 bit samples of any supported colorspace
//! - planar luma/chroma with optionally subsampled chroma
//!
//! and exposes a uniform per pixel accessor through [`PixelSource`](traits::PixelSource).
//!
//! There is no decoding or encoding here, callers bring their own pixels.
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::wildcard_imports
)]

pub use resample_core;

pub mod color_convert;
pub mod errors;
pub mod image;
mod serde;
pub mod traits;
