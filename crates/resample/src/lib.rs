/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Separable image resampling
//!
//! This crate resizes images stored in a [`resample_image::image::Image`]
//! with one of several interpolation kernels.
//!
//! # Example
//! ```
//! use resample::aspect::thumbnail;
//! use resample::kernels::ResizeMethod;
//! use resample::resize;
//! use resample::resample_image::image::Image;
//!
//! let image = Image::from_rgba8(vec![128; 300 * 200 * 4], 300, 200).unwrap();
//! let (width, height) = thumbnail(image.dimensions(), 100, 100);
//!
//! let thumb = resize(width, height, Some(&image), ResizeMethod::MitchellNetravali).unwrap();
//! assert_eq!(thumb.dimensions(), (100, 66));
//! ```
//!
//! # How it works
//!  - A [`Converter`](converter::Converter) is picked once per call from the
//!    image layout, it reads any pixel as four floats with border replication.
//!  - Contribution lists are computed once per axis from the kernel.
//!  - A horizontal and a vertical pass apply them, each split into row
//!    chunks across worker threads.
//!
//! # Features
//!  - `threads`: Run passes on multiple threads, enabled by default.
//!    Without it every pass runs on the calling thread.
//!  - `log`: Trace requests and passes through the [`log`](https://docs.rs/log) crate.
//!  - `serde`: Serialize kernels, options and image information.
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
    clippy::cast_precision_loss
)]

pub use resample_image;
pub use resize::{resize, resize_source, resize_with_options, Resize};

pub mod aspect;
pub mod contributions;
pub mod converter;
pub mod kernels;
pub mod options;
mod output;
pub mod resize;
mod scheduler;
mod serde;
pub mod transfer;
