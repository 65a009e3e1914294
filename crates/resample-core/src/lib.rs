/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all resample crates
//!
//! This crate provides the vocabulary the image container
//! and the resampling engine agree on.
//!
//! It currently contains
//!
//! - Colorspace and bit depth information shared by images
//! - Chroma subsampling ratios for luma/chroma images
//! - A tiny logging facade that is free when logging is disabled
//!
//! # Features
//!  - `log`: Forward the logging macros to the [`log`](https://docs.rs/log) crate.
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
#![macro_use]

pub mod bit_depth;
pub mod colorspace;
pub mod log;
pub mod serde;
