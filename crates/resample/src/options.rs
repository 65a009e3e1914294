/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Resize options
//!
//! Everything a resize call can be tuned with lives here, the
//! resampler never consults global state while it runs.
use core::num::NonZeroUsize;

use crate::kernels::{Kernel, ResizeMethod};

/// Number of workers when nothing else was asked for
///
/// One per available core, or one if that can't be determined.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Resize options
///
/// # Example
/// ```
/// use resample::kernels::ResizeMethod;
/// use resample::options::ResizeOptions;
///
/// let options = ResizeOptions::new()
///     .set_method(ResizeMethod::Lanczos2)
///     .set_threads(4)
///     .set_linear_light(true);
///
/// assert_eq!(options.get_threads(), 4);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ResizeOptions {
    /// The interpolation kernel
    ///
    /// - Default value: `ResizeMethod::Lanczos3`
    kernel:       Kernel,
    /// Number of workers each pass is split across
    ///
    /// - Default value: the number of available cores
    threads:      usize,
    /// Whether samples are weighted in linear light
    ///
    /// When set, samples are converted from sRGB to linear before
    /// filtering and back before being stored.
    ///
    /// - Default value: false
    linear_light: bool
}

impl Default for ResizeOptions {
    fn default() -> Self {
        ResizeOptions {
            kernel:       ResizeMethod::Lanczos3.kernel(),
            threads:      default_threads(),
            linear_light: false
        }
    }
}

impl ResizeOptions {
    /// Create options with default values
    ///
    /// The worker count is resolved here, once.
    pub fn new() -> ResizeOptions {
        ResizeOptions::default()
    }

    /// Use one of the builtin kernels
    #[must_use]
    pub fn set_method(mut self, method: ResizeMethod) -> Self {
        self.kernel = method.kernel();
        self
    }

    /// Use a custom kernel
    ///
    /// A kernel whose support covers no sample degrades to
    /// nearest neighbour instead of failing.
    #[must_use]
    pub fn set_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the number of workers, zero is treated as one
    #[must_use]
    pub fn set_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Weight samples in linear light
    #[must_use]
    pub fn set_linear_light(mut self, yes: bool) -> Self {
        self.linear_light = yes;
        self
    }

    pub const fn get_kernel(&self) -> Kernel {
        self.kernel
    }

    pub const fn get_threads(&self) -> usize {
        self.threads
    }

    pub const fn get_linear_light(&self) -> bool {
        self.linear_light
    }
}

#[cfg(test)]
mod tests {
    use crate::kernels::ResizeMethod;
    use crate::options::ResizeOptions;

    #[test]
    fn test_defaults() {
        let options = ResizeOptions::new();

        assert!(options.get_threads() >= 1);
        assert!(!options.get_linear_light());
        assert_eq!(options.get_kernel().radius(), 3.0);
    }

    #[test]
    fn test_zero_threads_is_one() {
        assert_eq!(ResizeOptions::new().set_threads(0).get_threads(), 1);
    }

    #[test]
    fn test_set_method() {
        let options = ResizeOptions::new().set_method(ResizeMethod::Bilinear);
        assert_eq!(options.get_kernel().radius(), 1.0);
    }
}
