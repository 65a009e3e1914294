/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "serde")]

use serde::ser::*;

use crate::bit_depth::BitDepth;
use crate::colorspace::{ColorSpace, YCbCrSubsampleRatio};

impl Serialize for ColorSpace {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // colorspace serialization is simply it's debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for BitDepth {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for YCbCrSubsampleRatio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let ratio = match self {
            Self::Ratio444 => "4:4:4",
            Self::Ratio422 => "4:2:2",
            Self::Ratio420 => "4:2:0",
            Self::Ratio440 => "4:4:0",
            Self::Ratio411 => "4:1:1",
            Self::Ratio410 => "4:1:0"
        };
        serializer.serialize_str(ratio)
    }
}
