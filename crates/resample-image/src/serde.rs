/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "serde-support")]

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::image::{Image, PixelLayout};

impl Serialize for PixelLayout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{self:?}"))
    }
}

/// Serializes image information, not the pixels
impl Serialize for Image {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let (width, height) = self.dimensions();

        let mut state = serializer.serialize_struct("Image", 5)?;

        state.serialize_field("width", &width)?;
        state.serialize_field("height", &height)?;
        state.serialize_field("colorspace", &self.colorspace())?;
        state.serialize_field("depth", &self.depth())?;
        state.serialize_field("layout", &self.layout())?;
        state.end()
    }
}
