/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "serde")]

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::kernels::ResizeMethod;
use crate::options::ResizeOptions;

impl Serialize for ResizeMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for ResizeOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("ResizeOptions", 3)?;

        state.serialize_field("support", &self.get_kernel().radius())?;
        state.serialize_field("threads", &self.get_threads())?;
        state.serialize_field("linear_light", &self.get_linear_light())?;
        state.end()
    }
}
