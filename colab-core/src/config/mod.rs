//! Configuration module for Co-Lab.
//!
//! Theme selection and the layout constants record.

mod settings;

pub use settings::{
    LayoutConstants, Theme, DEFAULT_COLLAPSED_WIDTH, DEFAULT_COLLAPSE_BUFFER,
    DEFAULT_MIN_LEFT_WIDTH, DEFAULT_MIN_RIGHT_WIDTH, DEFAULT_RESIZER_WIDTH, MIN_CONTAINER_WIDTH,
};
