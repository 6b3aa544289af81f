//! # Colors
//!
//! Hex parsing and averaging live in [`math`], naming in [`naming`], and the
//! CSS3 keyword table in [`css`].
pub mod css;
pub mod math;
pub mod naming;

pub use math::{ChannelSums, ColorError, Rgb, normalize_hex};
pub use naming::{ColorDetails, CssMatch, describe, describe_color, format_color_name, nearest_css_name};

/// A fresh candidate shade from the thread-local generator.
pub fn generate_blue_shade() -> Rgb {
    Rgb::random_blue(&mut rand::thread_rng())
}
