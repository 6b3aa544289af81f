//! Human-readable names for colors.
//!
//! Two namers run side by side: the nearest CSS3 keyword by squared RGB
//! distance, and a descriptive name built from hue, saturation and lightness
//! bands. [`describe`] combines both into the record the API returns.
use serde::Serialize;

use super::{css::CSS3_COLORS, math::Rgb};

pub const UNKNOWN_COLOR: &str = "Unknown Color";

/// Color words used to split concatenated CSS keywords, longest first.
///
/// Longer words must be tried before shorter ones that could also end the
/// same keyword, so the order here is load-bearing.
static NAME_SUFFIXES: [&str; 87] = [
    "aquamarine", "chartreuse", "chocolate", "firebrick", "gainsboro", "goldenrod", "turquoise",
    "honeydew", "lavender", "moccasin", "seashell", "antique", "chiffon", "fuchsia", "magenta",
    "rebecca", "thistle", "almond", "bisque", "dodger", "floral", "forest", "indigo", "medium",
    "orange", "orchid", "papaya", "powder", "purple", "salmon", "sienna", "silver", "spring",
    "tomato", "violet", "yellow", "azure", "beige", "black", "brown", "burly", "cadet", "coral",
    "cream", "ghost", "green", "ivory", "khaki", "lemon", "light", "linen", "olive", "peach",
    "royal", "sandy", "slate", "smoke", "steel", "wheat", "white", "aqua", "blue", "cyan", "dark",
    "deep", "gold", "gray", "grey", "lawn", "lime", "mint", "navy", "pale", "peru", "pink", "plum",
    "rose", "rosy", "snow", "teal", "wood", "hot", "old", "red", "sea", "sky", "tan",
];

/// Hue bands in degrees, `start <= hue < end`. Red covers both ends of the circle.
static HUE_BANDS: [(f64, f64, &str); 14] = [
    (345.0, 360.0, "Red"),
    (0.0, 15.0, "Red"),
    (15.0, 45.0, "Orange"),
    (45.0, 70.0, "Golden Yellow"),
    (70.0, 100.0, "Lime"),
    (100.0, 135.0, "Green"),
    (135.0, 165.0, "Spring Green"),
    (165.0, 190.0, "Teal"),
    (190.0, 215.0, "Cyan"),
    (215.0, 245.0, "Azure"),
    (245.0, 275.0, "Blue"),
    (275.0, 305.0, "Indigo"),
    (305.0, 330.0, "Violet"),
    (330.0, 345.0, "Magenta"),
];

/// Below this saturation a color is named as a neutral.
const NEUTRAL_SATURATION: f64 = 0.12;

#[derive(Debug, Clone, PartialEq)]
pub struct CssMatch {
    /// Formatted keyword, e.g. `Dark Slate Blue`.
    pub name: String,
    pub hex: String,
    pub squared_distance: u32,
    pub exact: bool,
}

impl CssMatch {
    pub fn distance(&self) -> f64 {
        f64::from(self.squared_distance).sqrt()
    }
}

/// Display metadata for one color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorDetails {
    pub descriptive_name: String,
    pub css_name: Option<String>,
    pub css_hex: Option<String>,
    pub css_distance: Option<f64>,
    pub css_exact: bool,
    pub css_display_name: Option<String>,
    pub display_name: String,
}

/// Turn a raw keyword into title-cased words.
///
/// Separated names (`dark-slate_blue`, `dark slate blue`) are title-cased word
/// by word. A single token such as `darkslateblue` is split by repeatedly
/// stripping the longest known color word from its end.
pub fn format_color_name(raw: &str) -> String {
    let name = raw.replace(['-', '_'], " ");
    let name = name.trim();

    if name.is_empty() {
        return UNKNOWN_COLOR.to_string();
    }

    if name.contains(char::is_whitespace) {
        return name
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");
    }

    split_compound(&name.to_lowercase())
}

fn split_compound(name: &str) -> String {
    for suffix in &NAME_SUFFIXES {
        // a suffix equal to the whole remainder is never stripped
        if name.len() > suffix.len() && name.ends_with(*suffix) {
            let prefix = &name[..name.len() - suffix.len()];

            return format!("{} {}", split_compound(prefix), capitalize(suffix));
        }
    }

    capitalize(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Closest CSS3 keyword to `hex`, or `None` when `hex` does not parse.
pub fn nearest_css_name(hex: &str) -> Option<CssMatch> {
    let target = Rgb::parse_hex(hex).ok()?;

    let mut best: Option<(&str, Rgb, u32)> = None;
    for (name, color) in &CSS3_COLORS {
        let distance = target.squared_distance(color);

        if best.is_none_or(|(_, _, best_distance)| distance < best_distance) {
            best = Some((*name, *color, distance));
        }
    }

    best.map(|(name, color, squared_distance)| CssMatch {
        name: format_color_name(name),
        hex: color.to_hex(),
        squared_distance,
        exact: color == target,
    })
}

/// Descriptive name from hue, saturation and lightness bands, e.g.
/// `Vivid Dark Azure` or `Neutral Gray`.
pub fn describe_color(hex: &str) -> String {
    let Ok(color) = Rgb::parse_hex(hex) else {
        return UNKNOWN_COLOR.to_string();
    };

    let (h, l, s) = color.to_hls();
    let hue = (h * 360.0).rem_euclid(360.0);

    if s < NEUTRAL_SATURATION {
        return neutral_name(l).to_string();
    }

    let hue_name = HUE_BANDS
        .iter()
        .find(|(start, end, _)| *start <= hue && hue < *end)
        .map_or("Color", |(_, _, name)| *name);

    let saturation_adj = match s {
        s if s < 0.28 => "Soft",
        s if s < 0.55 => "",
        s if s < 0.78 => "Vivid",
        _ => "Brilliant",
    };

    let lightness_adj = match l {
        l if l < 0.2 => "Deep",
        l if l < 0.35 => "Dark",
        l if l < 0.5 => "",
        l if l < 0.7 => "Light",
        _ => "Pale",
    };

    [saturation_adj, lightness_adj, hue_name]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn neutral_name(lightness: f64) -> &'static str {
    match lightness {
        l if l < 0.08 => "Near Black",
        l if l < 0.22 => "Very Dark Gray",
        l if l < 0.38 => "Dark Gray",
        l if l < 0.65 => "Neutral Gray",
        l if l < 0.85 => "Light Gray",
        _ => "Near White",
    }
}

/// Both namers combined into one display record.
pub fn describe(hex: &str) -> ColorDetails {
    let descriptive_name = describe_color(hex);
    let css = nearest_css_name(hex);

    let css_display_name = css.as_ref().map(|css| {
        let prefix = if css.exact { "" } else { "~ " };
        format!("{prefix}{}", css.name)
    });

    let display_name = match &css_display_name {
        Some(css_display_name) => format!("{descriptive_name} / {css_display_name}"),
        None => descriptive_name.clone(),
    };

    ColorDetails {
        descriptive_name,
        css_distance: css.as_ref().map(|css| round2(css.distance())),
        css_exact: css.as_ref().is_some_and(|css| css.exact),
        css_hex: css.as_ref().map(|css| css.hex.clone()),
        css_name: css.map(|css| css.name),
        css_display_name,
        display_name,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
