// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Color: value conversions between color representations.
//!
//! ## Overview
//!
//! Shapes in Easel carry their fill/stroke color as a packed `0xRRGGBB`
//! integer. This crate converts between that packed form, `#rrggbb` /
//! `#rrggbbaa` hex strings, `rgb()` / `rgba()` functional strings, and the
//! [`Rgba`] component struct used when a color needs per-channel arithmetic
//! (for example the hover darkening effect).
//!
//! ## Failure sentinel
//!
//! Malformed input is reported by returning `None`, never by panicking. A
//! rendering layer should be able to feed user-supplied color strings
//! through [`parse`] and simply skip the ones that do not match either
//! grammar.
//!
//! ## Clamping
//!
//! Out-of-range channel values in functional notation clamp into range
//! rather than rejecting the whole string: `rgb(300, -5, 10)` parses as
//! `(255, 0, 10)`. [`from_components`] clamps before packing as well, so a
//! channel overflow can never bleed into a neighboring channel.
//!
//! # Example
//!
//! ```rust
//! use easel_color::{Rgba, from_components, parse, to_hex_string};
//!
//! let packed = from_components(0x12, 0x34, 0x56);
//! assert_eq!(to_hex_string(packed), "#123456");
//!
//! let rgba = parse("#123456").unwrap();
//! assert_eq!(rgba.to_packed(), packed);
//!
//! let clamped = parse("rgb(300, -5, 10)").unwrap();
//! assert_eq!((clamped.red, clamped.green, clamped.blue), (255, 0, 10));
//!
//! assert_eq!(parse("not-a-color"), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// A color split into channel components.
///
/// Channels are `i32` rather than `u8` so intermediate arithmetic (darkening,
/// parsing out-of-range functional notation) can go out of range and be
/// brought back with [`Rgba::clamped`]. Alpha is a `[0, 1]` fraction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    /// Red channel, nominally `0..=255`.
    pub red: i32,
    /// Green channel, nominally `0..=255`.
    pub green: i32,
    /// Blue channel, nominally `0..=255`.
    pub blue: i32,
    /// Opacity, nominally `0.0..=1.0`.
    pub alpha: f32,
}

impl Rgba {
    /// Build from channel values, clamping each into range.
    pub fn new(red: i32, green: i32, blue: i32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
        .clamped()
    }

    /// Unpack a `0xRRGGBB` integer. Alpha defaults to fully opaque.
    ///
    /// Bits above the low 24 are ignored.
    pub fn from_packed(value: u32) -> Self {
        Self {
            red: ((value >> 16) & 0xFF) as i32,
            green: ((value >> 8) & 0xFF) as i32,
            blue: (value & 0xFF) as i32,
            alpha: 1.0,
        }
    }

    /// Pack into a `0xRRGGBB` integer, clamping first. Alpha is discarded.
    pub fn to_packed(self) -> u32 {
        let c = self.clamped();
        ((c.red as u32) << 16) | ((c.green as u32) << 8) | (c.blue as u32)
    }

    /// Clamp every channel into its legal range: negatives go to 0, color
    /// channels saturate at 255, alpha saturates at 1.
    pub fn clamped(self) -> Self {
        Self {
            red: self.red.clamp(0, 255),
            green: self.green.clamp(0, 255),
            blue: self.blue.clamp(0, 255),
            alpha: self.alpha.clamp(0.0, 1.0),
        }
    }

    /// Darken each color channel by `delta`, saturating at black.
    ///
    /// This is the boolean hover effect: a fixed darkening step applied to
    /// the shape's fill while the pointer is over it.
    pub fn darken(self, delta: i32) -> Self {
        Self {
            red: self.red - delta,
            green: self.green - delta,
            blue: self.blue - delta,
            alpha: self.alpha,
        }
        .clamped()
    }
}

/// Pack channel values into a `0xRRGGBB` integer.
///
/// Channels are clamped into `0..=255` before packing, so an overflowing
/// channel can never bleed into its neighbors.
pub fn from_components(red: i32, green: i32, blue: i32) -> u32 {
    Rgba::new(red, green, blue, 1.0).to_packed()
}

/// Format a packed `0xRRGGBB` integer as a `#rrggbb` hex string.
///
/// Always six lowercase digits; bits above the low 24 are masked off.
pub fn to_hex_string(value: u32) -> String {
    format!("#{:06x}", value & 0xFF_FFFF)
}

/// Parse a color string in either `#rrggbb[aa]` hex or `rgb()` / `rgba()`
/// functional notation.
///
/// Returns `None` when the input matches neither grammar. Out-of-range
/// functional components clamp; hex components are inherently in range.
pub fn parse(value: &str) -> Option<Rgba> {
    parse_functional(value).or_else(|| parse_hex(value))
}

/// Parse `#rrggbb` or `#rrggbbaa`.
fn parse_hex(value: &str) -> Option<Rgba> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 && digits.len() != 8 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    let red = channel(0)?;
    let green = channel(2)?;
    let blue = channel(4)?;
    let alpha = if digits.len() == 8 {
        f32::from(channel(6)?) / 255.0
    } else {
        1.0
    };
    Some(Rgba::new(
        i32::from(red),
        i32::from(green),
        i32::from(blue),
        alpha,
    ))
}

/// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)`, clamping components.
fn parse_functional(value: &str) -> Option<Rgba> {
    let rest = value.trim();
    let rest = rest
        .strip_prefix("rgba")
        .or_else(|| rest.strip_prefix("rgb"))?;
    let inner = rest.trim().strip_prefix('(')?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);

    let red = parts.next()?.parse::<i64>().ok()?;
    let green = parts.next()?.parse::<i64>().ok()?;
    let blue = parts.next()?.parse::<i64>().ok()?;
    let alpha = match parts.next() {
        Some(a) => a.parse::<f32>().ok()?,
        None => 1.0,
    };
    if parts.next().is_some() {
        return None;
    }
    // Saturate wide textual values (e.g. "99999999999") into i32 range
    // before the ordinary channel clamp.
    let narrow = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Some(Rgba::new(narrow(red), narrow(green), narrow(blue), alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn hex_round_trip() {
        for s in ["#000000", "#ffffff", "#123456", "#a0b1c2"] {
            let rgba = parse(s).unwrap();
            assert_eq!(to_hex_string(rgba.to_packed()), s);
        }
    }

    #[test]
    fn hex_with_alpha() {
        let rgba = parse("#11223380").unwrap();
        assert_eq!((rgba.red, rgba.green, rgba.blue), (0x11, 0x22, 0x33));
        assert!((rgba.alpha - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn functional_clamps_out_of_range() {
        let rgba = parse("rgb(300, -5, 10)").unwrap();
        assert_eq!((rgba.red, rgba.green, rgba.blue), (255, 0, 10));
        assert_eq!(rgba.alpha, 1.0);
    }

    #[test]
    fn functional_with_alpha_and_spacing() {
        let rgba = parse("rgba( 1 , 2 , 3 , 0.5 )").unwrap();
        assert_eq!((rgba.red, rgba.green, rgba.blue), (1, 2, 3));
        assert_eq!(rgba.alpha, 0.5);

        let over = parse("rgba(0, 0, 0, 4.0)").unwrap();
        assert_eq!(over.alpha, 1.0);
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for s in [
            "",
            "#",
            "#12345",
            "#1234567",
            "#gggggg",
            "rgb(1,2)",
            "rgb(1,2,3,4,5)",
            "rgb(a,b,c)",
            "hsl(0, 0%, 0%)",
            "not-a-color",
        ] {
            assert_eq!(parse(s), None, "{s:?} should not parse");
        }
    }

    #[test]
    fn from_components_clamps_instead_of_wrapping() {
        // 300 would historically wrap into the next channel; it now saturates.
        assert_eq!(from_components(300, 0, 0), 0xFF0000);
        assert_eq!(from_components(-1, 256, 128), 0x00FF80);
        assert_eq!(from_components(0x12, 0x34, 0x56), 0x123456);
    }

    #[test]
    fn packed_round_trip() {
        for v in [0_u32, 0xFF_FFFF, 0x123456, 0xABCDEF] {
            assert_eq!(Rgba::from_packed(v).to_packed(), v);
        }
        // High bits are masked.
        assert_eq!(Rgba::from_packed(0xFF12_3456).to_packed(), 0x12_3456);
    }

    #[test]
    fn darken_saturates_at_black() {
        let dark = Rgba::from_packed(0x20_4080).darken(64);
        assert_eq!((dark.red, dark.green, dark.blue), (0, 0, 0x40));
        assert_eq!(dark.alpha, 1.0);
    }

    #[test]
    fn hex_string_is_zero_padded() {
        assert_eq!(to_hex_string(0xFF), "#0000ff");
        assert_eq!(to_hex_string(0), "#000000".to_string());
    }
}
