// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, fmt};

pub const PALETTE_ENV: &str = "TIMEGRID_PALETTE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(rgb: u32) -> Self {
        Self::new(((rgb >> 16) & 0xFF) as u8, ((rgb >> 8) & 0xFF) as u8, (rgb & 0xFF) as u8)
    }

    /// Composites `self` at `alpha` over an opaque `background`.
    pub fn over(self, background: Rgb, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (f32::from(fg) * alpha + f32::from(bg) * (1.0 - alpha)).round() as u8
        };
        Rgb::new(mix(self.r, background.r), mix(self.g, background.g), mix(self.b, background.b))
    }

    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

const DEFAULT_COLORS: [Rgb; 10] = [
    Rgb::from_u32(0x4E79A7),
    Rgb::from_u32(0xF28E2B),
    Rgb::from_u32(0xE15759),
    Rgb::from_u32(0x76B7B2),
    Rgb::from_u32(0x59A14F),
    Rgb::from_u32(0xEDC948),
    Rgb::from_u32(0xB07AA1),
    Rgb::from_u32(0xFF9DA7),
    Rgb::from_u32(0x9C755F),
    Rgb::from_u32(0xBAB0AC),
];

/// Fixed, ordered subject colors. Subject `i` gets `colors[i % len]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Reads `TIMEGRID_PALETTE` (`#RRGGBB,#RRGGBB,...`); unset or blank keeps the default.
    pub fn from_env() -> Result<Self, PaletteError> {
        match env::var(PALETTE_ENV) {
            Ok(value) if value.trim().is_empty() => Ok(Self::default()),
            Ok(value) => Self::parse_csv(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(PaletteError::InvalidColor {
                value: "<non-unicode>".to_owned(),
            }),
        }
    }

    pub fn parse_csv(value: &str) -> Result<Self, PaletteError> {
        let colors = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_hex_color)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_for(&self, subject_index: usize) -> Rgb {
        self.colors[subject_index % self.colors.len()]
    }
}

fn parse_hex_color(value: &str) -> Result<Rgb, PaletteError> {
    let invalid = || PaletteError::InvalidColor {
        value: value.to_owned(),
    };
    let hex = value
        .strip_prefix('#')
        .or_else(|| value.strip_prefix("0x"))
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    Ok(Rgb::from_u32(rgb))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    Empty,
    InvalidColor { value: String },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "{PALETTE_ENV}: palette must contain at least one color"),
            Self::InvalidColor { value } => {
                write!(f, "{PALETTE_ENV}: invalid color '{value}' (expected #RRGGBB)")
            }
        }
    }
}

impl std::error::Error for PaletteError {}
