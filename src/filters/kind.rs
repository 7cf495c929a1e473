use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::filters::filter::{BitRasp, Filter, RaspBitOp, RaspMode, RgbaChannel, YccChannel};
use crate::foundation::error::GlitchError;

/// Discriminant of the 22 filter kinds; the registry behind allow-lists and random draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKind {
    Color,
    Gray,
    Source,
    SetRgbaComp,
    SetAlpha,
    SetYccComp,
    PermRgb,
    PermRgba,
    PermYcc,
    CopyComp,
    CToA,
    Mix,
    Quant,
    QuantRgba,
    QuantYcca,
    QuantY,
    Inv,
    InvRgbaComp,
    InvAlpha,
    InvYccComp,
    Grayscale,
    BitRasp,
}

impl FilterKind {
    /// Registry order. Random draws over the full registry index into this table.
    pub const ALL: [FilterKind; 22] = [
        FilterKind::Color,
        FilterKind::Gray,
        FilterKind::Source,
        FilterKind::SetRgbaComp,
        FilterKind::SetAlpha,
        FilterKind::SetYccComp,
        FilterKind::PermRgb,
        FilterKind::PermRgba,
        FilterKind::PermYcc,
        FilterKind::CopyComp,
        FilterKind::CToA,
        FilterKind::Mix,
        FilterKind::Quant,
        FilterKind::QuantRgba,
        FilterKind::QuantYcca,
        FilterKind::QuantY,
        FilterKind::Inv,
        FilterKind::InvRgbaComp,
        FilterKind::InvAlpha,
        FilterKind::InvYccComp,
        FilterKind::Grayscale,
        FilterKind::BitRasp,
    ];

    /// Canonical short name used by allow-lists and presets.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Color => "color",
            FilterKind::Gray => "gray",
            FilterKind::Source => "src",
            FilterKind::SetRgbaComp => "rgba",
            FilterKind::SetAlpha => "seta",
            FilterKind::SetYccComp => "ycc",
            FilterKind::PermRgb => "prgb",
            FilterKind::PermRgba => "prgba",
            FilterKind::PermYcc => "pycc",
            FilterKind::CopyComp => "copy",
            FilterKind::CToA => "ctoa",
            FilterKind::Mix => "mix",
            FilterKind::Quant => "quant",
            FilterKind::QuantRgba => "qrgba",
            FilterKind::QuantYcca => "qycca",
            FilterKind::QuantY => "qy",
            FilterKind::Inv => "inv",
            FilterKind::InvRgbaComp => "invrgba",
            FilterKind::InvAlpha => "inva",
            FilterKind::InvYccComp => "invycc",
            FilterKind::Grayscale => "gs",
            FilterKind::BitRasp => "rasp",
        }
    }

    /// Descriptive long name, accepted wherever a name is.
    pub fn long_name(self) -> &'static str {
        match self {
            FilterKind::Color => "color",
            FilterKind::Gray => "gray",
            FilterKind::Source => "source",
            FilterKind::SetRgbaComp => "set-rgba-comp",
            FilterKind::SetAlpha => "set-alpha",
            FilterKind::SetYccComp => "set-ycc-comp",
            FilterKind::PermRgb => "perm-rgb",
            FilterKind::PermRgba => "perm-rgba",
            FilterKind::PermYcc => "perm-ycc",
            FilterKind::CopyComp => "copy-comp",
            FilterKind::CToA => "ctoa",
            FilterKind::Mix => "mix",
            FilterKind::Quant => "quant",
            FilterKind::QuantRgba => "quant-rgba",
            FilterKind::QuantYcca => "quant-ycca",
            FilterKind::QuantY => "quant-y",
            FilterKind::Inv => "inv",
            FilterKind::InvRgbaComp => "inv-rgba-comp",
            FilterKind::InvAlpha => "inv-alpha",
            FilterKind::InvYccComp => "inv-ycc-comp",
            FilterKind::Grayscale => "grayscale",
            FilterKind::BitRasp => "bit-rasp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name || k.long_name() == name)
    }

    /// Sorted canonical names.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = Self::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names
    }

    /// Draw a filter of this kind with uniformly random parameters.
    pub fn randomize<R: Rng + ?Sized>(self, rng: &mut R) -> Filter {
        match self {
            FilterKind::Color => Filter::Color(rng.random()),
            FilterKind::Gray => Filter::Gray {
                value: rng.random(),
                alpha: rng.random(),
            },
            FilterKind::Source => Filter::Source,
            FilterKind::SetRgbaComp => Filter::SetRgbaComp {
                channel: pick(rng, &RgbaChannel::ALL),
                value: rng.random(),
            },
            FilterKind::SetAlpha => Filter::SetAlpha {
                value: rng.random(),
            },
            FilterKind::SetYccComp => Filter::SetYccComp {
                channel: pick(rng, &YccChannel::ALL),
                value: rng.random(),
            },
            FilterKind::PermRgb => {
                let mut p = [RgbaChannel::R, RgbaChannel::G, RgbaChannel::B];
                p.shuffle(rng);
                Filter::PermRgb(p)
            }
            FilterKind::PermRgba => {
                let mut p = RgbaChannel::ALL;
                p.shuffle(rng);
                Filter::PermRgba(p)
            }
            FilterKind::PermYcc => {
                let mut p = YccChannel::ALL;
                p.shuffle(rng);
                Filter::PermYcc(p)
            }
            FilterKind::CopyComp => {
                let mut p = RgbaChannel::ALL;
                p.shuffle(rng);
                Filter::CopyComp {
                    dest: p[0],
                    src: p[1],
                }
            }
            FilterKind::CToA => Filter::CToA {
                src: pick(rng, &RgbaChannel::ALL[..3]),
            },
            FilterKind::Mix => {
                let mut m = [[0.0; 3]; 3];
                for v in m.iter_mut().flatten() {
                    *v = rng.random_range(-1.0..1.0);
                }
                Filter::Mix(m)
            }
            FilterKind::Quant => Filter::Quant {
                rgb: shift(rng),
                alpha: shift(rng),
            },
            FilterKind::QuantRgba => {
                Filter::QuantRgba([shift(rng), shift(rng), shift(rng), shift(rng)])
            }
            FilterKind::QuantYcca => {
                Filter::QuantYcca([shift(rng), shift(rng), shift(rng), shift(rng)])
            }
            FilterKind::QuantY => Filter::QuantY { luma: shift(rng) },
            FilterKind::Inv => Filter::Inv,
            FilterKind::InvRgbaComp => Filter::InvRgbaComp {
                channel: pick(rng, &RgbaChannel::ALL),
            },
            FilterKind::InvAlpha => Filter::InvAlpha,
            FilterKind::InvYccComp => Filter::InvYccComp {
                channel: pick(rng, &YccChannel::ALL),
            },
            FilterKind::Grayscale => Filter::Grayscale,
            FilterKind::BitRasp => {
                let mode = pick(rng, &RaspMode::ALL);
                let op = pick(rng, &RaspBitOp::ALL);
                let alpha = rng.random_bool(0.5);
                let rotation = rng.random_range(0..8u8);
                let mask = if rng.random_bool(0.5) {
                    let bits = rng.random_range(2..=8u32);
                    ((1u32 << bits) - 1) as u8
                } else {
                    rng.random()
                };
                Filter::BitRasp(BitRasp {
                    mode,
                    op,
                    rotation,
                    mask,
                    alpha,
                })
            }
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = GlitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| GlitchError::configuration(format!("unknown filter: {s}")))
    }
}

fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

fn shift<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(0..8)
}

#[cfg(test)]
#[path = "../../tests/unit/filters/kind.rs"]
mod tests;
