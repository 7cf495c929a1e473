use std::fmt;
use std::str::FromStr;

use crate::foundation::color::{CHANNEL_MAX, Rgba16, from_ycbcr, mul_div_ffff, ycbcr_of};
use crate::foundation::error::GlitchError;

/// Blend rule merging a filter's candidate sample into the destination.
///
/// Every variant is a pure function of `(dst, src)`. Samples are straight alpha on both sides;
/// variants that need premultiplied math do the conversion internally and hand back straight
/// alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlendOp {
    /// Porter-Duff source-over.
    Compose,
    /// Candidate replaces the destination.
    Replace,
    /// Saturating RGB sum.
    Add,
    /// RGB sum modulo `0x10000`.
    AddRgbMod,
    /// YCbCr sum modulo 256, chroma centered on 128.
    AddYccMod,
    /// RGB product.
    MulRgb,
    /// YCbCr product, chroma centered on 128.
    MulYcc,
    /// RGB exclusive or.
    XorRgb,
    /// YCbCr exclusive or, chroma centered on 128.
    XorYcc,
}

impl BlendOp {
    /// Registry order. Random draws over the full registry index into this table.
    pub const ALL: [BlendOp; 9] = [
        BlendOp::Compose,
        BlendOp::Replace,
        BlendOp::Add,
        BlendOp::AddRgbMod,
        BlendOp::AddYccMod,
        BlendOp::MulRgb,
        BlendOp::MulYcc,
        BlendOp::XorRgb,
        BlendOp::XorYcc,
    ];

    /// Canonical registry name.
    pub fn name(self) -> &'static str {
        match self {
            BlendOp::Compose => "cmp",
            BlendOp::Replace => "src",
            BlendOp::Add => "add",
            BlendOp::AddRgbMod => "addrgbm",
            BlendOp::AddYccMod => "addyccm",
            BlendOp::MulRgb => "mulrgb",
            BlendOp::MulYcc => "mulycc",
            BlendOp::XorRgb => "xorrgb",
            BlendOp::XorYcc => "xorycc",
        }
    }

    fn alias(self) -> Option<&'static str> {
        match self {
            BlendOp::Compose => Some("compose"),
            BlendOp::Replace => Some("replace"),
            _ => None,
        }
    }

    /// Look up an operation by canonical name or alias.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name || op.alias() == Some(name))
    }

    /// Sorted canonical names.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = Self::ALL.iter().map(|op| op.name()).collect();
        names.sort_unstable();
        names
    }

    pub fn apply(self, dst: Rgba16, src: Rgba16) -> Rgba16 {
        match self {
            BlendOp::Compose => over(dst, src),
            BlendOp::Replace => src,
            BlendOp::Add => sum_rgb(dst, src, |s, d| (s + d).min(CHANNEL_MAX)),
            BlendOp::AddRgbMod => sum_rgb(dst, src, |s, d| (s + d) & CHANNEL_MAX),
            BlendOp::AddYccMod => blend_ycc(dst, src, |s, d| s.wrapping_add(d), |s, d| {
                ((i32::from(s) + i32::from(d) - 128) & 0xff) as u8
            }),
            BlendOp::MulRgb => {
                if src[3] == 0 || dst[3] == 0 {
                    return compose_premul([0; 3], u32::from(src[3]), dst);
                }
                sum_rgb(dst, src, mul_div_ffff)
            }
            BlendOp::MulYcc => blend_ycc(
                dst,
                src,
                |s, d| (u32::from(s) * u32::from(d) / 0xff) as u8,
                |s, d| ((i32::from(s) - 128) * (i32::from(d) - 128) / 0xff + 128) as u8,
            ),
            BlendOp::XorRgb => sum_rgb(dst, src, |s, d| s ^ d),
            BlendOp::XorYcc => blend_ycc(
                dst,
                src,
                |s, d| s ^ d,
                |s, d| (((i32::from(s) - 128) ^ (i32::from(d) - 128)) + 128) as u8,
            ),
        }
    }
}

impl fmt::Display for BlendOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendOp {
    type Err = GlitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| GlitchError::configuration(format!("unknown op: {s}")))
    }
}

/// Source-over of straight `src` onto straight `dst`.
pub fn over(dst: Rgba16, src: Rgba16) -> Rgba16 {
    let sa = u32::from(src[3]);
    let premul = [0, 1, 2].map(|i| mul_div_ffff(u32::from(src[i]), sa));
    compose_premul(premul, sa, dst)
}

fn out_alpha(sa: u32, da: u32) -> u32 {
    sa + mul_div_ffff(da, CHANNEL_MAX - sa)
}

// `src_premul` is already scaled by its alpha; `dst` is straight.
fn compose_premul(src_premul: [u32; 3], sa: u32, dst: Rgba16) -> Rgba16 {
    let da = u32::from(dst[3]);
    let inv = CHANNEL_MAX - sa;
    let a = out_alpha(sa, da);

    let mut out = [0u16; 4];
    for i in 0..3 {
        let dst_premul = mul_div_ffff(u32::from(dst[i]), da);
        out[i] = unpremultiply(src_premul[i] + mul_div_ffff(dst_premul, inv), a);
    }
    out[3] = a.min(CHANNEL_MAX) as u16;
    out
}

fn unpremultiply(c: u32, a: u32) -> u16 {
    if a == 0 {
        return 0;
    }
    ((u64::from(c) * u64::from(CHANNEL_MAX)) / u64::from(a)).min(u64::from(CHANNEL_MAX)) as u16
}

// Straight RGB of a sample, zeroed when fully transparent.
fn straight_rgb(px: Rgba16) -> [u32; 3] {
    if px[3] == 0 {
        return [0; 3];
    }
    [u32::from(px[0]), u32::from(px[1]), u32::from(px[2])]
}

fn sum_rgb(dst: Rgba16, src: Rgba16, f: impl Fn(u32, u32) -> u32) -> Rgba16 {
    let sa = u32::from(src[3]);
    let a = out_alpha(sa, u32::from(dst[3]));
    let s = straight_rgb(src);
    let mixed = if dst[3] == 0 {
        s
    } else {
        let d = straight_rgb(dst);
        [0, 1, 2].map(|i| f(s[i], d[i]))
    };
    let premul = mixed.map(|c| mul_div_ffff(c.min(CHANNEL_MAX), a));
    compose_premul(premul, sa, dst)
}

// YCbCr of a sample, neutral black when fully transparent.
fn straight_ycc(px: Rgba16) -> [u8; 3] {
    if px[3] == 0 {
        return [0, 128, 128];
    }
    ycbcr_of(px)
}

fn blend_ycc(
    dst: Rgba16,
    src: Rgba16,
    luma: impl Fn(u8, u8) -> u8,
    chroma: impl Fn(u8, u8) -> u8,
) -> Rgba16 {
    let s = straight_ycc(src);
    let d = straight_ycc(dst);
    let mixed = [luma(s[0], d[0]), chroma(s[1], d[1]), chroma(s[2], d[2])];
    over(dst, from_ycbcr(mixed, src[3]))
}

#[cfg(test)]
#[path = "../../tests/unit/blend/ops.rs"]
mod tests;
