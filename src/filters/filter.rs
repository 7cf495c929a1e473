use std::fmt;

use crate::blend::ops::BlendOp;
use crate::filters::kind::FilterKind;
use crate::foundation::color::{CHANNEL_MAX, Rgba16, from_ycbcr, widen8, ycbcr_of};
use crate::foundation::error::{GlitchError, GlitchResult};
use crate::pixels::buffer::{PixelBuffer, PixelRect};

/// RGBA channel selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RgbaChannel {
    R,
    G,
    B,
    A,
}

impl RgbaChannel {
    pub const ALL: [RgbaChannel; 4] = [
        RgbaChannel::R,
        RgbaChannel::G,
        RgbaChannel::B,
        RgbaChannel::A,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// YCbCr channel selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum YccChannel {
    Y,
    Cb,
    Cr,
}

impl YccChannel {
    pub const ALL: [YccChannel; 3] = [YccChannel::Y, YccChannel::Cb, YccChannel::Cr];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Coordinate function feeding [`BitRasp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RaspMode {
    X,
    Y,
    Sum,
    Or,
    And,
    Xor,
}

impl RaspMode {
    pub const ALL: [RaspMode; 6] = [
        RaspMode::X,
        RaspMode::Y,
        RaspMode::Sum,
        RaspMode::Or,
        RaspMode::And,
        RaspMode::Xor,
    ];

    fn eval(self, x: u32, y: u32) -> u32 {
        match self {
            RaspMode::X => x,
            RaspMode::Y => y,
            RaspMode::Sum => x.wrapping_add(y),
            RaspMode::Or => x | y,
            RaspMode::And => x & y,
            RaspMode::Xor => x ^ y,
        }
    }
}

/// How [`BitRasp`] folds its pattern into a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RaspBitOp {
    And,
    Xor,
    Or,
    Replace,
}

impl RaspBitOp {
    pub const ALL: [RaspBitOp; 4] = [
        RaspBitOp::And,
        RaspBitOp::Xor,
        RaspBitOp::Or,
        RaspBitOp::Replace,
    ];
}

/// Parameters of the coordinate-driven bit pattern filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitRasp {
    pub mode: RaspMode,
    pub op: RaspBitOp,
    /// Right rotation of the 8-bit pattern, taken modulo 8.
    pub rotation: u8,
    pub mask: u8,
    /// Also fold the pattern into alpha.
    pub alpha: bool,
}

impl BitRasp {
    fn pattern(self, x: u32, y: u32) -> u16 {
        let mix = (self.mode.eval(x, y) & 0xff) as u8;
        u16::from(mix.rotate_right(u32::from(self.rotation & 7)) & self.mask) << 8
    }

    fn fold(self, c: u16, pattern: u16) -> u16 {
        match self.op {
            RaspBitOp::And => c & pattern,
            RaspBitOp::Xor => c ^ pattern,
            RaspBitOp::Or => c | pattern,
            RaspBitOp::Replace => (c & !(u16::from(self.mask) << 8)) | pattern,
        }
    }
}

/// A fully parameterized pixel filter.
///
/// Instances are immutable once drawn and are shared read-only by every worker of a stage.
/// Quantization shifts above 7 are treated as 7.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    /// Constant straight RGBA8 color.
    Color([u8; 4]),
    /// Constant gray level with its own alpha.
    Gray { value: u8, alpha: u8 },
    /// Source sample, unchanged.
    Source,
    SetRgbaComp { channel: RgbaChannel, value: u8 },
    SetAlpha { value: u8 },
    SetYccComp { channel: YccChannel, value: u8 },
    /// `out[i] = in[perm[i]]` over RGB; alpha passes through.
    PermRgb([RgbaChannel; 3]),
    PermRgba([RgbaChannel; 4]),
    PermYcc([YccChannel; 3]),
    CopyComp { dest: RgbaChannel, src: RgbaChannel },
    /// Copy a color channel into alpha.
    CToA { src: RgbaChannel },
    /// Row-major 3x3 RGB matrix.
    Mix([[f64; 3]; 3]),
    Quant { rgb: u8, alpha: u8 },
    QuantRgba([u8; 4]),
    QuantYcca([u8; 4]),
    QuantY { luma: u8 },
    Inv,
    InvRgbaComp { channel: RgbaChannel },
    InvAlpha,
    InvYccComp { channel: YccChannel },
    Grayscale,
    BitRasp(BitRasp),
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Color(_) => FilterKind::Color,
            Filter::Gray { .. } => FilterKind::Gray,
            Filter::Source => FilterKind::Source,
            Filter::SetRgbaComp { .. } => FilterKind::SetRgbaComp,
            Filter::SetAlpha { .. } => FilterKind::SetAlpha,
            Filter::SetYccComp { .. } => FilterKind::SetYccComp,
            Filter::PermRgb(_) => FilterKind::PermRgb,
            Filter::PermRgba(_) => FilterKind::PermRgba,
            Filter::PermYcc(_) => FilterKind::PermYcc,
            Filter::CopyComp { .. } => FilterKind::CopyComp,
            Filter::CToA { .. } => FilterKind::CToA,
            Filter::Mix(_) => FilterKind::Mix,
            Filter::Quant { .. } => FilterKind::Quant,
            Filter::QuantRgba(_) => FilterKind::QuantRgba,
            Filter::QuantYcca(_) => FilterKind::QuantYcca,
            Filter::QuantY { .. } => FilterKind::QuantY,
            Filter::Inv => FilterKind::Inv,
            Filter::InvRgbaComp { .. } => FilterKind::InvRgbaComp,
            Filter::InvAlpha => FilterKind::InvAlpha,
            Filter::InvYccComp { .. } => FilterKind::InvYccComp,
            Filter::Grayscale => FilterKind::Grayscale,
            Filter::BitRasp(_) => FilterKind::BitRasp,
        }
    }

    /// Candidate sample for source pixel `src` written at absolute destination `(x, y)`.
    pub fn candidate(&self, src: Rgba16, x: u32, y: u32) -> Rgba16 {
        match *self {
            Filter::Color(c) => c.map(widen8),
            Filter::Gray { value, alpha } => {
                let v = widen8(value);
                [v, v, v, widen8(alpha)]
            }
            Filter::Source => src,
            Filter::SetRgbaComp { channel, value } => set_channel(src, channel, value),
            Filter::SetAlpha { value } => set_channel(src, RgbaChannel::A, value),
            Filter::SetYccComp { channel, value } => {
                let mut ycc = ycbcr_of(src);
                ycc[channel.index()] = value;
                from_ycbcr(ycc, src[3])
            }
            Filter::PermRgb(p) => [src[p[0].index()], src[p[1].index()], src[p[2].index()], src[3]],
            Filter::PermRgba(p) => p.map(|c| src[c.index()]),
            Filter::PermYcc(p) => {
                let ycc = ycbcr_of(src);
                from_ycbcr(p.map(|c| ycc[c.index()]), src[3])
            }
            Filter::CopyComp { dest, src: from } => copy_channel(src, dest, from),
            Filter::CToA { src: from } => copy_channel(src, RgbaChannel::A, from),
            Filter::Mix(m) => {
                let rgb = [f64::from(src[0]), f64::from(src[1]), f64::from(src[2])];
                let row = |r: [f64; 3]| -> u16 {
                    let v = (r[0] * rgb[0] + r[1] * rgb[1] + r[2] * rgb[2]) as i32;
                    v.clamp(0, CHANNEL_MAX as i32) as u16
                };
                [row(m[0]), row(m[1]), row(m[2]), src[3]]
            }
            Filter::Quant { rgb, alpha } => quant_rgba(src, [rgb, rgb, rgb, alpha]),
            Filter::QuantRgba(shifts) => quant_rgba(src, shifts),
            Filter::QuantYcca(shifts) => quant_ycca(src, shifts),
            Filter::QuantY { luma } => quant_ycca(src, [luma, 0, 0, 0]),
            Filter::Inv => [
                0xffff - src[0],
                0xffff - src[1],
                0xffff - src[2],
                src[3],
            ],
            Filter::InvRgbaComp { channel } => invert_channel(src, channel),
            Filter::InvAlpha => invert_channel(src, RgbaChannel::A),
            Filter::InvYccComp { channel } => {
                let mut ycc = ycbcr_of(src);
                let i = channel.index();
                ycc[i] = 255 - ycc[i];
                if channel != YccChannel::Y {
                    // chroma is centered on 128
                    ycc[i] = ycc[i].saturating_add(1);
                }
                from_ycbcr(ycc, src[3])
            }
            Filter::Grayscale => {
                let [r, g, b] = [src[0], src[1], src[2]].map(u32::from);
                let luma = ((19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 16) as u16;
                [luma, luma, luma, src[3]]
            }
            Filter::BitRasp(rasp) => {
                let pattern = rasp.pattern(x, y);
                let alpha = if rasp.alpha {
                    rasp.fold(src[3], pattern)
                } else {
                    src[3]
                };
                [
                    rasp.fold(src[0], pattern),
                    rasp.fold(src[1], pattern),
                    rasp.fold(src[2], pattern),
                    alpha,
                ]
            }
        }
    }

    /// Blend one row span: `dst` and `src` hold the same number of RGBA16 pixels, the first of
    /// which sits at absolute destination `(x0, y)`.
    pub(crate) fn apply_span(&self, op: BlendOp, dst: &mut [u16], src: &[u16], x0: u32, y: u32) {
        for ((d, s), x) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)).zip(x0..) {
            let current = [d[0], d[1], d[2], d[3]];
            let candidate = self.candidate([s[0], s[1], s[2], s[3]], x, y);
            d.copy_from_slice(&op.apply(current, candidate));
        }
    }

    /// Apply over `dst_rect` of `dst`, reading the same-sized rectangle of `src` whose top-left
    /// corner is `src_origin`.
    pub fn apply(
        &self,
        op: BlendOp,
        dst: &mut PixelBuffer,
        dst_rect: PixelRect,
        src: &PixelBuffer,
        src_origin: (u32, u32),
    ) -> GlitchResult<()> {
        let src_rect = PixelRect::new(src_origin.0, src_origin.1, dst_rect.width, dst_rect.height);
        if dst_rect.right() > u64::from(dst.width())
            || dst_rect.bottom() > u64::from(dst.height())
            || src_rect.right() > u64::from(src.width())
            || src_rect.bottom() > u64::from(src.height())
        {
            return Err(GlitchError::Other(anyhow::anyhow!(
                "filter rect {dst_rect:?} <- {src_rect:?} exceeds buffer bounds"
            )));
        }
        if dst_rect.is_empty() {
            return Ok(());
        }

        for dy in 0..dst_rect.height {
            let y = dst_rect.y + dy;
            let src_span = src.span(src_rect.x, src_rect.y + dy, dst_rect.width);
            let dst_span = dst.span_mut(dst_rect.x, y, dst_rect.width);
            self.apply_span(op, dst_span, src_span, dst_rect.x, y);
        }
        Ok(())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind().name();
        match self {
            Filter::Color([r, g, b, a]) => write!(f, "{name}:[{r},{g},{b},{a}]"),
            Filter::Gray { value, alpha } => write!(f, "{name}:[{value},{alpha}]"),
            Filter::SetRgbaComp { channel, value } => write!(f, "{name}:{{{channel:?}:{value}}}"),
            Filter::SetAlpha { value } => write!(f, "{name}:{{{value}}}"),
            Filter::SetYccComp { channel, value } => write!(f, "{name}:{{{channel:?}:{value}}}"),
            Filter::PermRgb(p) => write!(f, "{name}:{p:?}"),
            Filter::PermRgba(p) => write!(f, "{name}:{p:?}"),
            Filter::PermYcc(p) => write!(f, "{name}:{p:?}"),
            Filter::CopyComp { dest, src } => write!(f, "{name}:[{dest:?}<-{src:?}]"),
            Filter::CToA { src } => write!(f, "{name}:[{src:?}]"),
            Filter::Mix(m) => write!(
                f,
                "{name}:[{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}]",
                m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2]
            ),
            Filter::Quant { rgb, alpha } => write!(f, "{name}:[{rgb},{alpha}]"),
            Filter::QuantRgba(s) | Filter::QuantYcca(s) => write!(f, "{name}:{s:?}"),
            Filter::QuantY { luma } => write!(f, "{name}:[{luma}]"),
            Filter::InvRgbaComp { channel } => write!(f, "{name}:[{channel:?}]"),
            Filter::InvYccComp { channel } => write!(f, "{name}:[{channel:?}]"),
            Filter::BitRasp(r) => write!(
                f,
                "{name}:{{m:{:?},op:{:?},mask:{},a:{},r:{}}}",
                r.mode, r.op, r.mask, r.alpha, r.rotation
            ),
            Filter::Source | Filter::Inv | Filter::InvAlpha | Filter::Grayscale => {
                f.write_str(name)
            }
        }
    }
}

fn set_channel(mut px: Rgba16, channel: RgbaChannel, value: u8) -> Rgba16 {
    px[channel.index()] = widen8(value);
    px
}

fn copy_channel(mut px: Rgba16, dest: RgbaChannel, src: RgbaChannel) -> Rgba16 {
    px[dest.index()] = px[src.index()];
    px
}

fn invert_channel(mut px: Rgba16, channel: RgbaChannel) -> Rgba16 {
    px[channel.index()] = 0xffff - px[channel.index()];
    px
}

// Round to the nearest multiple of `2^bits`, saturating at `max`.
fn round_to_pow2(v: u32, bits: u32, max: u32) -> u32 {
    let m = 1u32 << bits;
    ((v + (m >> 1)) & !(m - 1)).min(max)
}

fn quant_rgba(px: Rgba16, shifts: [u8; 4]) -> Rgba16 {
    let mut out = px;
    for (c, shift) in out.iter_mut().zip(shifts) {
        *c = round_to_pow2(u32::from(*c), u32::from(shift.min(7)) + 8, CHANNEL_MAX) as u16;
    }
    out
}

fn quant_ycca(px: Rgba16, shifts: [u8; 4]) -> Rgba16 {
    let ycc = ycbcr_of(px);
    let q = |v: u8, shift: u8| round_to_pow2(u32::from(v), u32::from(shift.min(7)), 0xff) as u8;
    let rounded = [
        q(ycc[0], shifts[0]),
        q(ycc[1], shifts[1]),
        q(ycc[2], shifts[2]),
    ];
    let alpha = q((px[3] >> 8) as u8, shifts[3]);
    from_ycbcr(rounded, widen8(alpha))
}

#[cfg(test)]
#[path = "../../tests/unit/filters/filter.rs"]
mod tests;
