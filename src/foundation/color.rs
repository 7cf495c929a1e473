/// Straight-alpha RGBA sample with 16 bits per channel.
pub type Rgba16 = [u16; 4];

/// Full-scale value of a 16-bit channel.
pub const CHANNEL_MAX: u32 = 0xffff;

/// Widen an 8-bit channel by replicating the byte (`v << 8 | v`).
pub fn widen8(v: u8) -> u16 {
    (u16::from(v) << 8) | u16::from(v)
}

/// Truncate a 16-bit channel to its high byte.
pub fn narrow16(v: u16) -> u8 {
    (v >> 8) as u8
}

pub(crate) fn rgb8_of(px: Rgba16) -> [u8; 3] {
    [narrow16(px[0]), narrow16(px[1]), narrow16(px[2])]
}

/// JFIF RGB -> YCbCr on 8-bit channels.
pub fn rgb_to_ycbcr(rgb: [u8; 3]) -> [u8; 3] {
    let r = i32::from(rgb[0]);
    let g = i32::from(rgb[1]);
    let b = i32::from(rgb[2]);

    let y = (19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 16;
    let cb = -11056 * r - 21712 * g + 32768 * b + (257 << 15);
    let cr = 32768 * r - 27440 * g - 5328 * b + (257 << 15);

    [y as u8, clamp_fix16(cb), clamp_fix16(cr)]
}

/// JFIF YCbCr -> RGB on 8-bit channels.
pub fn ycbcr_to_rgb(ycc: [u8; 3]) -> [u8; 3] {
    let yy = i32::from(ycc[0]) * 0x10101;
    let cb = i32::from(ycc[1]) - 128;
    let cr = i32::from(ycc[2]) - 128;

    let r = yy + 91881 * cr;
    let g = yy - 22554 * cb - 46802 * cr;
    let b = yy + 116130 * cb;

    [clamp_fix16(r), clamp_fix16(g), clamp_fix16(b)]
}

/// YCbCr of a sample's RGB (high bytes).
pub(crate) fn ycbcr_of(px: Rgba16) -> [u8; 3] {
    rgb_to_ycbcr(rgb8_of(px))
}

/// Convert YCbCr back to a sample, widening RGB and keeping `alpha`.
pub(crate) fn from_ycbcr(ycc: [u8; 3], alpha: u16) -> Rgba16 {
    let [r, g, b] = ycbcr_to_rgb(ycc);
    [widen8(r), widen8(g), widen8(b), alpha]
}

/// `x * y / 0xffff` in 32-bit fixed point.
pub(crate) fn mul_div_ffff(x: u32, y: u32) -> u32 {
    (x * y) / CHANNEL_MAX
}

// 16.16 fixed point down to a byte, saturating on both ends.
fn clamp_fix16(v: i32) -> u8 {
    (v >> 16).clamp(0, 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
