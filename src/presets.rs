use std::fmt;
use std::str::FromStr;

use crate::engine::options::GlitchOptions;
use crate::foundation::error::GlitchError;

/// Named pairs of filter and operation allow-lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Drops the per-channel inversions along with the modular and xor operations.
    Tame,
    /// Filters and operations that keep hue mostly intact.
    NoColorShift,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::NoColorShift, Preset::Tame];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Tame => "tame",
            Preset::NoColorShift => "nocolorshift",
        }
    }

    pub fn filters(self) -> &'static [&'static str] {
        match self {
            Preset::Tame => &[
                "color", "gray", "src", "rgba", "seta", "ycc", "prgb", "prgba", "pycc", "copy",
                "ctoa", "mix", "quant", "qrgba", "qycca", "qy", "inv", "gs", "rasp",
            ],
            Preset::NoColorShift => &[
                "gray", "src", "seta", "ctoa", "quant", "qy", "inv", "inva", "gs", "rasp",
            ],
        }
    }

    pub fn ops(self) -> &'static [&'static str] {
        match self {
            Preset::Tame => &["cmp", "src", "add", "mulrgb", "mulycc"],
            Preset::NoColorShift => &[
                "cmp", "src", "add", "mulrgb", "mulycc", "xorrgb", "xorycc",
            ],
        }
    }

    /// Replace both allow-lists of `opts`.
    pub fn apply_to(self, opts: &mut GlitchOptions) {
        let owned = |names: &[&str]| -> Vec<String> {
            names.iter().map(|s| (*s).to_string()).collect()
        };
        opts.filters = Some(owned(self.filters()));
        opts.ops = Some(owned(self.ops()));
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = GlitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| GlitchError::configuration(format!("unknown preset: {s}")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/presets.rs"]
mod tests;
