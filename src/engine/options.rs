use crate::blend::ops::BlendOp;
use crate::filters::kind::FilterKind;
use crate::foundation::error::{GlitchError, GlitchResult};

/// Knobs of one glitch run.
///
/// Deserializes from partial JSON; missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlitchOptions {
    pub min_iterations: u32,
    pub max_iterations: u32,
    /// Block edge in pixels.
    pub block_size: u32,
    /// Segment size as a fraction of the block count.
    pub min_segment_size: f64,
    pub max_segment_size: f64,
    /// Chain length bounds.
    pub min_filters: u32,
    pub max_filters: u32,
    /// Filter allow-list by name. `None` draws from the whole registry.
    pub filters: Option<Vec<String>>,
    /// Operation allow-list by name. `None` draws from the whole registry.
    pub ops: Option<Vec<String>>,
    /// Worker count, 0 = available parallelism.
    pub threads: usize,
}

impl Default for GlitchOptions {
    fn default() -> Self {
        Self {
            min_iterations: 10,
            max_iterations: 10,
            block_size: 16,
            min_segment_size: 0.01,
            max_segment_size: 0.2,
            min_filters: 1,
            max_filters: 1,
            filters: None,
            ops: None,
            threads: 0,
        }
    }
}

impl GlitchOptions {
    /// Check every bound and name. Nothing here depends on the image.
    pub fn validate(&self) -> GlitchResult<()> {
        if self.block_size == 0 {
            return Err(GlitchError::configuration("block_size must be > 0"));
        }
        let (lo, hi) = (self.min_segment_size, self.max_segment_size);
        if !lo.is_finite() || !hi.is_finite() {
            return Err(GlitchError::configuration("segment sizes must be finite"));
        }
        if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) {
            return Err(GlitchError::configuration(format!(
                "segment sizes must lie in [0, 1], got {lo}..{hi}"
            )));
        }
        if hi < lo {
            return Err(GlitchError::configuration(format!(
                "max_segment_size {hi} is below min_segment_size {lo}"
            )));
        }
        if self.min_filters == 0 {
            return Err(GlitchError::configuration("min_filters must be >= 1"));
        }
        if self.max_filters < self.min_filters {
            return Err(GlitchError::configuration(format!(
                "max_filters {} is below min_filters {}",
                self.max_filters, self.min_filters
            )));
        }
        if self.max_iterations < self.min_iterations {
            return Err(GlitchError::configuration(format!(
                "max_iterations {} is below min_iterations {}",
                self.max_iterations, self.min_iterations
            )));
        }
        self.filter_kinds()?;
        self.blend_ops()?;
        Ok(())
    }

    /// Resolved filter allow-list; duplicates are kept so they weight the draw.
    pub fn filter_kinds(&self) -> GlitchResult<Vec<FilterKind>> {
        resolve(self.filters.as_deref(), "filters", &FilterKind::ALL)
    }

    /// Resolved operation allow-list; duplicates are kept so they weight the draw.
    pub fn blend_ops(&self) -> GlitchResult<Vec<BlendOp>> {
        resolve(self.ops.as_deref(), "ops", &BlendOp::ALL)
    }
}

fn resolve<T>(names: Option<&[String]>, what: &str, all: &[T]) -> GlitchResult<Vec<T>>
where
    T: Copy + std::str::FromStr<Err = GlitchError>,
{
    match names {
        None => Ok(all.to_vec()),
        Some([]) => Err(GlitchError::configuration(format!(
            "{what} allow-list is empty"
        ))),
        Some(names) => names.iter().map(|n| n.trim().parse()).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/options.rs"]
mod tests;
