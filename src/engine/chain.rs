use std::fmt;

use rand::Rng;
use smallvec::SmallVec;

use crate::blend::ops::BlendOp;
use crate::filters::filter::Filter;
use crate::filters::kind::FilterKind;

/// One chain position: a drawn filter and the blend rule merging its output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    pub filter: Filter,
    pub op: BlendOp,
}

/// Ordered filter stages of one iteration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chain {
    stages: SmallVec<[Stage; 4]>,
}

impl Chain {
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{{{},{}}}", stage.filter, stage.op)?;
        }
        f.write_str("]")
    }
}

/// Draw a chain of `min..=max` stages.
///
/// Filter kinds are drawn uniformly from `filters` (duplicates weight the draw) and parameterized
/// immediately. Every stage but the last replaces; the last draws its rule from `ops`. Both lists
/// must be non-empty and `1 <= min <= max`.
pub fn build_chain<R: Rng + ?Sized>(
    rng: &mut R,
    min: u32,
    max: u32,
    filters: &[FilterKind],
    ops: &[BlendOp],
) -> Chain {
    let len = rng.random_range(min..=max) as usize;

    let mut drawn: SmallVec<[Filter; 4]> = SmallVec::with_capacity(len);
    for _ in 0..len {
        let kind = filters[rng.random_range(0..filters.len())];
        drawn.push(kind.randomize(rng));
    }

    let last_op = ops[rng.random_range(0..ops.len())];
    let stages = drawn
        .into_iter()
        .enumerate()
        .map(|(i, filter)| Stage {
            filter,
            op: if i + 1 == len { last_op } else { BlendOp::Replace },
        })
        .collect();
    Chain { stages }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/chain.rs"]
mod tests;
