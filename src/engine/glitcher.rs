use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::blend::ops::BlendOp;
use crate::engine::chain::build_chain;
use crate::engine::executor::Workers;
use crate::engine::grid::{BlockGrid, select_segment};
use crate::engine::options::GlitchOptions;
use crate::engine::ring::BufferRing;
use crate::filters::kind::FilterKind;
use crate::foundation::error::{GlitchError, GlitchResult};
use crate::pixels::buffer::{OutputFormat, PixelBuffer};

/// Shared flag that aborts a run before its next iteration.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters from one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlitchStats {
    /// Iterations drawn for the run.
    pub iterations: u32,
    /// Iterations whose segment rounded down to zero blocks.
    pub skipped_iterations: u32,
    /// Chain stages executed over all iterations.
    pub stages: u64,
    /// Block writes over all stages.
    pub blocks_written: u64,
}

/// Validated engine bound to a worker pool. Reusable across images and runs.
pub struct Glitcher {
    opts: GlitchOptions,
    filters: Vec<FilterKind>,
    ops: Vec<BlendOp>,
    workers: Workers,
    cancel: Option<CancelFlag>,
}

impl Glitcher {
    pub fn new(opts: &GlitchOptions) -> GlitchResult<Self> {
        opts.validate()?;
        let workers = Workers::new(opts.threads)?;
        tracing::trace!(workers = workers.count(), "glitcher ready");
        Ok(Self {
            filters: opts.filter_kinds()?,
            ops: opts.blend_ops()?,
            opts: opts.clone(),
            workers,
            cancel: None,
        })
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn options(&self) -> &GlitchOptions {
        &self.opts
    }

    pub fn apply<R: Rng + ?Sized>(
        &self,
        input: &PixelBuffer,
        rng: &mut R,
    ) -> GlitchResult<PixelBuffer> {
        self.apply_with_stats(input, rng).map(|(out, _)| out)
    }

    /// Glitch `input` and report what the run did.
    ///
    /// All randomness for an iteration is drawn before its stages fan out, so the output depends
    /// only on `rng`, never on the worker count. On error no partial image is returned.
    #[tracing::instrument(
        skip_all,
        fields(width = input.width(), height = input.height(), workers = self.workers.count())
    )]
    pub fn apply_with_stats<R: Rng + ?Sized>(
        &self,
        input: &PixelBuffer,
        rng: &mut R,
    ) -> GlitchResult<(PixelBuffer, GlitchStats)> {
        let opts = &self.opts;
        let iterations = rng.random_range(opts.min_iterations..=opts.max_iterations);
        let mut stats = GlitchStats {
            iterations,
            ..GlitchStats::default()
        };
        if iterations == 0 {
            return Ok((input.clone(), stats));
        }

        let grid = BlockGrid::new(input.width(), input.height(), opts.block_size)?;
        grid.check_min_segment(opts.min_segment_size)?;

        let mut ring = BufferRing::new(input);
        for itn in 0..iterations {
            if let Some(cancel) = &self.cancel
                && cancel.is_cancelled()
            {
                return Err(GlitchError::Cancelled);
            }

            ring.snapshot()?;
            let Some(seg) =
                select_segment(rng, grid, opts.min_segment_size, opts.max_segment_size)?
            else {
                tracing::debug!(iteration = itn, "empty segment, skipped");
                stats.skipped_iterations += 1;
                continue;
            };
            let chain = build_chain(
                rng,
                opts.min_filters,
                opts.max_filters,
                &self.filters,
                &self.ops,
            );
            tracing::debug!(
                iteration = itn,
                segment = %seg,
                shift = seg.shift,
                chain = %chain,
                "iteration"
            );

            let (y0, y1) = grid.row_stripe(seg);
            ring.clear_scratch(y0, y1);
            for (i, stage) in chain.stages().iter().enumerate() {
                let read = ring.read_slot(i);
                let write = ring.write_slot(i, chain.len());
                let (src, dst) = ring.pair(read, write);
                self.workers.run_stage(grid, seg, i, *stage, src, dst);
                ring.rotate();
            }
            stats.stages += chain.len() as u64;
            stats.blocks_written += seg.count * chain.len() as u64;
        }
        Ok((ring.into_output(), stats))
    }
}

/// Decode-side convenience: glitch any `image` raster and convert to `format`.
pub fn glitch_image<R: Rng + ?Sized>(
    img: &image::DynamicImage,
    opts: &GlitchOptions,
    format: OutputFormat,
    rng: &mut R,
) -> GlitchResult<image::DynamicImage> {
    let glitcher = Glitcher::new(opts)?;
    let out = glitcher.apply(&PixelBuffer::from_image(img), rng)?;
    Ok(out.to_image(format))
}

/// Deterministic generator for `Some(seed)`, OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/glitcher.rs"]
mod tests;
