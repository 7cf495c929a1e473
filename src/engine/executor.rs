use rayon::prelude::*;

use crate::engine::chain::Stage;
use crate::engine::grid::{BlockGrid, Segment};
use crate::foundation::error::GlitchResult;
use crate::pixels::buffer::PixelBuffer;

/// One destination block with exclusive access to its `block_size` row spans.
struct BlockJob<'a> {
    dst: (u32, u32),
    src: (u32, u32),
    rows: Vec<&'a mut [u16]>,
}

/// Dedicated worker pool executing chain stages.
pub(crate) struct Workers {
    pool: rayon::ThreadPool,
    count: usize,
}

impl Workers {
    /// `threads == 0` resolves to the available parallelism.
    pub(crate) fn new(threads: usize) -> GlitchResult<Self> {
        let count = if threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            threads
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(count)
            .thread_name(|i| format!("gltihc-worker-{i}"))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}"))?;
        Ok(Self { pool, count })
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Run one chain stage over every block of `seg`.
    ///
    /// Blocks are split into contiguous chunks of `ceil(count / workers)`, one rayon task per
    /// chunk. Returns once every chunk has finished.
    pub(crate) fn run_stage(
        &self,
        grid: BlockGrid,
        seg: Segment,
        stage_index: usize,
        stage: Stage,
        src: &PixelBuffer,
        dst: &mut PixelBuffer,
    ) {
        let bs = grid.block_size;
        let mut jobs = block_jobs(grid, seg, stage_index, dst);
        let chunk_len = seg.count.div_ceil(self.count as u64).max(1) as usize;

        self.pool.install(|| {
            jobs.par_chunks_mut(chunk_len)
                .enumerate()
                .for_each(|(chunk, blocks)| {
                    let first = seg.start + (chunk * chunk_len) as u64;
                    tracing::trace!(
                        block_start = first,
                        block_end = first + blocks.len() as u64,
                        filter = %stage.filter,
                        "chunk"
                    );
                    for job in blocks {
                        for (dy, row) in (0u32..).zip(job.rows.iter_mut()) {
                            let src_span = src.span(job.src.0, job.src.1 + dy, bs);
                            stage
                                .filter
                                .apply_span(stage.op, row, src_span, job.dst.0, job.dst.1 + dy);
                        }
                    }
                });
        });
    }
}

// Cut `dst` into disjoint per-block row spans, in segment order.
fn block_jobs<'a>(
    grid: BlockGrid,
    seg: Segment,
    stage_index: usize,
    dst: &'a mut PixelBuffer,
) -> Vec<BlockJob<'a>> {
    let bs = grid.block_size;
    let bx = u64::from(grid.blocks_x);
    let span_lanes = (bs as usize) * 4;

    let mut jobs: Vec<BlockJob<'a>> = (seg.start..seg.end())
        .map(|b| BlockJob {
            dst: grid.block_origin(b),
            src: grid.block_origin(seg.source_block(grid, b, stage_index)),
            rows: Vec::with_capacity(bs as usize),
        })
        .collect();

    let (y0, y1) = grid.row_stripe(seg);
    for (y, row) in dst
        .rows_mut()
        .enumerate()
        .skip(y0 as usize)
        .take((y1 - y0) as usize)
    {
        let block_row = (y as u64) / u64::from(bs);
        let lo = seg.start.max(block_row * bx);
        let hi = seg.end().min((block_row + 1) * bx);

        let mut rest: &'a mut [u16] = row;
        let mut consumed = 0usize;
        for b in lo..hi {
            let x0 = ((b % bx) as usize) * span_lanes;
            let tail = std::mem::take(&mut rest);
            let (_, tail) = tail.split_at_mut(x0 - consumed);
            let (span, tail) = tail.split_at_mut(span_lanes);
            rest = tail;
            consumed = x0 + span_lanes;
            jobs[(b - seg.start) as usize].rows.push(span);
        }
    }
    jobs
}

#[cfg(test)]
#[path = "../../tests/unit/engine/executor.rs"]
mod tests;
