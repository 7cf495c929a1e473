use crate::foundation::error::GlitchResult;
use crate::pixels::buffer::PixelBuffer;

/// Role of a buffer in the four-slot rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    Output,
    Snapshot,
    ScratchA,
    ScratchB,
}

impl Slot {
    fn index(self) -> usize {
        self as usize
    }
}

/// Four same-sized buffers with named role bindings.
///
/// `Output` accumulates the result, `Snapshot` freezes it at the start of each iteration, and the
/// two scratch slots ping-pong between inner chain stages. Borrows are split per stage so one slot
/// is read while another is written.
pub(crate) struct BufferRing {
    slots: [PixelBuffer; 4],
    scratch_read: Slot,
    scratch_write: Slot,
}

impl BufferRing {
    /// Output starts as a copy of `input`; the other slots start fully transparent.
    pub(crate) fn new(input: &PixelBuffer) -> Self {
        let blank = || {
            let mut b = input.clone();
            b.fill_rows(0, b.height(), [0; 4]);
            b
        };
        Self {
            slots: [input.clone(), blank(), blank(), blank()],
            scratch_read: Slot::ScratchA,
            scratch_write: Slot::ScratchB,
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, slot: Slot) -> &PixelBuffer {
        &self.slots[slot.index()]
    }

    pub(crate) fn into_output(self) -> PixelBuffer {
        let [output, ..] = self.slots;
        output
    }

    /// Slot read by chain stage `stage`.
    pub(crate) fn read_slot(&self, stage: usize) -> Slot {
        if stage == 0 {
            Slot::Snapshot
        } else {
            self.scratch_read
        }
    }

    /// Slot written by chain stage `stage` of a `len`-stage chain.
    pub(crate) fn write_slot(&self, stage: usize, len: usize) -> Slot {
        if stage + 1 == len {
            Slot::Output
        } else {
            self.scratch_write
        }
    }

    /// Swap the scratch bindings after a stage.
    pub(crate) fn rotate(&mut self) {
        std::mem::swap(&mut self.scratch_read, &mut self.scratch_write);
    }

    /// Borrow `read` shared and `write` exclusively. The slots must differ.
    pub(crate) fn pair(&mut self, read: Slot, write: Slot) -> (&PixelBuffer, &mut PixelBuffer) {
        let (r, w) = (read.index(), write.index());
        assert_ne!(r, w, "buffer ring slot borrowed twice");
        if r < w {
            let (lo, hi) = self.slots.split_at_mut(w);
            (&lo[r], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(r);
            (&hi[0], &mut lo[w])
        }
    }

    /// Freeze the current output into the snapshot slot.
    pub(crate) fn snapshot(&mut self) -> GlitchResult<()> {
        let (output, snapshot) = self.pair(Slot::Output, Slot::Snapshot);
        snapshot.copy_from(output)
    }

    /// Reset both scratch slots to transparent over rows `y0..y1`.
    pub(crate) fn clear_scratch(&mut self, y0: u32, y1: u32) {
        for slot in [Slot::ScratchA, Slot::ScratchB] {
            self.slots[slot.index()].fill_rows(y0, y1, [0; 4]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/ring.rs"]
mod tests;
