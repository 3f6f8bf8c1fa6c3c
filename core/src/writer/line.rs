use crate::gfx::{Command, DisplayList, ListCursor, Slot, Vtx};

/// Vertices per line batch
pub const LINE_BATCH: usize = 32;

/// Groups wireframe segments into shared vertex loads
///
/// Each [`LineWriter::add`] call connects every pair of its points, so a
/// triangle's three edges come from one three-point request.
pub struct LineWriter<'a> {
    list: &'a mut DisplayList,
    vtx: [Vtx; LINE_BATCH],
    vtx_slot: Option<Slot>,
    count: usize,
}

impl<'a> LineWriter<'a> {
    pub fn new(list: &'a mut DisplayList) -> Self {
        Self {
            list,
            vtx: [Vtx::default(); LINE_BATCH],
            vtx_slot: None,
            count: 0,
        }
    }

    pub fn pending(&self) -> usize {
        self.count
    }

    /// Draw a line between every pair of `v`
    ///
    /// Fewer than two points draws nothing.
    pub fn add(&mut self, v: &[Vtx]) {
        let n = v.len();
        if n <= 1 {
            return;
        }
        debug_assert!(n <= LINE_BATCH, "line request of {n} points exceeds batch");

        if self.count + n > LINE_BATCH {
            self.flush();
        }
        if self.vtx_slot.is_none() {
            self.vtx_slot = Some(self.list.reserve_slot());
        }

        let base = self.count;
        self.vtx[base..base + n].copy_from_slice(v);
        for i in 0..n {
            for j in i + 1..n {
                self.list
                    .push(Command::Line3d((base + i) as u8, (base + j) as u8));
            }
        }
        self.count += n;
    }

    pub fn flush(&mut self) {
        if let Some(slot) = self.vtx_slot.take() {
            let data = self.list.alloc_data(&self.vtx[..self.count]);
            self.list.commit(
                slot,
                Command::Vertex {
                    data,
                    count: self.count as u8,
                    v0: 0,
                },
            );
        }
        self.count = 0;
    }

    pub fn finish(mut self) -> ListCursor {
        self.flush();
        self.list.cursor()
    }
}
