use crate::gfx::{Command, DisplayList, ListCursor, Rgba, Slot, Vtx};

/// Vertices per polygon batch (ten triangles)
pub const POLY_BATCH: usize = 30;

/// Groups colored triangles into shared vertex loads and two-triangle commands
///
/// Triangles are paired into `Triangle2` commands as they arrive. A color
/// change emits a primitive-color command between them, which splits a
/// half-filled pair back into two `Triangle1` commands around it.
pub struct PolyWriter<'a> {
    list: &'a mut DisplayList,
    vtx: [Vtx; POLY_BATCH],
    /// Vertex-load command for the current batch
    vtx_slot: Option<Slot>,
    /// Most recent triangle command, possibly still awaiting its second half
    tri_slot: Option<Slot>,
    count: usize,
    last_color: Rgba,
}

impl<'a> PolyWriter<'a> {
    pub fn new(list: &'a mut DisplayList) -> Self {
        list.push(Command::SetPrimColor(Rgba::TRANSPARENT));
        Self {
            list,
            vtx: [Vtx::default(); POLY_BATCH],
            vtx_slot: None,
            tri_slot: None,
            count: 0,
            last_color: Rgba::TRANSPARENT,
        }
    }

    /// Vertices waiting in the current batch
    pub fn pending(&self) -> usize {
        self.count
    }

    fn tri(first: usize) -> [u8; 3] {
        let n = first as u8;
        [n, n + 1, n + 2]
    }

    pub fn add(&mut self, v: &[Vtx; 3], color: Rgba) {
        if self.vtx_slot.is_none() {
            self.vtx_slot = Some(self.list.reserve_slot());
        }

        let n = self.count;
        self.vtx[n..n + 3].copy_from_slice(v);

        if self.last_color != color {
            self.list.push(Command::SetPrimColor(color));
            if n % 6 != 0 {
                if let Some(slot) = self.tri_slot {
                    self.list.commit(slot, Command::Triangle1(Self::tri(n - 3)));
                }
                let slot = self.list.reserve_slot();
                self.list.commit(slot, Command::Triangle1(Self::tri(n)));
                self.tri_slot = Some(slot);
            }
            self.last_color = color;
        }

        if n % 6 == 0 {
            let slot = self.list.reserve_slot();
            self.list
                .commit(slot, Command::Triangle2(Self::tri(n), Self::tri(n + 3)));
            self.tri_slot = Some(slot);
        }

        self.count += 3;
        if self.count == POLY_BATCH {
            self.flush();
        }
    }

    /// Upload pending vertices and close the batch
    pub fn flush(&mut self) {
        let n = self.count;
        if let Some(slot) = self.vtx_slot.take() {
            let data = self.list.alloc_data(&self.vtx[..n]);
            self.list.commit(
                slot,
                Command::Vertex {
                    data,
                    count: n as u8,
                    v0: 0,
                },
            );
        }

        // A pair opened for triangles that never arrived
        if n % 6 != 0
            && let Some(slot) = self.tri_slot
        {
            self.list.commit(slot, Command::Triangle1(Self::tri(n - 3)));
        }
        self.tri_slot = None;
        self.count = 0;
    }

    /// Flush and report how much of the list is used
    pub fn finish(mut self) -> ListCursor {
        self.flush();
        self.list.cursor()
    }
}
