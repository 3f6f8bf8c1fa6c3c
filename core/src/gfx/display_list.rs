//! Fixed-capacity display list
//!
//! A list holds commands plus an auxiliary data region. Both draw from one
//! capacity budget counted in 8-byte words: a command costs one word, a data
//! blob costs `ceil(bytes / 8)` words. Callers size lists from their shape
//! counts up front; running out of room is a sizing bug and panics.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use bytemuck::Pod;

use super::command::{Command, DataRef};
use super::matrix::Mtx;
use super::vertex::Vtx;

const WORD: usize = 8;

/// Handle to a reserved command position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot(usize);

/// Command and data usage of a list, in words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListCursor {
    pub commands: usize,
    pub data_words: usize,
}

impl ListCursor {
    pub fn words(&self) -> usize {
        self.commands + self.data_words
    }
}

pub struct DisplayList {
    /// Name for overflow messages and logs
    name: &'static str,
    /// Total budget in words
    capacity: usize,
    commands: Vec<Command>,
    data: Vec<u64>,
}

impl DisplayList {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity,
            commands: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Words used by commands and data together
    pub fn used(&self) -> usize {
        self.commands.len() + self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.used()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn cursor(&self) -> ListCursor {
        ListCursor {
            commands: self.commands.len(),
            data_words: self.data.len(),
        }
    }

    /// Drop all contents, keeping the allocation and capacity
    pub fn clear(&mut self) {
        self.commands.clear();
        self.data.clear();
    }

    fn ensure(&self, words: usize) {
        if self.used() + words > self.capacity {
            panic!(
                "{} display list overflow! capacity {} words, {} used, {} requested",
                self.name,
                self.capacity,
                self.used(),
                words
            );
        }
    }

    pub fn push(&mut self, command: Command) {
        self.ensure(1);
        self.commands.push(command);
    }

    /// Append a no-op to be filled in later with [`DisplayList::commit`]
    pub fn reserve_slot(&mut self) -> Slot {
        self.push(Command::NoOp);
        Slot(self.commands.len() - 1)
    }

    /// Write `command` into a reserved slot, replacing what is there
    pub fn commit(&mut self, slot: Slot, command: Command) {
        self.commands[slot.0] = command;
    }

    /// Copy `items` into the data region
    pub fn alloc_data<T: Pod>(&mut self, items: &[T]) -> DataRef {
        let bytes: &[u8] = bytemuck::cast_slice(items);
        let words = bytes.len().div_ceil(WORD);
        self.ensure(words);

        let offset = self.data.len();
        self.data.resize(offset + words, 0);
        let dst: &mut [u8] = bytemuck::cast_slice_mut(&mut self.data[offset..]);
        dst[..bytes.len()].copy_from_slice(bytes);

        DataRef {
            offset: offset as u32,
            len: bytes.len() as u32,
        }
    }

    /// Read back a blob written by [`DisplayList::alloc_data`]
    pub fn data<T: Pod>(&self, data: DataRef) -> &[T] {
        let start = data.offset as usize;
        let words = (data.len as usize).div_ceil(WORD);
        let bytes: &[u8] = bytemuck::cast_slice(&self.data[start..start + words]);
        bytemuck::cast_slice(&bytes[..data.len as usize])
    }

    pub fn vertices(&self, data: DataRef) -> &[Vtx] {
        self.data(data)
    }

    pub fn matrix(&self, data: DataRef) -> Mtx {
        self.data::<Mtx>(data)[0]
    }

    /// Terminate the list
    pub fn end(&mut self) {
        self.push(Command::EndDisplayList);
    }
}

impl fmt::Debug for DisplayList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayList")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("commands", &self.commands.len())
            .field("data_words", &self.data.len())
            .finish()
    }
}

/// Shared handle to a finished list
///
/// Equality is identity: two refs are equal when they point at the same list.
#[derive(Clone)]
pub struct ListRef(Arc<DisplayList>);

impl ListRef {
    pub fn new(list: DisplayList) -> Self {
        Self(Arc::new(list))
    }

    /// Take the list back if no other handle exists
    pub fn try_unwrap(self) -> Result<DisplayList, ListRef> {
        Arc::try_unwrap(self.0).map_err(ListRef)
    }

    /// Number of live handles, including this one
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl Deref for ListRef {
    type Target = DisplayList;

    fn deref(&self) -> &DisplayList {
        &self.0
    }
}

impl PartialEq for ListRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ListRef {}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListRef({}, {} cmds)", self.0.name, self.0.commands.len())
    }
}
