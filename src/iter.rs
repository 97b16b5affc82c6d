//! Walking the lot from either end.
//!
//! ```text
//!  forward                  backward
//!     |                        |
//!     v                        v
//!    car <-> car <-> car <-> car
//! ```
//!
//! One step of iteration, in whichever direction was asked for:
//!
//! 1. If every car has already been yielded, `None`
//! 2. Look up the car under the running key for that direction
//! 3. Move that key one link further along
//! 4. Return the car
//!
//! Counting the cars still to be yielded keeps the two running keys from crossing when `next` and
//! `next_back` are mixed.

use std::iter::FusedIterator;

use slotmap::SlotMap;

use crate::{CarRecord, Node, NodeKey};

#[derive(Clone)]
pub struct Iter<'a> {
    nodes: &'a SlotMap<NodeKey, Node>,
    forward: NodeKey,
    backward: NodeKey,
    remaining: usize,
}

enum Direction {
    Forward,
    Backward,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(nodes: &'a SlotMap<NodeKey, Node>, head: NodeKey, tail: NodeKey) -> Self {
        Self {
            nodes,
            forward: head,
            backward: tail,
            remaining: nodes.len(),
        }
    }

    fn next_in_dir(&mut self, direction: Direction) -> Option<&'a CarRecord> {
        if self.remaining == 0 {
            return None;
        }

        let node = match direction {
            Direction::Forward => {
                let node = self.nodes.get(self.forward)?;
                self.forward = node.next;
                node
            }
            Direction::Backward => {
                let node = self.nodes.get(self.backward)?;
                self.backward = node.prev;
                node
            }
        };

        self.remaining -= 1;
        Some(&node.record)
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CarRecord;

    fn next(&mut self) -> Option<&'a CarRecord> {
        self.next_in_dir(Direction::Forward)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<&'a CarRecord> {
        self.next_in_dir(Direction::Backward)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
