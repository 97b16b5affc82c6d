//! A parking lot kept as a doubly linked list of [`CarRecord`]s.
//!
//! The lot has a fixed capacity chosen when it is opened. Cars are parked at the end of the list
//! and may leave from anywhere in it. Listing works from either end:
//!
//! ```text
//!  head                                 tail
//!    |                                    |
//!    v                                    v
//!   car <-> car <-> car <-> car <-> car <-> car
//! ```
//!
//! Instead of pointers, the links are keys into a [`SlotMap`] which owns every node. A removed
//! node's key is invalidated by the map, so a stale link can never reach it again.


pub mod error;
pub mod iter;
pub mod menu;

use std::{fmt, iter::Rev};

use log::{debug, warn};
use slotmap::{new_key_type, Key, SlotMap};

pub use error::{Full, NotFound};

new_key_type! {
    pub(crate) struct NodeKey;
}

/// A parked car: its number plate and the name of its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarRecord {
    car_number: String,
    owner_name: String,
}

impl CarRecord {
    pub fn new(car_number: impl Into<String>, owner_name: impl Into<String>) -> Self {
        Self {
            car_number: car_number.into(),
            owner_name: owner_name.into(),
        }
    }

    pub fn car_number(&self) -> &str {
        &self.car_number
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }
}

impl fmt::Display for CarRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Car No: {} | Owner: {}", self.car_number, self.owner_name)
    }
}

pub(crate) struct Node {
    pub(crate) record: CarRecord,
    pub(crate) prev: NodeKey,
    pub(crate) next: NodeKey,
}

/// Bounded, ordered registry of parked cars.
///
/// Car numbers are not checked for uniqueness when parking. Every lookup by number
/// ([`remove`], [`find`]) acts on the first match, scanning from the front.
///
/// [`remove`]: CarRegistry::remove
/// [`find`]: CarRegistry::find
pub struct CarRegistry {
    nodes: SlotMap<NodeKey, Node>,
    head: NodeKey,
    tail: NodeKey,
    capacity: usize,
}

impl CarRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: NodeKey::null(),
            tail: NodeKey::null(),
            capacity,
        }
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.size() >= self.capacity
    }

    /// Parks a car at the end of the lot.
    ///
    /// # Errors
    ///
    /// Returns [`Full`] if the lot already holds `capacity` cars. Nothing is changed then.
    pub fn park(
        &mut self,
        car_number: impl Into<String>,
        owner_name: impl Into<String>,
    ) -> Result<(), Full> {
        let record = CarRecord::new(car_number, owner_name);

        if self.is_full() {
            warn!(
                "lot is full ({}/{}), cannot park {}",
                self.size(),
                self.capacity,
                record.car_number
            );
            return Err(Full::new(record.car_number));
        }

        debug!("parking {} owned by {}", record.car_number, record.owner_name);
        self.push_back(record);
        Ok(())
    }

    /// Takes the first car with the given number out of the lot, wherever it is parked.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no parked car has that number. Nothing is changed then.
    pub fn remove(&mut self, car_number: &str) -> Result<(), NotFound> {
        let Some(record) = self.position(car_number).and_then(|key| self.unlink(key)) else {
            warn!("car {car_number} is not parked here");
            return Err(NotFound::new(car_number));
        };

        debug!("removed {} owned by {}", record.car_number, record.owner_name);
        Ok(())
    }

    /// All parked cars, from the first parked to the last parked.
    pub fn list_forward(&self) -> iter::Iter<'_> {
        self.iter()
    }

    /// All parked cars, from the last parked to the first parked.
    pub fn list_backward(&self) -> Rev<iter::Iter<'_>> {
        self.iter().rev()
    }

    pub fn iter(&self) -> iter::Iter<'_> {
        iter::Iter::new(&self.nodes, self.head, self.tail)
    }

    pub fn first(&self) -> Option<&CarRecord> {
        self.nodes.get(self.head).map(|node| &node.record)
    }

    pub fn last(&self) -> Option<&CarRecord> {
        self.nodes.get(self.tail).map(|node| &node.record)
    }

    pub fn find(&self, car_number: &str) -> Option<&CarRecord> {
        self.position(car_number)
            .and_then(|key| self.nodes.get(key))
            .map(|node| &node.record)
    }

    fn position(&self, car_number: &str) -> Option<NodeKey> {
        let mut key = self.head;
        while let Some(node) = self.nodes.get(key) {
            if node.record.car_number == car_number {
                return Some(key);
            }
            key = node.next;
        }
        None
    }

    fn push_back(&mut self, record: CarRecord) {
        let key = self.nodes.insert(Node {
            record,
            prev: self.tail,
            next: NodeKey::null(),
        });

        match self.nodes.get_mut(self.tail) {
            Some(old_tail) => old_tail.next = key,
            None => self.head = key,
        }
        self.tail = key;
    }

    /// Detaches the node at `key` and stitches its neighbours together. A missing neighbour means
    /// the node was the head or the tail, which then moves inwards.
    fn unlink(&mut self, key: NodeKey) -> Option<CarRecord> {
        let node = self.nodes.remove(key)?;

        match self.nodes.get_mut(node.prev) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match self.nodes.get_mut(node.next) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }

        Some(node.record)
    }
}

impl fmt::Debug for CarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a CarRegistry {
    type Item = &'a CarRecord;
    type IntoIter = iter::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
