//! A max-heap over keys `[0, ..., n - 1]` whose values can be bumped while the keys are in the
//! heap. Keys can be temporarily removed and later restored with the value they had; this is what
//! the VSIDS variable selector needs when variables are assigned and unassigned during search.
use std::ops::AddAssign;
use std::ops::DivAssign;

use super::KeyedVec;
use super::StorageKey;
use crate::gapless_assert_moderate;

/// A [max-heap](https://en.wikipedia.org/wiki/Binary_heap) which allows for generalised `Key`s
/// (required to implement [StorageKey]) and `Value`s (which are required to be ordered, divisible
/// and addable).
#[derive(Debug, Clone)]
pub struct KeyValueHeap<Key, Value> {
    /// The values stored as a heap; the value of key `i` is at index `map_key_to_position[i]`.
    values: Vec<Value>,
    map_key_to_position: KeyedVec<Key, usize>,
    map_position_to_key: Vec<Key>,
    /// Positions `[0, end_position)` form the heap, the positions after it hold removed keys.
    end_position: usize,
}

impl<Key: StorageKey, Value> Default for KeyValueHeap<Key, Value> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            map_key_to_position: KeyedVec::new(),
            map_position_to_key: Vec::new(),
            end_position: 0,
        }
    }
}

impl<Key, Value> KeyValueHeap<Key, Value>
where
    Key: StorageKey + Copy,
    Value: AddAssign<Value> + DivAssign<Value> + PartialOrd + Copy,
{
    /// Return the key with maximum value from the heap, or None if the heap is empty. Note that
    /// this does not delete the key (see [`KeyValueHeap::pop_max`] to get and delete).
    pub fn peek_max(&self) -> Option<Key> {
        if self.has_no_nonremoved_elements() {
            None
        } else {
            Some(self.map_position_to_key[0])
        }
    }

    pub fn get_value(&self, key: Key) -> Value {
        self.values[self.map_key_to_position[key]]
    }

    /// Deletes the key with maximum value from the heap and returns it, or None if the heap is
    /// empty.
    pub fn pop_max(&mut self) -> Option<Key> {
        let best_key = self.peek_max()?;
        self.delete_key(best_key);
        Some(best_key)
    }

    /// Increments the value of `key` by `increment`; this also applies to removed keys.
    pub fn increment(&mut self, key: Key, increment: Value) {
        let position = self.map_key_to_position[key];
        self.values[position] += increment;

        if self.is_key_present(key) {
            self.sift_up(position);
        }
    }

    /// Restores a removed key with the value it had when it was removed. Does nothing if the key
    /// is present.
    pub fn restore_key(&mut self, key: Key) {
        if self.is_key_present(key) {
            return;
        }

        let position = self.map_key_to_position[key];
        gapless_assert_moderate!(position >= self.end_position);
        self.swap_positions(position, self.end_position);
        self.end_position += 1;
        self.sift_up(self.end_position - 1);
    }

    /// Removes `key` from the heap while remembering its value. Does nothing if the key is not
    /// present.
    pub fn delete_key(&mut self, key: Key) {
        if !self.is_key_present(key) {
            return;
        }

        let position = self.map_key_to_position[key];
        self.swap_positions(position, self.end_position - 1);
        self.end_position -= 1;
        if position < self.end_position {
            self.sift_down(position);
        }
    }

    /// The number of keys, including the removed ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn num_nonremoved_elements(&self) -> usize {
        self.end_position
    }

    pub fn has_no_nonremoved_elements(&self) -> bool {
        self.end_position == 0
    }

    pub fn is_key_present(&self, key: Key) -> bool {
        key.index() < self.map_key_to_position.len()
            && self.map_key_to_position[key] < self.end_position
    }

    /// Adds the next key to the heap; keys have to be added in order of their index.
    pub fn grow(&mut self, key: Key, value: Value) {
        gapless_assert_moderate!(key.index() == self.values.len());

        let last_position = self.values.len();
        self.values.push(value);
        let _ = self.map_key_to_position.push(last_position);
        self.map_position_to_key.push(key);

        self.swap_positions(self.end_position, last_position);
        self.end_position += 1;
        self.sift_up(self.end_position - 1);
    }

    /// Divides all the values in the heap by `divisor`, including the values of removed keys.
    pub fn divide_values(&mut self, divisor: Value) {
        for value in self.values.iter_mut() {
            *value /= divisor;
        }
    }

    fn swap_positions(&mut self, a: usize, b: usize) {
        let key_a = self.map_position_to_key[a];
        let key_b = self.map_position_to_key[b];

        self.values.swap(a, b);
        self.map_position_to_key.swap(a, b);
        self.map_key_to_position.swap(key_a.index(), key_b.index());
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent_position = (position - 1) / 2;
            if self.values[parent_position] >= self.values[position] {
                break;
            }
            self.swap_positions(parent_position, position);
            position = parent_position;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let left_child = 2 * position + 1;
            if left_child >= self.end_position {
                break;
            }

            let right_child = left_child + 1;
            let largest_child = if right_child < self.end_position
                && self.values[right_child] > self.values[left_child]
            {
                right_child
            } else {
                left_child
            };

            if self.values[position] >= self.values[largest_child] {
                break;
            }
            self.swap_positions(position, largest_child);
            position = largest_child;
        }
    }
}
