use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::gapless_assert_simple;

/// A stack of assigned elements partitioned into decision levels.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_decision_level: usize,
    /// At index i is the position where the i-th decision level ends (exclusive) on the trail
    trail_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// Implemented by hand so that `T` is not required to implement `Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_decision_level: 0,
            trail_delimiter: Vec::new(),
            trail: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn increase_decision_level(&mut self) {
        self.current_decision_level += 1;
        self.trail_delimiter.push(self.trail.len());
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.current_decision_level
    }

    /// Removes every element above `new_decision_level`, yielding the newest element first.
    pub(crate) fn synchronise(&mut self, new_decision_level: usize) -> Rev<Drain<'_, T>> {
        gapless_assert_simple!(new_decision_level < self.current_decision_level);

        let new_trail_len = self.trail_delimiter[new_decision_level];

        self.current_decision_level = new_decision_level;
        self.trail_delimiter.truncate(new_decision_level);
        self.trail.drain(new_trail_len..).rev()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.trail.push(elem)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.trail
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Deref;

    use super::Trail;

    fn trail_with_levels(levels: &[&[u32]]) -> Trail<u32> {
        let mut trail = Trail::default();
        for (level, values) in levels.iter().enumerate() {
            if level > 0 {
                trail.increase_decision_level();
            }
            for &value in values.iter() {
                trail.push(value);
            }
        }
        trail
    }

    #[test]
    fn backtracking_keeps_the_lower_levels() {
        let mut trail = trail_with_levels(&[&[1], &[2], &[3, 4], &[5]]);

        let _ = trail.synchronise(1);

        assert_eq!(&[1, 2], trail.deref());
        assert_eq!(trail.get_decision_level(), 1);
    }

    #[test]
    fn removed_elements_are_given_newest_first() {
        let mut trail = trail_with_levels(&[&[1], &[2], &[3, 4]]);

        let popped = trail.synchronise(0).collect::<Vec<_>>();

        assert_eq!(vec![4, 3, 2], popped);
        assert_eq!(&[1], trail.deref());
    }
}
