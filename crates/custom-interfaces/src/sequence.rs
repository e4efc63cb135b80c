//! Capacity-tracked resizable arrays of records.
//!
//! `Sequence<T>` is the owning counterpart of a ROS `T[]` / `T[<=N]` field. It
//! keeps the logical length and the reserved capacity apart, grows with
//! fallible reservations and never leaves a half-built array behind: when a
//! reservation fails the sequence is exactly what it was before the call.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SequenceError;
use crate::traits::Record;

#[derive(Clone)]
pub struct Sequence<T> {
    data: Vec<T>,
    bound: Option<usize>,
}

impl<T> Sequence<T> {
    /// Empty, unbounded sequence with no storage.
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            bound: None,
        }
    }

    /// Empty sequence that never holds more than `max` elements.
    pub const fn bounded(max: usize) -> Self {
        Self {
            data: Vec::new(),
            bound: Some(max),
        }
    }

    pub fn bound(&self) -> Option<usize> {
        self.bound
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Drop every element and release the storage.
    ///
    /// Afterwards `len() == 0` and `capacity() == 0`. Finalizing twice is a no-op.
    pub fn fini(&mut self) {
        self.data = Vec::new();
    }

    fn check_bound(&self, requested: usize) -> Result<(), SequenceError> {
        match self.bound {
            Some(max) if requested > max => Err(SequenceError::BoundExceeded {
                max,
                actual: requested,
            }),
            _ => Ok(()),
        }
    }

    fn reserve_total(&mut self, total: usize) -> Result<(), SequenceError> {
        let additional = total.saturating_sub(self.data.len());
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| SequenceError::Allocation { requested: total })
    }

    pub fn push(&mut self, value: T) -> Result<(), SequenceError> {
        let total = self.data.len() + 1;
        self.check_bound(total)?;
        self.reserve_total(total)?;
        self.data.push(value);
        Ok(())
    }

    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }
}

impl<T: Record> Sequence<T> {
    /// Sequence of `len` default-initialized elements whose capacity equals `len`.
    pub fn with_len(len: usize) -> Result<Self, SequenceError> {
        let mut seq = Self::new();
        seq.resize(len)?;
        Ok(seq)
    }

    /// Grow with default elements or shrink to `len`.
    ///
    /// On failure the elements that were already present are kept untouched;
    /// only the tail that was being added is rolled back.
    pub fn resize(&mut self, len: usize) -> Result<(), SequenceError> {
        self.check_bound(len)?;
        if len <= self.data.len() {
            self.data.truncate(len);
            return Ok(());
        }
        self.reserve_total(len)?;
        self.data.resize_with(len, T::default);
        Ok(())
    }

    /// Deep copy of `src` into `self`.
    ///
    /// Storage grows only when the current capacity is smaller than `src.len()`.
    /// If the destination cannot hold the source it is left unchanged.
    pub fn copy_from(&mut self, src: &Self) -> Result<(), SequenceError> {
        self.check_bound(src.len())?;
        if self.data.capacity() < src.len() {
            self.reserve_total(src.len())?;
        }
        self.data.clone_from(&src.data);
        Ok(())
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data, bound: None }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data, bound: None }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: Serialize> Serialize for Sequence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.data.len()))?;
        for item in &self.data {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct SequenceVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for SequenceVisitor<T> {
    type Value = Vec<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let hint = access.size_hint().unwrap_or(0).min(4096);
        let mut data = Vec::new();
        data.try_reserve_exact(hint)
            .map_err(|_| de::Error::custom(SequenceError::Allocation { requested: hint }))?;
        while let Some(item) = access.next_element()? {
            data.push(item);
        }
        Ok(data)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sequence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = deserializer.deserialize_seq(SequenceVisitor(PhantomData))?;
        Ok(Self { data, bound: None })
    }
}

/// Deserialize a bounded sequence field, rejecting payloads longer than `MAX`.
pub fn deserialize_bounded<'de, D, T, const MAX: usize>(
    deserializer: D,
) -> Result<Sequence<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let data = deserializer.deserialize_seq(SequenceVisitor(PhantomData))?;
    if data.len() > MAX {
        return Err(de::Error::custom(SequenceError::BoundExceeded {
            max: MAX,
            actual: data.len(),
        }));
    }
    Ok(Sequence {
        data,
        bound: Some(MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Sample {
        id: i32,
        label: String,
    }

    #[test]
    fn test_with_len_default_initializes() {
        let seq = Sequence::<Sample>::with_len(3).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.capacity(), 3);
        assert!(seq.iter().all(|s| *s == Sample::default()));
    }

    #[test]
    fn test_fini_resets_and_is_idempotent() {
        let mut seq = Sequence::<Sample>::with_len(4).unwrap();
        seq.fini();
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.capacity(), 0);
        seq.fini();
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.capacity(), 0);
    }

    #[test]
    fn test_empty_sequence_has_no_storage() {
        let seq = Sequence::<Sample>::with_len(0).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.capacity(), 0);
    }

    #[test]
    fn test_copy_from_deep_copies() {
        let mut src = Sequence::<Sample>::with_len(2).unwrap();
        src.as_mut_slice()[1] = Sample {
            id: 7,
            label: "seven".into(),
        };

        let mut dst = Sequence::new();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);

        src.as_mut_slice()[1].label.push('!');
        assert_ne!(dst, src);
        assert_eq!(dst[1].label, "seven");
    }

    #[test]
    fn test_copy_from_keeps_larger_capacity() {
        let src = Sequence::<Sample>::with_len(1).unwrap();
        let mut dst = Sequence::<Sample>::with_len(5).unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst.len(), 1);
        assert!(dst.capacity() >= 5);
    }

    #[test]
    fn test_resize_grows_and_shrinks() {
        let mut seq = Sequence::<Sample>::new();
        seq.resize(2).unwrap();
        seq.as_mut_slice()[0].id = 1;
        seq.resize(4).unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq[0].id, 1);
        seq.resize(1).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].id, 1);
    }

    #[test]
    fn test_failed_allocation_preserves_contents() {
        let mut seq = Sequence::<u64>::from_vec(vec![1, 2, 3]);
        let err = seq.resize(usize::MAX).unwrap_err();
        assert!(matches!(err, SequenceError::Allocation { .. }));
        assert_eq!(seq.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_bound_is_enforced() {
        let mut seq = Sequence::<Sample>::bounded(2);
        seq.push(Sample::default()).unwrap();
        seq.push(Sample::default()).unwrap();
        assert_eq!(
            seq.push(Sample::default()),
            Err(SequenceError::BoundExceeded { max: 2, actual: 3 })
        );
        assert_eq!(seq.len(), 2);

        let src = Sequence::<Sample>::with_len(3).unwrap();
        assert!(seq.copy_from(&src).is_err());
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let a = Sequence::<Sample>::with_len(2).unwrap();
        let mut b = Sequence::<Sample>::with_len(8).unwrap();
        b.truncate(2);
        assert_eq!(a, b);
        assert_ne!(a, Sequence::<Sample>::with_len(3).unwrap());
    }
}
