//! Length-prefixed sequences, sets and maps.
//!
//! Every collection is a compact length prefix followed by its elements in iteration
//! order. For ordered sets and maps that order is ascending key order, which makes
//! the encoding canonical. Maps encode each entry as the `(key, value)` tuple.
//! Decoding does not check that order: keys are inserted as read, so out-of-order keys
//! are sorted and a repeated key keeps the last value.
//!
//! Decoding never trusts the prefix for allocation: the length is first checked against
//! [`DecodeConfig::max_collection_len`](crate::DecodeConfig::max_collection_len), and the
//! initial capacity is further bounded by the bytes actually left in the input, so a
//! short message claiming millions of elements fails with `OutOfData` after a bounded
//! amount of work instead of reserving memory up front.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::codec::{Decodable, Encodable};
use crate::compact::{compact_len, decode_length, encode_length};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::sink::Output;

/// Length prefix size plus the element hints.
fn sequence_hint<'a, T: Encodable + 'a>(len: usize, items: impl Iterator<Item = &'a T>) -> usize {
    compact_len(&(len as u64)) + items.map(Encodable::size_hint).sum::<usize>()
}

/// Capacity to reserve for `len` declared elements.
#[inline]
fn bounded_capacity(len: usize, input: &Cursor<'_>) -> usize {
    len.min(input.remaining())
}

impl<T: Encodable> Encodable for [T] {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_length(self.len(), dest);
        for item in self {
            item.encode_to(dest);
        }
    }

    fn size_hint(&self) -> usize {
        sequence_hint(self.len(), self.iter())
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        self.as_slice().encode_to(dest);
    }

    fn size_hint(&self) -> usize {
        self.as_slice().size_hint()
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        let len = decode_length(input)?;
        let mut items = Vec::with_capacity(bounded_capacity(len, input));
        for _ in 0..len {
            items.push(T::decode(input)?);
        }
        Ok(items)
    }
}

impl<T: Encodable> Encodable for VecDeque<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_length(self.len(), dest);
        for item in self {
            item.encode_to(dest);
        }
    }

    fn size_hint(&self) -> usize {
        sequence_hint(self.len(), self.iter())
    }
}

impl<T: Decodable> Decodable for VecDeque<T> {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        Vec::<T>::decode(input).map(VecDeque::from)
    }
}

impl<T: Encodable> Encodable for BTreeSet<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_length(self.len(), dest);
        for item in self {
            item.encode_to(dest);
        }
    }

    fn size_hint(&self) -> usize {
        sequence_hint(self.len(), self.iter())
    }
}

impl<T: Decodable + Ord> Decodable for BTreeSet<T> {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        let len = decode_length(input)?;
        let mut set = BTreeSet::new();
        for _ in 0..len {
            set.insert(T::decode(input)?);
        }
        Ok(set)
    }
}

impl<K: Encodable, V: Encodable> Encodable for BTreeMap<K, V> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_length(self.len(), dest);
        for (key, value) in self {
            key.encode_to(dest);
            value.encode_to(dest);
        }
    }

    fn size_hint(&self) -> usize {
        compact_len(&(self.len() as u64))
            + self
                .iter()
                .map(|(k, v)| k.size_hint() + v.size_hint())
                .sum::<usize>()
    }
}

impl<K: Decodable + Ord, V: Decodable> Decodable for BTreeMap<K, V> {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        let len = decode_length(input)?;
        let mut map = BTreeMap::new();
        for _ in 0..len {
            let key = K::decode(input)?;
            let value = V::decode(input)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}
