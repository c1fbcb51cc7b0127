/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

The lookup surface shared by every table backend.

*/

use impl_tools::autoimpl;

/// A minimal perfect map from a fixed key set onto `[0..size())`.
///
/// Implementations map each registered key to its dense index in
/// declaration order and every other key to the sentinel
/// [`not_found`](KeyIndex::not_found), which equals
/// [`size`](KeyIndex::size). Callers on a hot path can thus reject
/// misses with a single `index < size` comparison; [`get`](KeyIndex::get)
/// offers the same information as an [`Option`].
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait KeyIndex<K> {
    /// Return the number of keys in the set.
    fn size(&self) -> usize;

    /// Return the sentinel index meaning "not a member".
    ///
    /// Always equal to [`size`](KeyIndex::size).
    fn not_found(&self) -> usize {
        self.size()
    }

    /// Return the dense index of `key`, or the sentinel if `key` is not
    /// in the set.
    fn index_of(&self, key: K) -> usize;

    /// Return the dense index of `key`, or `None` if `key` is not in the
    /// set.
    fn get(&self, key: K) -> Option<usize> {
        let index = self.index_of(key);
        if index < self.size() {
            Some(index)
        } else {
            None
        }
    }

    /// Return true if `key` is in the set.
    fn contains(&self, key: K) -> bool {
        self.index_of(key) < self.size()
    }
}
