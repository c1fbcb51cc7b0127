/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Compile-time selection between the table backends.

For a given key set the selector compares two integer memory models and
resolves, through a type-level choice on a const boolean, to either a
[`DirectIndex`] or a [`FksIndex`]. Writing

```
use romdex::traits::KeyIndex;

romdex::mph_index!(static DENSE: u16 = [2, 5, 7, 8, 9]);
romdex::mph_index!(static SPARSE: u16 = [1, 10000, 60000]);

assert_eq!(DENSE.index_of(7), 2);
assert_eq!(SPARSE.index_of(60000), 2);
```

declares statics of the two different backend types; both expose the
common [`KeyIndex`](crate::traits::KeyIndex) surface, and all users of a
key set share the one declared item. Code that needs a specific backend
can use [`direct_index!`](crate::direct_index) or
[`fks_index!`](crate::fks_index) directly; the point of this alias is to
choose for you.

*/

use super::{DirectIndex, FksIndex};

/// Slot-count factor of the FKS memory model: the flat second level is
/// assumed to hold about `FKS_ALPHA * N` cells.
pub const FKS_ALPHA: usize = 3;

/// Width in bytes of a dense-index cell in either backend.
pub const INDEX_CELL_BYTES: usize = core::mem::size_of::<u32>();

/// Type-level carrier of the backend choice; the const parameter is the
/// verdict of the per-width `prefer_fks_*` memory model.
pub struct Auto<const FKS: bool>;

/// Maps the backend choice to the concrete table type.
pub trait Pick<K, const N: usize, const SPAN: usize, const M: usize, const SLOTS: usize> {
    /// The chosen backend type.
    type Index;
}

impl<K, const N: usize, const SPAN: usize, const M: usize, const SLOTS: usize>
    Pick<K, N, SPAN, M, SLOTS> for Auto<false>
{
    type Index = DirectIndex<K, N, SPAN>;
}

impl<K, const N: usize, const SPAN: usize, const M: usize, const SLOTS: usize>
    Pick<K, N, SPAN, M, SLOTS> for Auto<true>
{
    type Index = FksIndex<K, N, M, SLOTS>;
}

/// The backend chosen for a key set: [`DirectIndex`] when the direct
/// table is no larger than the modeled FKS footprint, [`FksIndex`]
/// otherwise.
///
/// The [`mph_index!`](crate::mph_index) macro computes every parameter
/// from the key array; the alias is public so that non-macro code can
/// name the resulting type.
pub type MphIndex<
    K,
    const N: usize,
    const SPAN: usize,
    const M: usize,
    const SLOTS: usize,
    const FKS: bool,
> = <Auto<FKS> as Pick<K, N, SPAN, M, SLOTS>>::Index;

macro_rules! impl_prefer_fks {
    ($($name:ident, $span:ident: $ty:ty),*) => {$(
        /// Memory-model verdict for these keys: true if a two-level
        /// table is expected to be smaller than the direct table.
        ///
        /// Direct cost is `span * cell`; FKS cost is
        /// `N * (α·cell + 2·word + 1 + sizeof(key))`, all in bytes.
        pub const fn $name(keys: &[$ty]) -> bool {
            let n = keys.len();
            let span = super::$span(keys);
            let word = core::mem::size_of::<usize>();
            let mem_direct = span.saturating_mul(INDEX_CELL_BYTES);
            let mem_fks = n
                * (FKS_ALPHA * INDEX_CELL_BYTES
                    + 2 * word
                    + 1
                    + core::mem::size_of::<$ty>());
            mem_direct > mem_fks
        }
    )*};
}

impl_prefer_fks![
    prefer_fks_u8, direct_span_u8: u8,
    prefer_fks_u16, direct_span_u16: u16,
    prefer_fks_u32, direct_span_u32: u32,
    prefer_fks_u64, direct_span_u64: u64,
    prefer_fks_usize, direct_span_usize: usize
];

/// Declare the memory-optimal table for a key set as a `static` or
/// `const` item; see [`MphIndex`].
///
/// The key type must be one of `u8`, `u16`, `u32`, `u64` or `usize`,
/// spelled as a bare token; the keys may be an array literal or the name
/// of a `const` array.
#[macro_export]
macro_rules! mph_index {
    ($vis:vis static $name:ident: $kty:tt = $keys:expr) => {
        $vis static $name: $crate::mph::MphIndex<
            $kty,
            { <[$kty]>::len(&$keys) },
            { $crate::__direct_span!($kty, $keys) },
            { $crate::bits::ceil_pow2(<[$kty]>::len(&$keys)) },
            { $crate::__fks_slots!($kty, $keys) },
            { $crate::__prefer_fks!($kty, $keys) },
        > = <$crate::mph::MphIndex<
            $kty,
            { <[$kty]>::len(&$keys) },
            { $crate::__direct_span!($kty, $keys) },
            { $crate::bits::ceil_pow2(<[$kty]>::len(&$keys)) },
            { $crate::__fks_slots!($kty, $keys) },
            { $crate::__prefer_fks!($kty, $keys) },
        >>::new(&$keys);
    };
    ($vis:vis const $name:ident: $kty:tt = $keys:expr) => {
        $vis const $name: $crate::mph::MphIndex<
            $kty,
            { <[$kty]>::len(&$keys) },
            { $crate::__direct_span!($kty, $keys) },
            { $crate::bits::ceil_pow2(<[$kty]>::len(&$keys)) },
            { $crate::__fks_slots!($kty, $keys) },
            { $crate::__prefer_fks!($kty, $keys) },
        > = <$crate::mph::MphIndex<
            $kty,
            { <[$kty]>::len(&$keys) },
            { $crate::__direct_span!($kty, $keys) },
            { $crate::bits::ceil_pow2(<[$kty]>::len(&$keys)) },
            { $crate::__fks_slots!($kty, $keys) },
            { $crate::__prefer_fks!($kty, $keys) },
        >>::new(&$keys);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __prefer_fks {
    (u8, $keys:expr) => {
        $crate::mph::prefer_fks_u8(&$keys)
    };
    (u16, $keys:expr) => {
        $crate::mph::prefer_fks_u16(&$keys)
    };
    (u32, $keys:expr) => {
        $crate::mph::prefer_fks_u32(&$keys)
    };
    (u64, $keys:expr) => {
        $crate::mph::prefer_fks_u64(&$keys)
    };
    (usize, $keys:expr) => {
        $crate::mph::prefer_fks_usize(&$keys)
    };
}
