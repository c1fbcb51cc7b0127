/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Two-level perfect hashing over a fixed key set.

A [`FksIndex`] stores the keys in a two-level structure: a first level of
`M = ceil_pow2(N)` buckets selected by native-width mixing, and, per
bucket, a second-level table of size `2^r ≥ s²` (for `s` keys falling in
the bucket) addressed by a multiply–shift hash whose odd multiplier is
searched at build time until the bucket has no collisions. The quadratic
second level makes the search succeed after an expected constant number
of trials, and total space stays linear in `N` with a small constant.
Lookups run in constant time and verify the original key, so
non-members are rejected even when they alias an occupied slot.

The whole construction happens during constant evaluation:

```
romdex::fks_index!(static TABLE: u16 = [1, 5, 2, 10, 7]);

assert_eq!(TABLE.lookup(10), 3);
assert_eq!(TABLE.lookup(999), TABLE.not_found());
```

# References

Michael L. Fredman, János Komlós, and Endre Szemerédi. “Storing a Sparse
Table with O(1) Worst Case Access Time”. *Journal of the ACM*, 1984.

*/

use epserde::*;
use mem_dbg::*;

use crate::bits::{bucket_of, ceil_log2, ceil_pow2, mix_usize, top_bits};
use crate::traits::KeyIndex;

/// Maximum number of seeds tried per bucket while searching for a
/// collision-free second-level multiplier, as a multiple of the
/// second-level table size. Exhausting the cap aborts the build.
pub const FKS_SEED_CAP_FACTOR: usize = 256;

/// A two-level FKS table mapping the `N` keys of a fixed set to their
/// dense indices in declaration order.
///
/// `M` must be `ceil_pow2(N)` and `SLOTS` the total second-level size
/// computed by the planner; the [`fks_index!`](crate::fks_index) macro
/// fills both in. Misses return the sentinel `N`.
#[derive(Epserde, Debug, Clone, MemDbg, MemSize)]
pub struct FksIndex<K, const N: usize, const M: usize, const SLOTS: usize> {
    mult: [usize; M],
    rbits: [u8; M],
    base: [u32; M],
    cells: [u32; SLOTS],
    keys_by_index: [K; N],
}

macro_rules! impl_fks_index {
    ($($slots:ident, $distinct:ident: $ty:ty),*) => {$(
        /// Return the total second-level size `Σ_b 2^r_b` of a
        /// [`FksIndex`] over these keys.
        ///
        /// The `M = ceil_pow2(N) < 2N` bucket counters are split across
        /// two `N`-sized halves, since const contexts cannot size an
        /// array by a derived expression such as `2 * N`.
        pub const fn $slots<const N: usize>(keys: &[$ty; N]) -> usize {
            if N == 0 {
                return 0;
            }
            let m = ceil_pow2(N);
            let mut lo = [0_usize; N];
            let mut hi = [0_usize; N];
            let mut i = 0;
            while i < N {
                let b = bucket_of(keys[i] as usize, m);
                if b < N {
                    lo[b] += 1;
                } else {
                    hi[b - N] += 1;
                }
                i += 1;
            }
            let mut slots = 0;
            let mut b = 0;
            while b < m {
                let s = if b < N { lo[b] } else { hi[b - N] };
                let r = if s <= 1 { 0 } else { ceil_log2(s * s) };
                slots += 1_usize << r;
                b += 1;
            }
            slots
        }

        impl<const N: usize, const M: usize, const SLOTS: usize> FksIndex<$ty, N, M, SLOTS> {
            /// Build the table for the given keys, with dense indices
            /// following the array order.
            ///
            /// Evaluated at compile time. An empty key set, a duplicate
            /// key, mismatched `M`/`SLOTS` parameters, or a bucket whose
            /// multiplier search exceeds its iteration cap abort
            /// constant evaluation.
            pub const fn new(keys: &[$ty; N]) -> Self {
                assert!(N > 0, "the key set must not be empty");
                assert!(N <= u32::MAX as usize, "too many keys for 32-bit dense indices");
                assert!(M == ceil_pow2(N), "bucket count must be ceil_pow2(N)");
                assert!(
                    crate::mph::$distinct(keys),
                    "the key set contains a duplicate key"
                );

                // First level: bucket sizes and a CSR layout grouping
                // the key indices of each bucket.
                let mut counts = [0_usize; M];
                let mut i = 0;
                while i < N {
                    counts[bucket_of(keys[i] as usize, M)] += 1;
                    i += 1;
                }
                let mut off = [0_usize; M];
                let mut acc = 0;
                let mut b = 0;
                while b < M {
                    off[b] = acc;
                    acc += counts[b];
                    b += 1;
                }
                let mut cursor = off;
                let mut items = [0_usize; N];
                let mut i = 0;
                while i < N {
                    let b = bucket_of(keys[i] as usize, M);
                    items[cursor[b]] = i;
                    cursor[b] += 1;
                    i += 1;
                }

                // Second level: table sizes `2^r ≥ s²` and base offsets.
                let mut rbits = [0_u8; M];
                let mut base = [0_u32; M];
                let mut slot_acc = 0_usize;
                let mut b = 0;
                while b < M {
                    let s = counts[b];
                    let r = if s <= 1 { 0 } else { ceil_log2(s * s) };
                    rbits[b] = r as u8;
                    base[b] = slot_acc as u32;
                    slot_acc += 1_usize << r;
                    b += 1;
                }
                assert!(slot_acc == SLOTS, "slot count does not match the key set");
                assert!(SLOTS <= u32::MAX as usize, "slot array too large for 32-bit offsets");

                // Per-bucket multiplier search and commit. Empty buckets
                // keep the multiplier 1.
                let mut mult = [1_usize; M];
                let mut cells = [N as u32; SLOTS];
                let mut keys_by_index = [0 as $ty; N];
                let mut b = 0;
                while b < M {
                    let s = counts[b];
                    if s == 0 {
                        b += 1;
                        continue;
                    }
                    let r = rbits[b] as u32;
                    let cap = FKS_SEED_CAP_FACTOR << r;
                    let mut found = false;
                    let mut seed = 1_usize;
                    'search: while seed <= cap {
                        let a = mix_usize(seed) | 1;
                        let mut x = off[b];
                        while x < off[b] + s {
                            let px = top_bits(mix_usize(keys[items[x]] as usize).wrapping_mul(a), r);
                            let mut y = x + 1;
                            while y < off[b] + s {
                                let py =
                                    top_bits(mix_usize(keys[items[y]] as usize).wrapping_mul(a), r);
                                if px == py {
                                    seed += 1;
                                    continue 'search;
                                }
                                y += 1;
                            }
                            x += 1;
                        }
                        mult[b] = a;
                        found = true;
                        break;
                    }
                    assert!(
                        found,
                        "second-level multiplier search exceeded its iteration limit"
                    );
                    let mut j = off[b];
                    while j < off[b] + s {
                        let i = items[j];
                        let k = keys[i];
                        let pos = base[b] as usize
                            + top_bits(mix_usize(k as usize).wrapping_mul(mult[b]), r);
                        cells[pos] = i as u32;
                        keys_by_index[i] = k;
                        j += 1;
                    }
                    b += 1;
                }

                Self {
                    mult,
                    rbits,
                    base,
                    cells,
                    keys_by_index,
                }
            }

            /// Return the dense index of `key`, or the sentinel
            /// [`not_found`](Self::not_found) if `key` is not in the set.
            ///
            /// The final equality check is what rejects non-members that
            /// alias an occupied slot of a foreign bucket.
            #[inline(always)]
            pub const fn lookup(&self, key: $ty) -> usize {
                let m = mix_usize(key as usize);
                let b = m & (M - 1);
                let pos =
                    self.base[b] as usize + top_bits(m.wrapping_mul(self.mult[b]), self.rbits[b] as u32);
                let i = self.cells[pos] as usize;
                if i == N || self.keys_by_index[i] != key {
                    N
                } else {
                    i
                }
            }

            /// Return the number of keys in the set.
            #[inline(always)]
            pub const fn size(&self) -> usize {
                N
            }

            /// Return the sentinel index meaning "not a member" (equal to
            /// [`size`](Self::size)).
            #[inline(always)]
            pub const fn not_found(&self) -> usize {
                N
            }

            /// Return the first-level bucket count.
            #[inline(always)]
            pub const fn buckets(&self) -> usize {
                M
            }

            /// Return the total second-level size.
            #[inline(always)]
            pub const fn slots(&self) -> usize {
                SLOTS
            }
        }

        impl<const N: usize, const M: usize, const SLOTS: usize> KeyIndex<$ty>
            for FksIndex<$ty, N, M, SLOTS>
        {
            #[inline(always)]
            fn size(&self) -> usize {
                N
            }

            #[inline(always)]
            fn index_of(&self, key: $ty) -> usize {
                self.lookup(key)
            }
        }
    )*};
}

impl_fks_index![
    fks_slots_u8, all_distinct_u8: u8,
    fks_slots_u16, all_distinct_u16: u16,
    fks_slots_u32, all_distinct_u32: u32,
    fks_slots_u64, all_distinct_u64: u64,
    fks_slots_usize, all_distinct_usize: usize
];

/// Declare a [`FksIndex`] as a `static` or `const` item.
///
/// The key type must be one of `u8`, `u16`, `u32`, `u64` or `usize`,
/// spelled as a bare token; the keys may be an array literal or the name
/// of a `const` array.
///
/// ```
/// romdex::fks_index!(static TABLE: u16 = [1, 10000, 60000]);
///
/// assert_eq!(TABLE.lookup(60000), 2);
/// ```
#[macro_export]
macro_rules! fks_index {
    ($vis:vis static $name:ident: $kty:tt = $keys:expr) => {
        $vis static $name: $crate::mph::FksIndex<
            $kty,
            { <[$kty]>::len(&$keys) },
            { $crate::bits::ceil_pow2(<[$kty]>::len(&$keys)) },
            { $crate::__fks_slots!($kty, $keys) },
        > = <$crate::mph::FksIndex<
            $kty,
            { <[$kty]>::len(&$keys) },
            { $crate::bits::ceil_pow2(<[$kty]>::len(&$keys)) },
            { $crate::__fks_slots!($kty, $keys) },
        >>::new(&$keys);
    };
    ($vis:vis const $name:ident: $kty:tt = $keys:expr) => {
        $vis const $name: $crate::mph::FksIndex<
            $kty,
            { <[$kty]>::len(&$keys) },
            { $crate::bits::ceil_pow2(<[$kty]>::len(&$keys)) },
            { $crate::__fks_slots!($kty, $keys) },
        > = <$crate::mph::FksIndex<
            $kty,
            { <[$kty]>::len(&$keys) },
            { $crate::bits::ceil_pow2(<[$kty]>::len(&$keys)) },
            { $crate::__fks_slots!($kty, $keys) },
        >>::new(&$keys);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __fks_slots {
    (u8, $keys:expr) => {
        $crate::mph::fks_slots_u8(&$keys)
    };
    (u16, $keys:expr) => {
        $crate::mph::fks_slots_u16(&$keys)
    };
    (u32, $keys:expr) => {
        $crate::mph::fks_slots_u32(&$keys)
    };
    (u64, $keys:expr) => {
        $crate::mph::fks_slots_u64(&$keys)
    };
    (usize, $keys:expr) => {
        $crate::mph::fks_slots_usize(&$keys)
    };
}
