/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use romdex::traits::KeyIndex;

const fn iota_keys<const N: usize>() -> [u16; N] {
    let mut keys = [0_u16; N];
    let mut i = 0;
    while i < N {
        keys[i] = i as u16;
        i += 1;
    }
    keys
}

// A full-period affine generator modulo 2^16, so the first 2048 values
// are pairwise distinct and the following 256 are fresh.
const fn affine_keys<const N: usize>(offset: usize) -> [u16; N] {
    let mut keys = [0_u16; N];
    let mut i = 0;
    while i < N {
        keys[i] = ((25173 * (i + offset) + 13849) % 65536) as u16;
        i += 1;
    }
    keys
}

const DENSE_KEYS: [u16; 1024] = iota_keys();
const PERMUTED_KEYS: [u16; 2048] = affine_keys(0);

romdex::fks_index!(static DENSE: u16 = DENSE_KEYS);
romdex::fks_index!(static PERMUTED: u16 = PERMUTED_KEYS);

romdex::fks_index!(const TRIVIAL: u8 = [42]);
const _: () = assert!(TRIVIAL.size() == 1);
const _: () = assert!(TRIVIAL.lookup(42) == 0);
const _: () = assert!(TRIVIAL.lookup(41) == 1);

#[test]
fn test_trivial_sets() {
    romdex::fks_index!(static ONE: u8 = [42]);
    assert_eq!(ONE.size(), 1);
    assert_eq!(ONE.lookup(42), 0);
    assert_eq!(ONE.lookup(41), ONE.not_found());

    romdex::fks_index!(static FIVE: u16 = [1, 2, 3, 4, 5]);
    for i in 0..5 {
        assert_eq!(FIVE.lookup(i as u16 + 1), i);
    }
    assert_eq!(FIVE.lookup(0), FIVE.not_found());
    assert_eq!(FIVE.lookup(999), FIVE.not_found());
}

#[test]
fn test_dense_sequential() {
    assert_eq!(DENSE.size(), 1024);
    assert_eq!(DENSE.buckets(), 1024);
    assert!(DENSE.slots() >= DENSE.size());
    for i in 0..1024_usize {
        assert_eq!(DENSE.lookup(i as u16), i, "i={}", i);
    }
    for i in 1024..1280_usize {
        assert_eq!(DENSE.lookup(i as u16), DENSE.not_found(), "i={}", i);
    }
}

#[test]
fn test_affine_permutation() {
    for (i, &key) in PERMUTED_KEYS.iter().enumerate() {
        assert_eq!(PERMUTED.lookup(key), i, "key={}", key);
    }
    // The next 256 values of the generator are not registered.
    let fresh: [u16; 256] = affine_keys(2048);
    for &key in &fresh {
        assert_eq!(PERMUTED.lookup(key), PERMUTED.not_found(), "key={}", key);
    }
}

#[test]
fn test_random_rejection() {
    let members = PERMUTED_KEYS.iter().copied().collect::<HashSet<_>>();
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..10_000 {
        let key = rng.gen::<u16>();
        if members.contains(&key) {
            assert!(PERMUTED.lookup(key) < PERMUTED.size());
        } else {
            assert_eq!(PERMUTED.lookup(key), PERMUTED.not_found());
        }
    }
}

#[test]
fn test_injectivity() {
    let mut seen = vec![false; PERMUTED.size()];
    for &key in &PERMUTED_KEYS {
        let index = PERMUTED.lookup(key);
        assert!(index < PERMUTED.size());
        assert!(!seen[index]);
        seen[index] = true;
    }
    assert!(seen.iter().all(|&b| b));
}

#[test]
fn test_key_index_surface() {
    assert_eq!(DENSE.get(1000), Some(1000));
    assert_eq!(DENSE.get(2000), None);
    assert!(DENSE.contains(0));
    assert!(!DENSE.contains(60000));
    assert_eq!(KeyIndex::not_found(&DENSE), DENSE.size());
}

#[test]
fn test_wide_keys() {
    romdex::fks_index!(static WIDE: u64 = [1 << 40, 1 << 50, 3, 0]);
    assert_eq!(WIDE.lookup(1 << 40), 0);
    assert_eq!(WIDE.lookup(1 << 50), 1);
    assert_eq!(WIDE.lookup(3), 2);
    assert_eq!(WIDE.lookup(0), 3);
    assert_eq!(WIDE.lookup(1 << 41), WIDE.not_found());
}
