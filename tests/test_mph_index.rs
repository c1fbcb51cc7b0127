/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use romdex::traits::KeyIndex;

const DENSE_KEYS: [u16; 5] = [2, 5, 7, 8, 9];
const SPARSE_KEYS: [u16; 3] = [1, 10000, 60000];

romdex::mph_index!(static DENSE: u16 = DENSE_KEYS);
romdex::mph_index!(static SPARSE: u16 = SPARSE_KEYS);

fn dense_table() -> &'static dyn KeyIndex<u16> {
    &DENSE
}

fn dense_table_again() -> &'static dyn KeyIndex<u16> {
    &DENSE
}

#[test]
fn test_backend_choice() {
    // A compact span gets the direct table, a wide one the two-level
    // structure.
    assert!(std::any::type_name_of_val(&DENSE).contains("DirectIndex"));
    assert!(std::any::type_name_of_val(&SPARSE).contains("FksIndex"));
}

#[test]
fn test_lookups_follow_declaration_order() {
    for (i, &key) in DENSE_KEYS.iter().enumerate() {
        assert_eq!(DENSE.index_of(key), i);
    }
    for (i, &key) in SPARSE_KEYS.iter().enumerate() {
        assert_eq!(SPARSE.index_of(key), i);
    }
    assert_eq!(DENSE.index_of(999), DENSE.not_found());
    assert_eq!(SPARSE.index_of(999), SPARSE.not_found());
}

#[test]
fn test_backend_equivalence() {
    // Both backends must answer identically on the whole key domain.
    romdex::direct_index!(static D: u16 = DENSE_KEYS);
    romdex::fks_index!(static F: u16 = DENSE_KEYS);
    for key in 0..=u16::MAX {
        assert_eq!(D.lookup(key), F.lookup(key), "key={}", key);
    }
}

#[test]
fn test_singleton_identity() {
    // Every path to the declared table reaches the same object.
    let a = dense_table() as *const dyn KeyIndex<u16> as *const ();
    let b = dense_table_again() as *const dyn KeyIndex<u16> as *const ();
    assert_eq!(a, b);
}

#[test]
fn test_option_surface() {
    assert_eq!(DENSE.get(7), Some(2));
    assert_eq!(DENSE.get(6), None);
    assert!(SPARSE.contains(10000));
    assert!(!SPARSE.contains(10001));
}

#[test]
fn test_trait_objects() {
    // The common surface is object-safe, so heterogeneous backends can
    // sit behind one reference type.
    let tables: [&dyn KeyIndex<u16>; 2] = [&DENSE, &SPARSE];
    for table in tables {
        assert_eq!(table.not_found(), table.size());
        assert!(table.index_of(12345) <= table.size());
    }
}
