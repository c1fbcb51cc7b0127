/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use epserde::prelude::*;
use romdex::bits::ceil_pow2;
use romdex::mph::{fks_slots_u16, FksIndex};

const KEYS: [u16; 6] = [3, 9, 27, 81, 243, 729];
const N: usize = KEYS.len();
const M: usize = ceil_pow2(N);
const SLOTS: usize = fks_slots_u16(&KEYS);

#[test]
fn test_serdes() -> Result<()> {
    let table = FksIndex::<u16, N, M, SLOTS>::new(&KEYS);

    let tmp_file = std::env::temp_dir().join("test_serdes_romdex.bin");
    table.store(&tmp_file)?;
    let loaded = <FksIndex<u16, N, M, SLOTS>>::load_full(&tmp_file)?;
    std::fs::remove_file(&tmp_file)?;

    for (i, &key) in KEYS.iter().enumerate() {
        assert_eq!(loaded.lookup(key), i);
    }
    assert_eq!(loaded.lookup(0), loaded.not_found());
    assert_eq!(loaded.lookup(100), loaded.not_found());
    Ok(())
}
