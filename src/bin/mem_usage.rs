/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Prints the backend chosen by the selector and the memory footprint of
//! a few sample tables.

use clap::Parser;
use log::info;
use mem_dbg::*;

const DENSE_KEYS: [u16; 5] = [2, 5, 7, 8, 9];
const SPARSE_KEYS: [u16; 3] = [1, 10000, 60000];

const fn range_keys<const N: usize>() -> [u16; N] {
    let mut keys = [0_u16; N];
    let mut i = 0;
    while i < N {
        keys[i] = i as u16;
        i += 1;
    }
    keys
}

const RANGE_KEYS: [u16; 1024] = range_keys();

romdex::mph_index!(static DENSE: u16 = DENSE_KEYS);
romdex::mph_index!(static SPARSE: u16 = SPARSE_KEYS);
romdex::fks_index!(static RANGE: u16 = RANGE_KEYS);

#[derive(Parser, Debug)]
#[command(about = "Show backend choices and memory usage of sample tables", long_about = None)]
struct Args {
    /// Print the per-field memory breakdown of each table.
    #[arg(short, long)]
    breakdown: bool,
}

fn show<T: MemSize + MemDbg>(name: &str, table: &T, breakdown: bool) {
    info!("{}: {}", name, std::any::type_name_of_val(table));
    println!(
        "{:8} size: {} bytes",
        name,
        table.mem_size(SizeFlags::default())
    );
    if breakdown {
        table.mem_dbg(DbgFlags::default()).unwrap();
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    let args = Args::parse();

    show("dense", &DENSE, args.breakdown);
    show("sparse", &SPARSE, args.breakdown);
    show("range", &RANGE, args.breakdown);

    assert_eq!(DENSE.lookup(7), 2);
    assert_eq!(SPARSE.lookup(60000), 2);
    assert_eq!(RANGE.lookup(1000), 1000);
}
