/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Main traits: key bounds and the lookup surface shared by all table
backends.

*/

pub mod key_index;
pub use key_index::*;

pub mod keys;
pub use keys::*;
