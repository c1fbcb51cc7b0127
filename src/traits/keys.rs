/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Bounds for key types.

*/

use crate::bits::Mix;
use common_traits::{CastableInto, UnsignedInt};

/// Bound for the unsigned integer types usable as keys.
///
/// Tables are stamped for `u8`, `u16`, `u32`, `u64` and `usize`; this
/// trait gathers the bounds needed by generic code at the seams (the
/// dispatch factory, user helpers). Signed and non-integer types are
/// rejected at compile time.
pub trait UnsignedKey: UnsignedInt + CastableInto<usize> + Mix + 'static {}

impl<T: UnsignedInt + CastableInto<usize> + Mix + 'static> UnsignedKey for T {}
