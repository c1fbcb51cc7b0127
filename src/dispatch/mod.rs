/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Static dispatch of keyed constructions.

The [`static_dispatch!`] macro binds a base trait, a key type and a
declaration-ordered list of concrete types, each carrying a compile-time
key through the [`Keyed`] trait. The expansion declares, in a fresh
module:

- `KEYS`, the extracted keys in declaration order;
- `TABLE`, the [memory-optimal table](crate::mph::MphIndex) for `KEYS`;
- one [`StaticCell`](crate::cell::StaticCell) per registered type, named
  after the type inside a `cells` submodule;
- `emplace`, which maps a run-time key to the matching type, constructs
  it into its cell with the provided arguments and returns a base
  trait-object pointer.

Construction goes through [`Construct`], whose implementations play the
role of constructor overloads: one impl per accepted argument signature,
with the default body rejecting everything else. Passing owned arguments
selects consuming ("move") constructors and passing references selects
borrowing ("copy") ones, so move-only payloads remain reachable.

```
use romdex::dispatch::{Construct, Keyed};

struct Relay { line: u8 }
struct Valve;

trait Device { fn id(&self) -> u8; }
impl Device for Relay { fn id(&self) -> u8 { 2 } }
impl Device for Valve { fn id(&self) -> u8 { 5 } }

impl Keyed for Relay { type Key = u8; const KEY: u8 = 2; }
impl Keyed for Valve { type Key = u8; const KEY: u8 = 5; }

impl Construct<u8> for Relay {
    fn construct(line: u8) -> Option<Self> { Some(Relay { line }) }
}
impl Construct<()> for Valve {
    fn construct(_: ()) -> Option<Self> { Some(Valve) }
}
impl Construct<()> for Relay {}
impl Construct<u8> for Valve {}

romdex::static_dispatch!(pub mod devices {
    base: Device,
    key: u8,
    types: [Relay, Valve],
});

fn main() {
    unsafe {
        let relay = devices::emplace(2, 7_u8).unwrap();
        assert_eq!(relay.as_ref().id(), 2);
        assert!(devices::emplace(2, ()).is_none()); // signature mismatch
        assert!(devices::emplace(9, ()).is_none()); // unknown key
    }
}
```

A duplicate key fails the table build at compile time; a key type
mismatch among the registered types fails the typing of `KEYS`.

*/

use crate::traits::UnsignedKey;

/// A compile-time key attached to a registrable type.
///
/// All types registered in one [`static_dispatch!`](crate::static_dispatch)
/// binding must agree on `Key`, and their `KEY` values must be pairwise
/// distinct.
pub trait Keyed {
    /// The key type.
    type Key: UnsignedKey;
    /// The key of this type, unique within a binding.
    const KEY: Self::Key;
}

/// One constructor overload of a registered type.
///
/// Implementations return `Some` when the type is constructible from
/// `args`; the provided default body rejects the signature, so an empty
/// impl is an explicit "this overload does not exist" marker:
///
/// ```
/// use romdex::dispatch::Construct;
///
/// struct Gauge { label: String }
///
/// impl Construct<String> for Gauge {
///     fn construct(label: String) -> Option<Self> {
///         Some(Gauge { label })
///     }
/// }
/// impl Construct<i32> for Gauge {} // rejected signature
///
/// assert!(<Gauge as Construct<String>>::construct("psi".into()).is_some());
/// assert!(<Gauge as Construct<i32>>::construct(3).is_none());
/// ```
pub trait Construct<A>: Sized {
    /// Attempt construction from `args`; `None` means the signature does
    /// not match.
    fn construct(args: A) -> Option<Self> {
        let _ = args;
        None
    }
}

/// Declare a static dispatch binding; see the [module](self)
/// documentation.
///
/// The key type must be one of `u8`, `u16`, `u32`, `u64` or `usize`,
/// spelled as a bare token, and every registered type must be a bare
/// identifier visible at the invocation site.
#[macro_export]
macro_rules! static_dispatch {
    ($(#[$meta:meta])* $vis:vis mod $name:ident {
        base: $base:path,
        key: $kty:tt,
        types: [$($ty:ident),+ $(,)?] $(,)?
    }) => {
        $(#[$meta])*
        $vis mod $name {
            use super::*;

            /// Keys of the registered types, in declaration order.
            pub const KEYS: [$kty; [$(stringify!($ty)),+].len()] =
                [$(<$ty as $crate::dispatch::Keyed>::KEY),+];

            $crate::mph_index!(pub static TABLE: $kty = KEYS);

            /// One storage cell per registered type, named after it.
            pub mod cells {
                #![allow(non_upper_case_globals)]
                $(
                    pub static $ty: $crate::cell::StaticCell<super::$ty> =
                        $crate::cell::StaticCell::new();
                )+
            }

            /// Construct the type registered for `key` into its cell,
            /// replacing any live value, and return a base pointer.
            ///
            /// Returns `None` when `key` is not registered, or when the
            /// selected type is not constructible from `args` (in which
            /// case no cell is touched).
            ///
            /// # Safety
            /// Single-threaded use only; a returned pointer is
            /// invalidated by the next `emplace` resolving to the same
            /// type.
            pub unsafe fn emplace<A>(
                key: $kty,
                args: A,
            ) -> Option<core::ptr::NonNull<dyn $base>>
            where
                $($ty: $crate::dispatch::Construct<A>,)+
            {
                let index = TABLE.lookup(key);
                if index >= TABLE.size() {
                    return None;
                }
                $crate::__dispatch_arm!(index, args, $base; (0); $($ty),+)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch_arm {
    ($index:expr, $args:expr, $base:path; ($n:expr); ) => {{
        let _ = $args;
        None
    }};
    ($index:expr, $args:expr, $base:path; ($n:expr); $head:ident $(, $tail:ident)*) => {
        if $index == $n {
            match <$head as $crate::dispatch::Construct<_>>::construct($args) {
                Some(value) => {
                    let ptr = cells::$head.replace(value);
                    core::ptr::NonNull::new(ptr.as_ptr() as *mut dyn $base)
                }
                None => None,
            }
        } else {
            $crate::__dispatch_arm!($index, $args, $base; ($n + 1); $($tail),*)
        }
    };
}
