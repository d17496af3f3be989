//! Kernel of the Artis shell, shared by every feature slice.
//!
//! * [`security`]: route guards and the access controller.
//! * [`routing`]: route table, lazy modules and the navigation loop.
//! * [`forms`]: validation rules and form controls.
//! * [`notify`], [`dialog`], [`i18n`]: presentation collaborators.
//! * [`config`]: layered configuration loading (non-wasm).
//!
//! ## ID generation
//! ```rust
//! # use artis_kernel::safe_nanoid;
//! let id = safe_nanoid!();
//! assert_eq!(id.len(), 12);
//! ```

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod dialog;
pub mod forms;
pub mod i18n;
pub mod notify;
pub mod prelude;
pub mod routing;
pub mod security;

// Alphabet excludes visually ambiguous characters (I, O, l, 0, 1).
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub use artis_domain as domain;
pub use nanoid::nanoid;

/// Generates an unambiguous `NanoID` (no visually confusing characters).
#[macro_export]
macro_rules! safe_nanoid {
    () => {
        $crate::nanoid!(12, $crate::SAFE_ALPHABET)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}
