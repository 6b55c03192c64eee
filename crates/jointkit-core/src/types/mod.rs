//! Type system utilities and aliases.
//!
//! - [`aliases`]: `Rc<RefCell<T>>` sharing used for settings bags and
//!   drawing surfaces.

pub mod aliases;

pub use aliases::*;
