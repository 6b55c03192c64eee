//! Type aliases for commonly shared state.
//!
//! Everything in jointkit runs on a single thread, so shared mutable state is
//! always `Rc<RefCell<T>>`. The alias keeps signatures short where a
//! parameter bag is held by both edges of a mating pair, or where a caller
//! keeps a handle to the surface it handed to a sheet.
//!
//! ```rust
//! use jointkit_core::types::*;
//!
//! let counter: Shared<u32> = shared(0);
//! *counter.borrow_mut() += 1;
//! assert_eq!(*counter.borrow(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// A mutation through one holder is visible to every other holder.
pub type Shared<T> = Rc<RefCell<T>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
