//! Type aliases for commonly used complex types.
//!
//! Editor state is single-threaded: every scene and view lives on the UI
//! thread, so shared state is `Rc<RefCell<T>>` rather than a lock.
//!
//! ```rust,ignore
//! use reveda_core::types::*;
//!
//! let messages: Shared<MessageLine> = shared(MessageLine::new());
//! messages.borrow_mut().set_text("Select Item");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Used for session-wide state handed to several scenes at once, such as
/// the message line and the open-views registry.
pub type Shared<T> = Rc<RefCell<T>>;

/// Callback invoked by the message line whenever its text changes.
pub type MessageListener = Box<dyn Fn(&str)>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
