//! Edit state machine: current parameters plus bounded undo/redo history.
//!
//! The session is a small reducer. Toolbar actions go through
//! [`EditSession::dispatch`] (or the pure [`apply`]) and are recorded as full
//! [`Snapshot`]s; view updates from the crop surface are not.
//!
//! # History
//!
//! | Action           | History                     |
//! |------------------|-----------------------------|
//! | `SET_VIEW`       | untouched                   |
//! | `UNDO` / `REDO`  | current swapped across      |
//! | everything else  | pre-mutation push, redo cleared |

mod action;
mod history;
mod session;
mod types;

pub use action::EditAction;
pub use history::History;
pub use session::{apply, EditSession};
pub use types::{OutputFormat, OutputOptions, OutputPatch, Snapshot};
