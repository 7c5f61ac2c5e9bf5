//! Core of the FlexPad editor: the document session, its autosave deadline,
//! storage, configuration and the diagnostic log.

pub mod autosave;
pub mod config;
pub mod document;
pub mod logging;
pub mod session;
pub mod storage;

pub use document::{DocumentController, DocumentOutcome, Dialogs, FileFilter, SaveTrigger};
pub use session::{DocumentStats, Session};
pub use storage::{LocalStorage, Storage};
