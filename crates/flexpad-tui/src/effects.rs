//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! Every effect that touches the document goes through the
//! `DocumentController`; the reducer itself never performs I/O.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// The editor content changed; record the edit and re-arm autosave.
    ContentChanged,
    /// Save, asking for a path when the document has none.
    Save,
    /// Ask for a file and open it.
    Open,
    /// Confirm, then clear the document.
    NewDocument,
    /// Confirm, then quit.
    Close,
    /// Run the autosave callback.
    Autosave,
}
