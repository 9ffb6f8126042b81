//! Local UI chrome state (dialogs, busy flags, status messages).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the engine so the store and
//! gesture state stay pure. Requests the tree host must carry out (export)
//! are sequence counters the host watches.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// How long a status message stays visible.
pub const STATUS_TTL_MS: u32 = 4000;

/// Severity of a status bar message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Info,
    Error,
}

/// A transient message shown in the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    /// Sequence number used to expire exactly this message.
    pub seq: u64,
}

/// UI state for dialogs, busy indicators, and the status line.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub text_dialog_open: bool,
    pub uploading: bool,
    pub exporting: bool,
    /// Bumped to ask the tree host to export a PNG.
    pub export_seq: u64,
    pub status: Option<StatusMessage>,
    status_seq: u64,
}

impl UiState {
    /// Show `text` in the status bar, replacing any current message.
    /// Returns the sequence number to pass to [`UiState::expire_status`].
    pub fn post_status(&mut self, kind: StatusKind, text: impl Into<String>) -> u64 {
        self.status_seq = self.status_seq.wrapping_add(1);
        self.status = Some(StatusMessage { kind, text: text.into(), seq: self.status_seq });
        self.status_seq
    }

    /// Clear the status message if it is still the one posted as `seq`.
    pub fn expire_status(&mut self, seq: u64) -> bool {
        if self.status.as_ref().is_some_and(|s| s.seq == seq) {
            self.status = None;
            return true;
        }
        false
    }

    /// Request an export unless one is already running.
    pub fn request_export(&mut self) -> bool {
        if self.exporting {
            return false;
        }
        self.exporting = true;
        self.export_seq = self.export_seq.wrapping_add(1);
        true
    }

    pub fn is_busy(&self) -> bool {
        self.uploading || self.exporting
    }
}
