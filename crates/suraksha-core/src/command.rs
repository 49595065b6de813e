// ── Command API ──
//
// All operator mutations flow through a `Command`. A started monitor
// routes them over a channel to its command processor; a stopped one
// applies them inline.

use crate::draft::ReportDraft;
use crate::error::CoreError;
use crate::model::{CitizenReport, Incident, RecordId};

/// Default author of operator comments.
pub const DEFAULT_USER: &str = "Current User";

/// A command envelope sent through the command channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// Every operator mutation.
#[derive(Debug, Clone)]
pub enum Command {
    /// Append a comment to an incident's action log.
    AddComment {
        incident: RecordId,
        user: String,
        details: String,
    },
    /// File a citizen report from a filled-in form.
    SubmitReport { draft: ReportDraft },
}

/// What a command produced.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// The incident with its new action-log entry.
    Incident(Incident),
    /// The newly filed report.
    CitizenReport(CitizenReport),
}
