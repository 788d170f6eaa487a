//! Backend commands queued from UI to backend worker.

use shared::protocol::FormDetails;

pub enum BackendCommand {
    AddParticipant { details: FormDetails },
    LeaveQueue,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::AddParticipant { .. } => "add_participant",
            BackendCommand::LeaveQueue => "leave_queue",
        }
    }
}
