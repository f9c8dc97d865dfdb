//! Backend commands queued from UI to backend worker.

use client_core::RequestId;
use shared::protocol::SearchRequest;

#[derive(Debug)]
pub enum BackendCommand {
    RunScript {
        request_id: RequestId,
        request: SearchRequest,
    },
}
