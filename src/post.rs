use std::collections::VecDeque;

pub(crate) const SENDING_STATUS: &str = "Sending...";
pub(crate) const SUCCESS_STATUS: &str = "Request submitted successfully!";
pub(crate) const HTTP_ERROR_STATUS: &str =
    "There was an error submitting the form. Please try again.";
pub(crate) const TRANSPORT_ERROR_STATUS: &str = "Network error. Please try again.";

/// One captured endpoint submission: the form-encoded entries posted
/// with `Accept: application/json` semantics, `Color` repeated per
/// selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub url: String,
    pub entries: Vec<(String, String)>,
}

/// Explicit result of the single awaited network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Accepted(u16),
    HttpError(u16),
    TransportError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MockResponse {
    Status(u16),
    TransportFailure(String),
}

/// Queued mock transport standing in for the network. An empty queue
/// accepts with HTTP 200; failures are opted into per request.
#[derive(Debug, Clone, Default)]
pub(crate) struct PostMock {
    queue: VecDeque<MockResponse>,
}

impl PostMock {
    pub(crate) fn queue_status(&mut self, status: u16) {
        self.queue.push_back(MockResponse::Status(status));
    }

    pub(crate) fn queue_transport_failure(&mut self, reason: &str) {
        self.queue
            .push_back(MockResponse::TransportFailure(reason.to_string()));
    }

    pub(crate) fn perform(&mut self) -> PostOutcome {
        match self.queue.pop_front() {
            None => PostOutcome::Accepted(200),
            Some(MockResponse::Status(status)) if (200..300).contains(&status) => {
                PostOutcome::Accepted(status)
            }
            Some(MockResponse::Status(status)) => PostOutcome::HttpError(status),
            Some(MockResponse::TransportFailure(reason)) => PostOutcome::TransportError(reason),
        }
    }
}
