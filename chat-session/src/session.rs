//! The conversation state machine.
//!
//! ```text
//!   Ready ──begin──▶ Streaming ──resolve(Ok)──▶ Ready
//!     ▲                  │
//!     │                  └──resolve(Err)──▶ Error ──begin──▶ Streaming
//! ```
//!
//! A placeholder assistant message sits at the end of the log exactly while
//! the status is `Streaming`. `begin` refuses to start a second submission
//! until the first is resolved.

use crate::answer::format_answer;
use crate::error::{GatewayError, SessionError, ValidationError};
use crate::events::{Notice, SessionEvent};
use crate::gateway::QueryGateway;
use crate::message::Message;
use query_gateway::QueryRequest;
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub const VALIDATION_NOTICE: &str = "Please provide both a question and a document URL";
pub const FAILURE_NOTICE: &str = "Failed to get AI response";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Ready,
    Streaming,
    Error,
}

/// Ticket for the outstanding query. Only [`Session::begin`] creates one and
/// [`Session::resolve`] consumes it.
#[derive(Debug)]
#[must_use = "an unresolved submission leaves the session Streaming"]
pub struct Submission {
    request: QueryRequest,
    placeholder_index: usize,
}

impl Submission {
    pub fn request(&self) -> &QueryRequest {
        &self.request
    }

    pub fn placeholder_index(&self) -> usize {
        self.placeholder_index
    }
}

#[derive(Debug, Default)]
pub struct Session {
    log: Vec<Message>,
    pending_question: String,
    document_reference: String,
    status: SessionStatus,
    events: Option<UnboundedSender<SessionEvent>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that reports every log mutation, status change and notice.
    pub fn with_events() -> (Self, UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            events: Some(tx),
            ..Self::default()
        };
        (session, rx)
    }

    pub fn log(&self) -> &[Message] {
        &self.log
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn pending_question(&self) -> &str {
        &self.pending_question
    }

    pub fn document_reference(&self) -> &str {
        &self.document_reference
    }

    pub fn placeholder_index(&self) -> Option<usize> {
        self.log.iter().position(|m| m.is_placeholder)
    }

    /// Submission controls are disabled while a query is outstanding.
    pub fn controls_locked(&self) -> bool {
        self.status == SessionStatus::Streaming
    }

    pub fn can_submit(&self) -> bool {
        !self.controls_locked()
            && !self.pending_question.trim().is_empty()
            && !self.document_reference.trim().is_empty()
    }

    pub fn set_pending_question(&mut self, question: impl Into<String>) {
        self.pending_question = question.into();
    }

    pub fn set_document_reference(&mut self, document_reference: impl Into<String>) {
        self.document_reference = document_reference.into();
    }

    /// Validate the input and optimistically append the question and a
    /// placeholder. Nothing is mutated when this returns an error.
    pub fn begin(
        &mut self,
        question: &str,
        document_reference: &str,
    ) -> Result<Submission, SessionError> {
        if self.controls_locked() {
            return Err(SessionError::SubmissionInFlight);
        }

        if let Err(err) = validate(question, document_reference) {
            tracing::debug!(reason = %err, "Submission rejected");
            self.notify(SessionEvent::Notice(Notice::warning(VALIDATION_NOTICE)));
            return Err(err.into());
        }

        self.document_reference = document_reference.to_string();
        self.pending_question.clear();
        self.log.push(Message::user(question));
        self.log_changed();

        self.log.push(Message::placeholder());
        let placeholder_index = self.log.len() - 1;
        self.set_status(SessionStatus::Streaming);
        self.log_changed();

        tracing::debug!(placeholder_index, "Submission started");

        Ok(Submission {
            request: QueryRequest::single(document_reference, question),
            placeholder_index,
        })
    }

    /// Replace the placeholder with the rendered answer, or drop it and enter
    /// `Error`. The user's question stays in the log either way.
    pub fn resolve(
        &mut self,
        submission: Submission,
        outcome: Result<Value, GatewayError>,
    ) -> Result<(), SessionError> {
        let index = submission.placeholder_index;
        let outstanding = self.status == SessionStatus::Streaming
            && self.log.get(index).is_some_and(|m| m.is_placeholder);
        if !outstanding {
            return Err(SessionError::NoSubmissionInFlight);
        }

        match outcome {
            Ok(value) => {
                self.log[index] = Message::assistant(format_answer(value));
                self.set_status(SessionStatus::Ready);
                self.log_changed();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Query failed, removing placeholder");
                self.log.remove(index);
                self.set_status(SessionStatus::Error);
                self.log_changed();
                self.notify(SessionEvent::Notice(Notice::error(FAILURE_NOTICE)));
                Err(SessionError::Upstream(err))
            }
        }
    }

    /// Ask `question` about `document_reference` and wait for the outcome.
    pub async fn submit<G>(
        &mut self,
        gateway: &G,
        question: &str,
        document_reference: &str,
    ) -> Result<(), SessionError>
    where
        G: QueryGateway + ?Sized,
    {
        let submission = self.begin(question, document_reference)?;
        let outcome = gateway.forward(submission.request()).await;
        self.resolve(submission, outcome)
    }

    /// Submit whatever is currently in the input fields.
    pub async fn submit_pending<G>(&mut self, gateway: &G) -> Result<(), SessionError>
    where
        G: QueryGateway + ?Sized,
    {
        let question = self.pending_question.clone();
        let document_reference = self.document_reference.clone();
        self.submit(gateway, &question, &document_reference).await
    }

    fn set_status(&mut self, status: SessionStatus) {
        if self.status != status {
            self.status = status;
            self.notify(SessionEvent::StatusChanged(status));
        }
    }

    fn log_changed(&self) {
        self.notify(SessionEvent::LogChanged {
            len: self.log.len(),
            latest: self.log.last().cloned(),
        });
    }

    fn notify(&self, event: SessionEvent) {
        if let Some(tx) = &self.events {
            // A view that went away is not the session's problem.
            let _ = tx.send(event);
        }
    }
}

fn validate(question: &str, document_reference: &str) -> Result<(), ValidationError> {
    if question.trim().is_empty() {
        return Err(ValidationError::MissingQuestion);
    }
    if document_reference.trim().is_empty() {
        return Err(ValidationError::MissingDocument);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Origin;
    use reqwest::StatusCode;
    use serde_json::json;

    const DOC: &str = "https://x/policy.pdf";

    fn rejected() -> GatewayError {
        GatewayError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("Failed to process request".to_string()),
        }
    }

    fn placeholders(session: &Session) -> usize {
        session.log().iter().filter(|m| m.is_placeholder).count()
    }

    fn drain(rx: &mut UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn new_session_is_empty_and_ready() {
        let session = Session::new();
        assert!(session.log().is_empty());
        assert_eq!(session.status(), SessionStatus::Ready);
        assert!(!session.can_submit());
    }

    #[test]
    fn begin_appends_question_then_placeholder() {
        let mut session = Session::new();
        session.set_pending_question("What is the waiting period?");

        let submission = session.begin("What is the waiting period?", DOC).unwrap();

        assert_eq!(session.status(), SessionStatus::Streaming);
        assert!(session.controls_locked());
        assert_eq!(session.pending_question(), "");
        assert_eq!(session.document_reference(), DOC);
        assert_eq!(session.log().len(), 2);
        assert_eq!(session.log()[0], Message::user("What is the waiting period?"));
        assert!(session.log()[1].is_placeholder);
        assert_eq!(session.log()[1].origin, Origin::Assistant);
        assert_eq!(submission.placeholder_index(), 1);
        assert_eq!(
            submission.request(),
            &QueryRequest::single(DOC, "What is the waiting period?")
        );
    }

    #[test]
    fn blank_inputs_are_rejected_without_mutation() {
        let (mut session, mut rx) = Session::with_events();
        session.set_pending_question("   ");

        let err = session.begin("   ", DOC).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::MissingQuestion)
        ));

        let err = session.begin("question", " \t").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::MissingDocument)
        ));

        assert!(session.log().is_empty());
        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.pending_question(), "   ");
        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::Notice(Notice::warning(VALIDATION_NOTICE)),
                SessionEvent::Notice(Notice::warning(VALIDATION_NOTICE)),
            ]
        );
    }

    #[test]
    fn second_begin_while_streaming_is_refused() {
        let mut session = Session::new();
        let _first = session.begin("one", DOC).unwrap();

        let err = session.begin("two", DOC).unwrap_err();

        assert!(matches!(err, SessionError::SubmissionInFlight));
        assert_eq!(session.log().len(), 2);
        assert_eq!(placeholders(&session), 1);
    }

    #[test]
    fn success_replaces_placeholder_in_place() {
        let mut session = Session::new();
        let submission = session.begin("What is the waiting period?", DOC).unwrap();

        session
            .resolve(submission, Ok(json!({ "answers": ["12 months"] })))
            .unwrap();

        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.log().len(), 2);
        assert_eq!(session.log()[1], Message::assistant("12 months"));
        assert_eq!(placeholders(&session), 0);
    }

    #[test]
    fn failure_removes_placeholder_and_keeps_question() {
        let (mut session, mut rx) = Session::with_events();
        let submission = session.begin("q", DOC).unwrap();
        drain(&mut rx);

        let err = session.resolve(submission, Err(rejected())).unwrap_err();

        assert!(matches!(err, SessionError::Upstream(_)));
        assert_eq!(session.status(), SessionStatus::Error);
        assert_eq!(session.log(), &[Message::user("q")]);
        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::StatusChanged(SessionStatus::Error),
                SessionEvent::LogChanged {
                    len: 1,
                    latest: Some(Message::user("q")),
                },
                SessionEvent::Notice(Notice::error(FAILURE_NOTICE)),
            ]
        );
    }

    #[test]
    fn error_state_accepts_a_new_submission() {
        let mut session = Session::new();
        let first = session.begin("q1", DOC).unwrap();
        let _ = session.resolve(first, Err(rejected()));
        assert_eq!(session.status(), SessionStatus::Error);

        let second = session.begin("q2", DOC).unwrap();
        assert_eq!(session.status(), SessionStatus::Streaming);
        assert_eq!(second.placeholder_index(), 2);

        session
            .resolve(second, Ok(json!({ "output": "done" })))
            .unwrap();
        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(
            session.log(),
            &[
                Message::user("q1"),
                Message::user("q2"),
                Message::assistant("done"),
            ]
        );
    }

    #[test]
    fn resolving_without_outstanding_placeholder_is_refused() {
        let mut session = Session::new();
        let stale = Submission {
            request: QueryRequest::single(DOC, "q"),
            placeholder_index: 0,
        };

        let err = session.resolve(stale, Ok(json!({ "answers": ["x"] }))).unwrap_err();

        assert!(matches!(err, SessionError::NoSubmissionInFlight));
        assert!(session.log().is_empty());
        assert_eq!(session.status(), SessionStatus::Ready);
    }

    #[test]
    fn begin_emits_log_and_status_events_in_order() {
        let (mut session, mut rx) = Session::with_events();
        let _submission = session.begin("q", DOC).unwrap();

        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::LogChanged {
                    len: 1,
                    latest: Some(Message::user("q")),
                },
                SessionEvent::StatusChanged(SessionStatus::Streaming),
                SessionEvent::LogChanged {
                    len: 2,
                    latest: Some(Message::placeholder()),
                },
            ]
        );
    }

    #[test]
    fn document_reference_persists_across_submissions() {
        let mut session = Session::new();
        session.set_document_reference(DOC);
        session.set_pending_question("q");
        assert!(session.can_submit());

        let submission = session.begin("q", DOC).unwrap();
        assert!(!session.can_submit());
        session
            .resolve(submission, Ok(json!({ "answers": ["a"] })))
            .unwrap();

        assert_eq!(session.document_reference(), DOC);
        assert_eq!(session.pending_question(), "");
        assert!(!session.can_submit());
    }

    #[test]
    fn dropped_receiver_does_not_break_the_session() {
        let (mut session, rx) = Session::with_events();
        drop(rx);

        let submission = session.begin("q", DOC).unwrap();
        session
            .resolve(submission, Ok(json!({ "answers": ["a"] })))
            .unwrap();

        assert_eq!(session.status(), SessionStatus::Ready);
    }
}
