//! Client-side conversation state for asking questions about one document.
//!
//! [`Session`] owns the message log and the submission status and drives the
//! optimistic append / placeholder / resolve-or-rollback protocol around each
//! question. The network hop sits behind [`QueryGateway`].

pub mod answer;
pub mod config;
pub mod error;
pub mod events;
pub mod gateway;
pub mod message;
pub mod session;

pub use answer::{format_answer, AnswerShape};
pub use error::{GatewayError, SessionError, ValidationError};
pub use events::{Notice, NoticeLevel, SessionEvent};
pub use gateway::{HttpGateway, QueryGateway};
pub use message::{Message, Origin};
pub use session::{Session, SessionStatus, Submission};
