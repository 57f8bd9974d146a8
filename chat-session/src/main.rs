//! Terminal chat view over a [`Session`].
//!
//! `/doc <uri>` sets the document, `/quit` leaves, any other line is asked
//! as a question.

use anyhow::Context;
use chat_session::config::ChatConfig;
use chat_session::{HttpGateway, NoticeLevel, Origin, Session, SessionEvent};
use service_core::observability::init_tracing;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

const PLACEHOLDER_TEXT: &str = "AI is analyzing the document...";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Document(String),
    Quit,
    Ask(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed == "/quit" {
            Command::Quit
        } else if trimmed == "/doc" {
            Command::Document(String::new())
        } else if let Some(rest) = trimmed.strip_prefix("/doc ") {
            Command::Document(rest.trim().to_string())
        } else {
            Command::Ask(line.to_string())
        }
    }
}

async fn render(mut events: UnboundedReceiver<SessionEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::LogChanged {
                latest: Some(message),
                ..
            } if message.origin == Origin::Assistant => {
                if message.is_placeholder {
                    println!("ai> {}", PLACEHOLDER_TEXT);
                } else {
                    println!("ai> {}\n", message.content);
                }
            }
            SessionEvent::Notice(notice) => match notice.level {
                NoticeLevel::Warning => eprintln!("[warning] {}", notice.text),
                NoticeLevel::Error => eprintln!("[error] {}", notice.text),
            },
            SessionEvent::StatusChanged(status) => {
                tracing::debug!(?status, "Session status changed");
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ChatConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("doc-chat", &config.log_level, None);

    let gateway = HttpGateway::new(config.gateway_url.clone());
    let (mut session, events) = Session::with_events();
    if let Some(document) = &config.document {
        session.set_document_reference(document.clone());
    }

    let renderer = tokio::spawn(render(events));

    println!("Provide a document URL and ask questions about it!");
    println!("Commands: /doc <url>, /quit");
    if !session.document_reference().is_empty() {
        println!("Document: {}", session.document_reference());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Document(document) => {
                session.set_document_reference(document);
                println!("Document: {}", session.document_reference());
            }
            Command::Ask(question) => {
                session.set_pending_question(question);
                if let Err(e) = session.submit_pending(&gateway).await {
                    tracing::debug!(error = %e, "Submission did not complete");
                }
            }
        }
    }

    // Dropping the session closes the event channel and ends the renderer.
    drop(session);
    renderer.await.context("renderer task panicked")?;

    Ok(())
}
