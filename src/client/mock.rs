use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{GenerativeClient, ImagePrompt, Message};

/// What a scripted call should produce.
#[derive(Debug, Clone)]
pub enum MockReply {
    Payload(String),
    Empty,
    Fault(String),
}

/// A call the mock received, recorded verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Text(String),
    Image(ImagePrompt),
    Conversation(Vec<Message>),
}

/// A scripted client for tests. Returns pre-defined replies in order and
/// records every call it receives.
pub struct MockClient {
    replies: Vec<MockReply>,
    repeat: bool,
    index: AtomicUsize,
    calls: Mutex<Vec<MockCall>>,
}

impl MockClient {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies,
            repeat: false,
            index: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A client that gives the same reply to every call.
    pub fn always(reply: MockReply) -> Self {
        Self {
            repeat: true,
            ..Self::new(vec![reply])
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, call: MockCall) -> Result<Option<String>> {
        self.calls.lock().unwrap().push(call);
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let next = if self.repeat {
            self.replies.last()
        } else {
            self.replies.get(i)
        };
        let reply = next
            .ok_or_else(|| anyhow::anyhow!("MockClient: no more replies (called {} times)", i + 1))?;

        match reply {
            MockReply::Payload(text) => Ok(Some(text.clone())),
            MockReply::Empty => Ok(None),
            MockReply::Fault(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}

#[async_trait]
impl GenerativeClient for MockClient {
    async fn submit_text(&self, text: &str) -> Result<Option<String>> {
        self.respond(MockCall::Text(text.to_string()))
    }

    async fn submit_image(&self, prompt: &ImagePrompt) -> Result<Option<String>> {
        self.respond(MockCall::Image(prompt.clone()))
    }

    async fn submit_conversation(&self, turns: &[Message]) -> Result<Option<String>> {
        self.respond(MockCall::Conversation(turns.to_vec()))
    }
}
