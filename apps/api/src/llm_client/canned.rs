//! Scripted `TextGenerator` for tests: records prompts and replays replies.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, TextGenerator};

#[derive(Default)]
pub struct CannedGenerator {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl CannedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: &str) {
        self.replies
            .lock()
            .expect("generator lock poisoned")
            .push_back(Ok(reply.to_string()));
    }

    /// Queues an API failure with the given HTTP status.
    pub fn push_failure(&self, status: u16) {
        self.replies
            .lock()
            .expect("generator lock poisoned")
            .push_back(Err(status));
    }

    /// (system, prompt) pairs seen so far.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().expect("generator lock poisoned").clone()
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .expect("generator lock poisoned")
            .push((system.to_string(), prompt.to_string()));
        match self.replies.lock().expect("generator lock poisoned").pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(LlmError::Api {
                status,
                message: "scripted failure".to_string(),
            }),
            None => Err(LlmError::EmptyContent),
        }
    }
}
