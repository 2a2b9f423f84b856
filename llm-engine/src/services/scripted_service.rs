//! Scripted generation backend for tests and offline runs.
//!
//! Replies are served from a FIFO script; the final reply repeats once the
//! script is exhausted. Clones share the same script and invocation counter,
//! so a caller can keep a handle for assertions after handing the service to
//! the engine.

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use tracing::debug;

use crate::error_handler::{ProviderError, Result};

/// In-process backend with canned completions and a call counter.
#[derive(Debug, Clone, Default)]
pub struct ScriptedService {
    replies: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedService {
    /// Creates a service with an empty script. Every `generate` call fails
    /// with an empty-completion error until a reply is pushed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service that serves `replies` in order.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue: VecDeque<String> = replies.into_iter().map(Into::into).collect();
        Self {
            replies: Arc::new(Mutex::new(queue)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Appends a reply to the script.
    pub fn push_reply(&self, reply: impl Into<String>) {
        let mut queue = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        queue.push_back(reply.into());
    }

    /// Number of `generate` invocations observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Serves the next scripted reply.
    ///
    /// The final reply is retained and repeats on every later call, so a
    /// one-reply script behaves like a fixed-output engine.
    ///
    /// # Errors
    /// [`ProviderError::EmptyCompletion`] when the script is empty.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        let mut queue = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        let reply = reply.ok_or(ProviderError::EmptyCompletion)?;

        debug!(
            call,
            prompt_len = prompt.len(),
            reply_len = reply.len(),
            "scripted completion served"
        );

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::LlmEngineError;

    #[tokio::test]
    async fn serves_replies_in_order_and_repeats_last() {
        let svc = ScriptedService::with_replies(["one", "two"]);

        assert_eq!(svc.generate("p").await.unwrap(), "one");
        assert_eq!(svc.generate("p").await.unwrap(), "two");
        assert_eq!(svc.generate("p").await.unwrap(), "two");
    }

    #[tokio::test]
    async fn counts_invocations_across_clones() {
        let svc = ScriptedService::with_replies(["out"]);
        let handle = svc.clone();

        svc.generate("a").await.unwrap();
        svc.generate("b").await.unwrap();

        assert_eq!(handle.calls(), 2);
    }

    #[tokio::test]
    async fn empty_script_is_an_empty_completion() {
        let svc = ScriptedService::new();
        let err = svc.generate("p").await.unwrap_err();
        assert!(matches!(
            err,
            LlmEngineError::Provider(ProviderError::EmptyCompletion)
        ));

        svc.push_reply("late");
        assert_eq!(svc.generate("p").await.unwrap(), "late");
    }
}
