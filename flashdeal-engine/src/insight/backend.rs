//! Capability seam between the assistant and whatever answers its requests.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use super::types::InsightError;
use super::wire::{GenerateRequest, GenerateResponse};

/// A remote (or scripted) generative model.
///
/// Futures are not `Send`: the browser event loop and the tester's
/// current-thread runtime are the only hosts.
#[async_trait(?Send)]
pub trait InsightBackend {
    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, InsightError>;
}

#[async_trait(?Send)]
impl<B: InsightBackend + ?Sized> InsightBackend for Box<B> {
    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, InsightError> {
        (**self).generate_content(request).await
    }
}

#[async_trait(?Send)]
impl<B: InsightBackend + ?Sized> InsightBackend for Rc<B> {
    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, InsightError> {
        (**self).generate_content(request).await
    }
}

/// Stand-in used when no API key was provisioned.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredBackend;

#[async_trait(?Send)]
impl InsightBackend for UnconfiguredBackend {
    async fn generate_content(
        &self,
        _request: GenerateRequest,
    ) -> Result<GenerateResponse, InsightError> {
        Err(InsightError::MissingApiKey)
    }
}

/// Replays queued replies in order and records every request it receives.
///
/// Once the script runs dry every call fails with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: RefCell<VecDeque<Result<GenerateResponse, InsightError>>>,
    requests: RefCell<Vec<GenerateRequest>>,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn replying(reply: Result<GenerateResponse, InsightError>) -> Self {
        let backend = Self::new();
        backend.push(reply);
        backend
    }

    pub fn push(&self, reply: Result<GenerateResponse, InsightError>) {
        self.replies.borrow_mut().push_back(reply);
    }

    #[must_use]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.borrow().clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl InsightBackend for ScriptedBackend {
    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, InsightError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(InsightError::Transport("script exhausted".to_string())))
    }
}
