//! Scripted listing source.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::Listing;
use crate::error::{Error, Result};
use crate::port::ListingSource;

#[derive(Debug, Clone)]
enum Step {
    Listings(Vec<Listing>),
    Fail(String),
}

impl Step {
    fn into_result(self) -> Result<Vec<Listing>> {
        match self {
            Self::Listings(listings) => Ok(listings),
            Self::Fail(message) => Err(Error::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                message,
            ))),
        }
    }
}

/// A source that replays a script of responses, one per `fetch`.
///
/// When the script is exhausted it repeats the `repeat_*` step if one was
/// set, otherwise it returns an empty result.
pub struct ScriptedSource {
    name: String,
    steps: Mutex<VecDeque<Step>>,
    repeat: Option<Step>,
    fetch_count: Arc<AtomicU32>,
}

impl ScriptedSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Mutex::new(VecDeque::new()),
            repeat: None,
            fetch_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Queue a successful fetch.
    pub fn then_listings(self, listings: Vec<Listing>) -> Self {
        self.steps.lock().push_back(Step::Listings(listings));
        self
    }

    /// Queue a failed fetch.
    pub fn then_error(self, message: &str) -> Self {
        self.steps.lock().push_back(Step::Fail(message.to_string()));
        self
    }

    /// Return these listings once the script is exhausted.
    pub fn repeat_listings(mut self, listings: Vec<Listing>) -> Self {
        self.repeat = Some(Step::Listings(listings));
        self
    }

    /// Fail every fetch once the script is exhausted.
    pub fn repeat_error(mut self, message: &str) -> Self {
        self.repeat = Some(Step::Fail(message.to_string()));
        self
    }

    /// Shared counter of `fetch` calls.
    pub fn fetch_count(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.fetch_count)
    }
}

#[async_trait]
impl ListingSource for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Listing>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().pop_front().or_else(|| self.repeat.clone());
        match step {
            Some(step) => step.into_result(),
            None => Ok(Vec::new()),
        }
    }
}

/// A source whose `fetch` panics, the way an out-of-bounds parser would.
pub struct PanickingSource {
    name: String,
}

impl PanickingSource {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl ListingSource for PanickingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Listing>> {
        panic!("index out of bounds: the len is 3 but the index is 3");
    }
}
