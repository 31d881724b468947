//! Runs a conversion off the calling thread and publishes its progress.
//!
//! `convert` is synchronous. An interactive shell owns one `ConversionJob`,
//! starts conversions through it, and observes the state signal either by
//! polling `state()` or through a channel passed to `with_notifier`. Every
//! started job ends in `Done` or `Failed`.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use crate::converter::{convert_with, ConvertOptions};
use crate::error::{ConvertError, Result};
use crate::models::ConversionResult;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConversionState {
    #[default]
    Idle,
    Running,
    Done(ConversionResult),
    Failed(String),
}

impl ConversionState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Failed(_))
    }
}

#[derive(Clone)]
struct Signal {
    state: Arc<Mutex<ConversionState>>,
    notifier: Option<Sender<ConversionState>>,
}

impl Signal {
    fn lock(&self) -> MutexGuard<'_, ConversionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, next: ConversionState) {
        *self.lock() = next.clone();
        if let Some(tx) = &self.notifier {
            // a dropped receiver only means nobody is watching
            let _ = tx.send(next);
        }
    }
}

pub struct ConversionJob {
    signal: Signal,
    worker: Option<JoinHandle<()>>,
}

impl Default for ConversionJob {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionJob {
    pub fn new() -> Self {
        Self {
            signal: Signal {
                state: Arc::new(Mutex::new(ConversionState::Idle)),
                notifier: None,
            },
            worker: None,
        }
    }

    /// Every state change is also sent on `tx`.
    pub fn with_notifier(tx: Sender<ConversionState>) -> Self {
        let mut job = Self::new();
        job.signal.notifier = Some(tx);
        job
    }

    pub fn state(&self) -> ConversionState {
        self.signal.lock().clone()
    }

    /// Start a conversion on a worker thread. Refused while one is running.
    pub fn start(&mut self, source: PathBuf, destination: PathBuf, options: ConvertOptions) -> Result<()> {
        {
            let mut state = self.signal.lock();
            if *state == ConversionState::Running {
                return Err(ConvertError::Busy);
            }
            *state = ConversionState::Running;
        }
        if let Some(previous) = self.worker.take() {
            let _ = previous.join();
        }
        if let Some(tx) = &self.signal.notifier {
            let _ = tx.send(ConversionState::Running);
        }
        info!(source = %source.display(), "conversion started");

        let signal = self.signal.clone();
        self.worker = Some(thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                convert_with(&source, &destination, &options)
            }));
            let next = match outcome {
                Ok(Ok(result)) => ConversionState::Done(result),
                Ok(Err(e)) => {
                    warn!("conversion failed: {e}");
                    ConversionState::Failed(e.to_string())
                }
                Err(_) => ConversionState::Failed("conversion worker panicked".to_string()),
            };
            signal.publish(next);
        }));
        Ok(())
    }

    /// Block until the current worker finishes and return the final state.
    pub fn wait(&mut self) -> ConversionState {
        if let Some(worker) = self.worker.take() {
            // the worker publishes its own outcome, panics included
            let _ = worker.join();
        }
        self.state()
    }
}
