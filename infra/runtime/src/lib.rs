//! # Runtime
//!
//! Named [Tokio](https://tokio.rs) runtime profiles used by the workspace binaries.
//!
//! ## Profiles
//! * **Event loop**: single-threaded scheduler. The shell is cooperative and
//!   event driven, so it runs all tasks on one thread.
//! * **Default**: multi-threaded scheduler sized from the host.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[artis_runtime::main(event_loop)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use artis_derive::main;

use anyhow::anyhow;
use std::{sync::OnceLock, thread::available_parallelism, time::Duration};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

const DEFAULT_WORKER_THREADS: usize = 4;
const MAX_WORKER_THREADS: usize = 1024;
/// 2 `MiB`.
const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;
const MIN_STACK_SIZE: usize = 1024 * 1024;
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
const DEFAULT_THREAD_NAME: &str = "artis-worker";

static WORKER_THREADS: OnceLock<usize> = OnceLock::new();

/// `TOKIO_WORKER_THREADS` when set and sane, otherwise the host parallelism.
fn detected_worker_threads() -> usize {
    *WORKER_THREADS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| (1..=MAX_WORKER_THREADS).contains(&n))
            .unwrap_or_else(|| {
                available_parallelism().map(std::num::NonZero::get).unwrap_or(DEFAULT_WORKER_THREADS)
            })
    })
}

/// Scheduler flavor of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Every task runs on the thread that calls `block_on`.
    CurrentThread,
    /// Work-stealing pool of worker threads.
    MultiThread,
}

/// A named runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeProfile {
    pub flavor: Flavor,
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeProfile {
    fn default() -> Self {
        Self {
            flavor: Flavor::MultiThread,
            worker_threads: detected_worker_threads(),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: Duration::from_secs(60),
        }
    }
}

impl RuntimeProfile {
    /// Single-threaded profile for the shell event loop.
    #[must_use]
    pub fn event_loop() -> Self {
        Self {
            flavor: Flavor::CurrentThread,
            worker_threads: 1,
            thread_name: "artis-ui".to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKER_THREADS);
        self
    }

    #[must_use]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name = if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }
}

/// Builds a runtime from a profile with I/O and timers enabled.
///
/// # Errors
/// Returns an error when the OS refuses to create the runtime threads.
pub fn build_runtime(profile: &RuntimeProfile) -> Result<Runtime> {
    let profile = profile
        .clone()
        .with_worker_threads(profile.worker_threads)
        .with_stack_size(profile.stack_size)
        .with_thread_name(profile.thread_name.clone());
    debug!(?profile, "Building tokio runtime");

    let mut builder = match profile.flavor {
        Flavor::CurrentThread => Builder::new_current_thread(),
        Flavor::MultiThread => {
            let mut builder = Builder::new_multi_thread();
            builder.worker_threads(profile.worker_threads);
            builder
        },
    };

    builder
        .thread_name(&profile.thread_name)
        .thread_stack_size(profile.stack_size)
        .thread_keep_alive(profile.thread_keep_alive)
        .enable_all()
        .build()
        .map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}
