//! The bar: module registry, status output and event loop.
//!
//! ## Lifecycle
//!
//! ```text
//!   Idle ──run()──▶ Running ──stop signal / EOF──▶ Draining ──▶ Terminated
//! ```
//!
//! While running, every module gets its own task, and one more task reads
//! click events and routes them by identifier. Shutdown cancels all of them
//! cooperatively, gives `on_shutdown` hooks and stragglers a grace period,
//! then abandons whatever is left.
//!
//! ## Usage
//!
//! ```ignore
//! use swaystatus::{Bar, BarConfig};
//! use swaystatus::modules::builtin::Clock;
//!
//! let bar = Bar::stdout(BarConfig::default());
//! bar.register(Clock::default())?;
//! let stop = swaystatus::bar::stop_signal(bar.config().stop_signal)?;
//! bar.run(tokio::io::stdin(), stop).await?;
//! ```

mod dispatch;
mod lifecycle;
mod output;
mod shutdown;
mod status;
mod supervise;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use tokio::io::AsyncRead;
use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub use lifecycle::{LifecycleState, ShutdownReason};
pub use output::{Output, OutputMap};
pub use shutdown::stop_signal;
pub use status::{Sink, StatusBoard};

use crate::config::BarConfig;
use crate::error::{BarError, BarResult};
use crate::ident::{IdAllocator, ModuleId};
use crate::modules::{ArcModule, Module, ModuleHandle};
use crate::protocol::{encode_header, encode_stream_start, Header, Segment};
use dispatch::{dispatch_input, InputEnd};
use lifecycle::Lifecycle;
use status::lock;
use supervise::{contain, run_module};

/// A registered module together with its handle.
#[derive(Clone)]
pub(crate) struct Registered {
    pub(crate) module: ArcModule,
    pub(crate) handle: ModuleHandle,
}

/// Runtime context of one status bar.
pub struct Bar {
    id: ModuleId,
    config: BarConfig,
    board: Arc<StatusBoard>,
    modules: Mutex<Vec<Registered>>,
    allocator: Mutex<IdAllocator>,
    lifecycle: Lifecycle,
    cancel: CancellationToken,
}

impl Bar {
    /// Create a bar writing the protocol to `sink`.
    pub fn new(config: BarConfig, sink: Sink) -> Arc<Self> {
        Self::with_allocator(IdAllocator::new(config.id_len), config, sink)
    }

    /// Create a bar writing to stdout.
    pub fn stdout(config: BarConfig) -> Arc<Self> {
        Self::new(config, Box::new(std::io::stdout()))
    }

    /// Create a bar with an explicit identifier allocator.
    pub fn with_allocator(mut allocator: IdAllocator, config: BarConfig, sink: Sink) -> Arc<Self> {
        // Nothing is registered yet, so this cannot exhaust the space.
        let id = allocator
            .allocate(0, |_| false)
            .unwrap_or_else(|_| ModuleId::from("bar"));
        Arc::new(Self {
            id,
            config,
            board: Arc::new(StatusBoard::new(sink)),
            modules: Mutex::new(Vec::new()),
            allocator: Mutex::new(allocator),
            lifecycle: Lifecycle::new(),
            cancel: CancellationToken::new(),
        })
    }

    /// Identifier of this bar instance.
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.get()
    }

    /// Register a module. Modules render left to right in registration order.
    pub fn register<M: Module + 'static>(&self, module: M) -> BarResult<ModuleId> {
        self.register_arc(Arc::new(module))
    }

    /// Register a shared module.
    pub fn register_arc(&self, module: ArcModule) -> BarResult<ModuleId> {
        if self.state() != LifecycleState::Idle {
            return Err(BarError::AlreadyStarted);
        }

        let mut modules = lock(&self.modules);
        let id = lock(&self.allocator).allocate(modules.len() + 1, |candidate| {
            *candidate == self.id || modules.iter().any(|m| m.handle.id() == candidate)
        })?;

        let handle = ModuleHandle::new(
            id.clone(),
            module.name(),
            Arc::clone(&self.board),
            self.cancel.child_token(),
        );
        self.board.add_slot(id.clone());
        debug!(module = %handle.name(), %id, "registered module");
        modules.push(Registered { module, handle });
        Ok(id)
    }

    /// Identifiers of all registered modules, in registration order.
    pub fn module_ids(&self) -> Vec<ModuleId> {
        lock(&self.modules)
            .iter()
            .map(|m| m.handle.id().clone())
            .collect()
    }

    /// Handle bound to a registered module.
    pub fn handle(&self, id: &ModuleId) -> Option<ModuleHandle> {
        lock(&self.modules)
            .iter()
            .find(|m| m.handle.id() == id)
            .map(|m| m.handle.clone())
    }

    /// Current output of a module.
    pub fn output_of(&self, id: &ModuleId) -> Option<Output> {
        self.board.get(id)
    }

    /// Snapshot of the current status segments.
    pub fn segments(&self) -> Vec<Segment> {
        self.board.segments()
    }

    /// Encode the current status line.
    pub fn render(&self) -> BarResult<String> {
        self.board.render()
    }

    /// Render and flush the current status.
    pub fn print_status(&self) -> BarResult<()> {
        self.board.flush()
    }

    fn header(&self) -> Header {
        Header::new(
            self.config.click_events,
            self.config.stop_signal,
            self.config.cont_signal,
        )
    }

    /// Run the bar until `stop` resolves or `input` reaches end of stream.
    ///
    /// Writes the header and opens the status array, starts one task per
    /// module plus the click-event reader, then drains and returns why it
    /// stopped. A bar can only be run once.
    pub async fn run<R, S>(&self, input: R, stop: S) -> BarResult<ShutdownReason>
    where
        R: AsyncRead + Unpin + Send + 'static,
        S: Future<Output = ()> + Send,
    {
        if !self
            .lifecycle
            .advance(LifecycleState::Idle, LifecycleState::Running)
        {
            return Err(BarError::AlreadyStarted);
        }

        self.board.write(&encode_header(&self.header())?)?;
        self.board.write(&encode_stream_start())?;

        let modules = lock(&self.modules).clone();
        info!(bar = %self.id, modules = modules.len(), "bar running");

        let mut tasks = JoinSet::new();
        for entry in &modules {
            tasks.spawn(run_module(entry.clone()));
        }

        let (eof_tx, eof_rx) = oneshot::channel();
        let routes: HashMap<ModuleId, Registered> = modules
            .iter()
            .map(|m| (m.handle.id().clone(), m.clone()))
            .collect();
        let input_cancel = self.cancel.child_token();
        tasks.spawn(async move {
            if let InputEnd::EndOfInput = dispatch_input(input, &routes, &input_cancel).await {
                info!("click event stream closed");
                let _ = eof_tx.send(());
            }
        });

        let reason = tokio::select! {
            _ = stop => ShutdownReason::Signal,
            _ = eof_rx => ShutdownReason::EndOfInput,
        };

        self.drain(&modules, tasks, reason).await;
        Ok(reason)
    }

    async fn drain(&self, modules: &[Registered], mut tasks: JoinSet<()>, reason: ShutdownReason) {
        self.lifecycle
            .advance(LifecycleState::Running, LifecycleState::Draining);
        info!(?reason, "bar draining");

        let deadline = Instant::now() + self.config.shutdown_grace();
        self.cancel.cancel();

        let hooks = modules.iter().map(|entry| async move {
            let hook = contain(entry.module.on_shutdown(&entry.handle));
            match timeout_at(deadline, hook).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(module = %entry.handle.name(), error = %e, "shutdown hook failed"),
                Err(_) => warn!(module = %entry.handle.name(), "shutdown hook timed out"),
            }
        });
        join_all(hooks).await;

        let joined = timeout_at(deadline, async {
            while let Some(result) = tasks.join_next().await {
                if let Err(e) = result {
                    warn!(error = %e, "task ended abnormally");
                }
            }
        })
        .await;
        if joined.is_err() {
            warn!(remaining = tasks.len(), "abandoning tasks that ignored cancellation");
            tasks.abort_all();
        }

        self.board.clear();
        self.lifecycle
            .advance(LifecycleState::Draining, LifecycleState::Terminated);
    }
}
