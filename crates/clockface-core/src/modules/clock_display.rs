//! Keeps one display element showing the current local date and time.
//!
//! Startup is split in two: [`ClockDisplay::initialize`] writes the text once,
//! synchronously, and [`ClockDisplay::start`] schedules the periodic refresh and
//! hands back a [`TickerHandle`] that owns it. [`ClockDisplay::launch`] runs
//! both; [`ClockDisplay::launch_on_ready`] defers both until the host signals
//! readiness.

mod ticker;

use std::fmt;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use clockface_proto::{
    config::{ClockConfig, MissingTargetPolicy},
    ports::{DateTimeFormatter, DisplaySurface, WallClock},
};
use log::{debug, error, info, warn};
use tokio::time::{Instant, MissedTickBehavior, interval_at};

pub use ticker::TickerHandle;

use crate::{
    ModuleContext, ModuleEventSender,
    adapters::{ChronoFormatter, SystemClock},
    event_bus::ModuleEvent,
    host::ReadySignal,
};

// tokio refuses zero-length intervals
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Messages published on the event bus after a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The target element now shows this text.
    Rendered(String),
    /// The target element went missing.
    TargetMissing(Arc<str>),
}

/// What a single refresh did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Written(String),
    TargetMissing,
    Failed,
}

impl RefreshOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Written(text) => Some(text),
            Self::TargetMissing | Self::Failed => None,
        }
    }
}

/// The clock display updater.
pub struct ClockDisplay {
    target:         Arc<str>,
    interval:       Duration,
    policy:         MissingTargetPolicy,
    clock:          Arc<dyn WallClock>,
    formatter:      Arc<dyn DateTimeFormatter>,
    surface:        Arc<dyn DisplaySurface>,
    sender:         Option<ModuleEventSender<Message>>,
    target_missing: AtomicBool,
}

impl ClockDisplay {
    pub fn new(
        config: &ClockConfig,
        clock: Arc<dyn WallClock>,
        formatter: Arc<dyn DateTimeFormatter>,
        surface: Arc<dyn DisplaySurface>,
    ) -> Self {
        Self {
            target: Arc::from(config.target.as_str()),
            interval: config.refresh_interval().max(MIN_INTERVAL),
            policy: config.on_missing_target,
            clock,
            formatter,
            surface,
            sender: None,
            target_missing: AtomicBool::new(false),
        }
    }

    /// Updater reading the system clock and formatting per `config`.
    pub fn with_system_ports(config: &ClockConfig, surface: Arc<dyn DisplaySurface>) -> Self {
        Self::new(
            config,
            Arc::new(SystemClock),
            Arc::new(ChronoFormatter::from_config(config)),
            surface,
        )
    }

    /// Publish a [`Message`] on the context's bus after every refresh.
    pub fn with_context(mut self, ctx: &ModuleContext) -> Self {
        self.sender = Some(ctx.module_sender(ModuleEvent::Clock));
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Read the clock, format it and write the text into the target element.
    ///
    /// Never fails: a missing element, an unrenderable pattern or a broken
    /// surface is reported through the returned outcome and the next refresh
    /// proceeds as usual. The element keeps its previous text unless the
    /// outcome is [`RefreshOutcome::Written`].
    pub fn refresh(&self) -> RefreshOutcome {
        let now = self.clock.now();
        let text = match self.formatter.format(&now) {
            Ok(text) => text,
            Err(err) => {
                error!("Failed to render clock text: {err}");
                return RefreshOutcome::Failed;
            }
        };

        match self.surface.set_text(&self.target, &text) {
            Ok(()) => {
                if self.target_missing.swap(false, Ordering::Relaxed)
                    && self.policy == MissingTargetPolicy::Warn
                {
                    info!("Display element `{}` is available again", self.target);
                }

                debug!("Clock display updated: {text}");
                self.publish(Message::Rendered(text.clone()));
                RefreshOutcome::Written(text)
            }
            Err(err) if err.is_not_found() => {
                let newly_missing = !self.target_missing.swap(true, Ordering::Relaxed);

                if newly_missing && self.policy == MissingTargetPolicy::Warn {
                    warn!("Display element `{}` is missing; clock text dropped", self.target);
                    self.publish(Message::TargetMissing(Arc::clone(&self.target)));
                }

                RefreshOutcome::TargetMissing
            }
            Err(err) => {
                error!("Failed to update clock display: {err}");
                RefreshOutcome::Failed
            }
        }
    }

    /// First startup phase: one immediate refresh.
    pub fn initialize(&self) -> RefreshOutcome {
        info!("Clock display loaded");
        self.refresh()
    }

    /// Second startup phase: refresh every interval until the handle stops.
    ///
    /// The first scheduled refresh happens one full interval after this call.
    pub fn start(self: &Arc<Self>, ctx: &ModuleContext) -> TickerHandle {
        self.spawn_ticker(ctx, None)
    }

    /// [`Self::initialize`] followed by [`Self::start`].
    pub fn launch(self: &Arc<Self>, ctx: &ModuleContext) -> TickerHandle {
        self.initialize();
        self.start(ctx)
    }

    /// Like [`Self::launch`], but only once `ready` resolves.
    pub fn launch_on_ready(
        self: &Arc<Self>,
        ready: ReadySignal,
        ctx: &ModuleContext,
    ) -> TickerHandle {
        self.spawn_ticker(ctx, Some(ready))
    }

    fn spawn_ticker(
        self: &Arc<Self>,
        ctx: &ModuleContext,
        ready: Option<ReadySignal>,
    ) -> TickerHandle {
        let display = Arc::clone(self);
        let period = self.interval;

        let task = ctx.runtime_handle().spawn(async move {
            if let Some(ready) = ready {
                ready.wait().await;
                display.initialize();
            }

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                display.refresh();
            }
        });

        TickerHandle::new(task)
    }

    fn publish(&self, message: Message) {
        if let Some(sender) = &self.sender
            && let Err(err) = sender.try_send(message)
        {
            error!("Failed to publish clock update: {err}");
        }
    }
}

impl fmt::Debug for ClockDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockDisplay")
            .field("target", &self.target)
            .field("interval", &self.interval)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
