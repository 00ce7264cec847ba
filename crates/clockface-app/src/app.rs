use std::{future::Future, io, num::NonZeroUsize, sync::Arc};

use clockface_core::{
    ModuleContext,
    adapters::{TerminalMode, TerminalSurface},
    config::ClockConfig,
    event_bus::{BusEvent, EventBus, EventBusError, EventReceiver, ModuleEvent},
    host::ready_channel,
    modules::clock_display::{ClockDisplay, Message, RefreshOutcome},
};
use log::{debug, error, info};
use masterror::AppError;
use tokio::runtime::Handle;

const BUS_CAPACITY: NonZeroUsize = NonZeroUsize::new(64).expect("non-zero capacity");

/// Terminal host for the clock display.
pub(crate) struct App {
    config: ClockConfig,
    surface: Arc<TerminalSurface>,
    bus: EventBus,
    receiver: EventReceiver,
    last_rendered: Option<String>,
}

impl App {
    pub(crate) fn new(config: ClockConfig, surface: Arc<TerminalSurface>) -> Self {
        let bus = EventBus::new(BUS_CAPACITY);
        let receiver = bus.receiver();

        Self {
            config,
            surface,
            bus,
            receiver,
            last_rendered: None,
        }
    }

    pub(crate) fn stdout(config: ClockConfig) -> Self {
        let surface = Arc::new(TerminalSurface::stdout(
            config.target.as_str(),
            TerminalMode::Inline,
        ));

        Self::new(config, surface)
    }

    /// Write the current time once as a plain line.
    pub(crate) fn print_once(config: &ClockConfig) -> Result<(), AppError> {
        let surface = Arc::new(TerminalSurface::stdout(
            config.target.as_str(),
            TerminalMode::Lines,
        ));

        match ClockDisplay::with_system_ports(config, surface).initialize() {
            RefreshOutcome::Written(_) => Ok(()),
            RefreshOutcome::TargetMissing | RefreshOutcome::Failed => {
                Err(AppError::internal("failed to write the clock text"))
            }
        }
    }

    /// Keep the clock ticking until Ctrl-C.
    pub(crate) async fn run(mut self) -> Result<(), AppError> {
        self.run_until(tokio::signal::ctrl_c()).await
    }

    async fn run_until<F>(&mut self, shutdown: F) -> Result<(), AppError>
    where
        F: Future<Output = io::Result<()>>,
    {
        let ctx = ModuleContext::new(self.bus.sender(), Handle::current());
        let display = Arc::new(
            ClockDisplay::with_system_ports(&self.config, self.surface.clone())
                .with_context(&ctx),
        );

        let (notifier, ready) = ready_channel();
        let ticker = display.launch_on_ready(ready, &ctx);
        notifier.notify();

        info!(
            "Clock display attached to `{}`, refreshing every {:?}",
            display.target(),
            display.interval()
        );

        // created once so a signal arriving mid-event is not lost
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                signal = &mut shutdown => {
                    if let Err(err) = signal {
                        error!("Failed to listen for Ctrl-C: {err}");
                    }
                    break;
                }
                event = self.receiver.recv() => {
                    self.handle(event?);
                }
            }
        }

        info!("Shutting down clock display");
        ticker.stop();
        self.drain_events()?;

        if let Some(text) = &self.last_rendered {
            info!("Last displayed text: {text}");
        }

        self.surface
            .finish()
            .map_err(|err| AppError::internal(format!("failed to finish terminal output: {err}")))
    }

    fn drain_events(&mut self) -> Result<(), EventBusError> {
        while let Some(event) = self.receiver.try_recv()? {
            self.handle(event);
        }

        Ok(())
    }

    fn handle(&mut self, event: BusEvent) {
        match event {
            BusEvent::Module(ModuleEvent::Clock(Message::Rendered(text))) => {
                self.last_rendered = Some(text);
            }
            BusEvent::Module(ModuleEvent::Clock(Message::TargetMissing(target))) => {
                debug!("Display target `{target}` reported missing");
            }
            other => {
                debug!("Ignoring event {other:?}");
            }
        }
    }
}
