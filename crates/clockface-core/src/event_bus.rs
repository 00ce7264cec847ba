use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use crate::modules;
use masterror::AppError;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BusEvent {
    Module(ModuleEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleEvent {
    Clock(modules::clock_display::Message),
}

#[derive(Debug)]
struct EventBusInner {
    queue: Mutex<VecDeque<BusEvent>>,
    capacity: usize,
    published: Notify,
}

impl EventBusInner {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity.get())),
            capacity: capacity.get(),
            published: Notify::new(),
        }
    }

    fn push(&self, event: BusEvent) -> Result<(), EventBusError> {
        let mut queue = self.queue.lock().map_err(|_| EventBusError::Poisoned)?;

        if queue.len() >= self.capacity {
            return Err(EventBusError::QueueFull {
                capacity: self.capacity,
            });
        }

        queue.push_back(event);
        drop(queue);

        self.published.notify_one();
        Ok(())
    }

    fn pop(&self) -> Result<Option<BusEvent>, EventBusError> {
        let mut queue = self.queue.lock().map_err(|_| EventBusError::Poisoned)?;
        Ok(queue.pop_front())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBusError {
    QueueFull { capacity: usize },
    Poisoned,
}

impl std::fmt::Display for EventBusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueueFull { capacity } => {
                write!(f, "Event queue is full (capacity: {})", capacity)
            }
            Self::Poisoned => write!(f, "Event queue state is poisoned"),
        }
    }
}

impl std::error::Error for EventBusError {}

impl From<EventBusError> for AppError {
    fn from(err: EventBusError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Bounded FIFO queue carrying updates from background tasks to the host loop.
#[derive(Debug, Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl EventBus {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(EventBusInner::new(capacity)),
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn publish(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }

    pub fn drain(&self) -> Result<Vec<BusEvent>, EventBusError> {
        let mut queue = self
            .inner
            .queue
            .lock()
            .map_err(|_| EventBusError::Poisoned)?;

        Ok(queue.drain(..).collect())
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    inner: Arc<EventBusInner>,
}

impl EventSender {
    pub fn try_send(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }
}

#[derive(Debug)]
pub struct EventReceiver {
    inner: Arc<EventBusInner>,
}

impl EventReceiver {
    pub fn try_recv(&mut self) -> Result<Option<BusEvent>, EventBusError> {
        self.inner.pop()
    }

    /// Wait for the next event.
    ///
    /// Cancel safe: an event is only removed from the queue when this returns.
    pub async fn recv(&mut self) -> Result<BusEvent, EventBusError> {
        loop {
            if let Some(event) = self.inner.pop()? {
                return Ok(event);
            }

            self.inner.published.notified().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::clock_display::Message;

    fn bus(capacity: usize) -> EventBus {
        EventBus::new(NonZeroUsize::new(capacity).expect("capacity"))
    }

    fn rendered(text: &str) -> BusEvent {
        BusEvent::Module(ModuleEvent::Clock(Message::Rendered(text.to_owned())))
    }

    #[test]
    fn events_are_received_in_order() {
        let bus = bus(4);
        let mut receiver = bus.receiver();

        bus.publish(rendered("first")).expect("publish");
        bus.sender().try_send(rendered("second")).expect("send");

        assert_eq!(receiver.try_recv().expect("recv"), Some(rendered("first")));
        assert_eq!(receiver.try_recv().expect("recv"), Some(rendered("second")));
        assert_eq!(receiver.try_recv().expect("recv"), None);
    }

    #[test]
    fn full_queue_rejects_events() {
        let bus = bus(1);

        bus.publish(rendered("a")).expect("publish");
        let error = bus.publish(rendered("b")).expect_err("queue full");

        assert_eq!(error, EventBusError::QueueFull { capacity: 1 });
        assert_eq!(error.to_string(), "Event queue is full (capacity: 1)");
    }

    #[test]
    fn identical_events_are_all_delivered() {
        let bus = bus(4);

        bus.publish(rendered("tick")).expect("publish");
        bus.publish(rendered("tick")).expect("publish");

        assert_eq!(
            bus.drain().expect("drain"),
            vec![rendered("tick"), rendered("tick")]
        );
    }

    #[tokio::test]
    async fn recv_returns_queued_events_without_waiting() {
        let bus = bus(4);
        let mut receiver = bus.receiver();

        bus.publish(rendered("first")).expect("publish");
        bus.publish(rendered("second")).expect("publish");

        assert_eq!(receiver.recv().await.expect("recv"), rendered("first"));
        assert_eq!(receiver.recv().await.expect("recv"), rendered("second"));
    }

    #[tokio::test]
    async fn recv_wakes_when_a_task_publishes() {
        let bus = bus(4);
        let mut receiver = bus.receiver();
        let sender = bus.sender();

        let publisher = tokio::spawn(async move {
            tokio::task::yield_now().await;
            sender.try_send(rendered("late")).expect("send");
        });

        assert_eq!(receiver.recv().await.expect("recv"), rendered("late"));
        publisher.await.expect("publisher task");
    }
}
