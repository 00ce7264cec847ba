#![cfg(test)]

use std::io::{self, Write};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use clockface_proto::ports::{
    DateTimeFormatter, DisplayError, DisplaySurface, FormatError, WallClock,
};

use crate::adapters::ChronoFormatter;

pub(crate) fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid timestamp")
}

/// Wall clock that only moves when told to.
#[derive(Debug)]
pub(crate) struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub(crate) fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(crate) fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("poisoned clock lock");
        *now += delta;
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("poisoned clock lock")
    }
}

/// Default formatter that records how often it was invoked.
#[derive(Debug, Default)]
pub(crate) struct CountingFormatter {
    inner: ChronoFormatter,
    calls: AtomicUsize,
}

impl CountingFormatter {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DateTimeFormatter for CountingFormatter {
    fn format(&self, at: &NaiveDateTime) -> Result<String, FormatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.format(at)
    }
}

/// Surface whose every write fails with an I/O error.
#[derive(Debug, Default)]
pub(crate) struct FailingSurface;

impl DisplaySurface for FailingSurface {
    fn set_text(&self, id: &str, _text: &str) -> Result<(), DisplayError> {
        Err(DisplayError::Write {
            id: id.to_owned(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "surface closed"),
        })
    }
}

/// Cloneable in-memory writer for inspecting terminal output.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        let bytes = self.0.lock().expect("poisoned buffer lock");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("poisoned buffer lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that rejects everything.
#[derive(Debug)]
pub(crate) struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
