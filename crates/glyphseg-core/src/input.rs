#![forbid(unsafe_code)]

//! Batched terminal input with an optional zero-wait mode.
//!
//! [`EventSource::read_events`] waits up to a timeout for the first event
//! and then drains whatever is already queued. The non-blocking variant is
//! the same call with a zero timeout.

use std::io;
use std::time::Duration;

/// A source of input events.
pub trait EventSource {
    type Event;

    /// Wait up to `timeout` for an event, then append up to `max` events to
    /// `out` without waiting further. `None` waits indefinitely.
    ///
    /// Returns the number of events appended.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying input device.
    fn read_events(
        &mut self,
        timeout: Option<Duration>,
        out: &mut Vec<Self::Event>,
        max: usize,
    ) -> io::Result<usize>;

    /// Like [`read_events`](Self::read_events) but returns immediately when
    /// nothing is queued.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying input device.
    fn read_events_nonblocking(
        &mut self,
        out: &mut Vec<Self::Event>,
        max: usize,
    ) -> io::Result<usize> {
        self.read_events(Some(Duration::ZERO), out, max)
    }
}

/// Terminal input via `crossterm`.
///
/// The terminal should already be in raw mode; this type only reads.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalEvents;

#[cfg(not(target_arch = "wasm32"))]
impl EventSource for TerminalEvents {
    type Event = crossterm::event::Event;

    fn read_events(
        &mut self,
        timeout: Option<Duration>,
        out: &mut Vec<Self::Event>,
        max: usize,
    ) -> io::Result<usize> {
        if max == 0 {
            return Ok(0);
        }
        if let Some(timeout) = timeout
            && !crossterm::event::poll(timeout)?
        {
            return Ok(0);
        }
        out.push(crossterm::event::read()?);
        let mut read = 1;
        while read < max && crossterm::event::poll(Duration::ZERO)? {
            out.push(crossterm::event::read()?);
            read += 1;
        }
        Ok(read)
    }
}
