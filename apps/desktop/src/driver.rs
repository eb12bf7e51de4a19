use std::io::Write;

use anyhow::Result;
use client_core::{
    screens::payment::PaymentReceipt, BookingApp, Frame, ManualClock, NavigationOutcome,
    PhaseChange, Settings,
};
use serde::Serialize;
use tracing::debug;

/// Upper bound on ticks spent waiting for one settle.
const MAX_SETTLE_TICKS: u32 = 10_000;

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Event {
    Phase {
        #[serde(rename = "atMs")]
        at_ms: u128,
        #[serde(flatten)]
        change: PhaseChange,
    },
    Navigation(NavigationOutcome),
    Dispatched { kind: String, changed: bool },
    Scrolled { px: f32, scrolled: bool },
    Rejected { step: String, error: String },
    Payment(PaymentReceipt),
    Frame(Box<Frame>),
}

/// Owns the app on a virtual clock and writes every event as one JSON line.
pub struct Driver<W: Write> {
    pub app: BookingApp<ManualClock>,
    clock: ManualClock,
    frame_ms: u64,
    out: W,
}

impl<W: Write> Driver<W> {
    pub fn new(settings: Settings, clock: ManualClock, frame_ms: u64, out: W) -> Self {
        Self {
            app: BookingApp::new(settings, clock.clone()),
            clock,
            frame_ms: frame_ms.max(1),
            out,
        }
    }

    pub fn emit(&mut self, event: &Event) -> Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Emits queued changes, then advances one frame at a time until every
    /// primitive is settled.
    pub fn settle(&mut self) -> Result<()> {
        self.flush()?;
        let mut ticks = 0;
        while !self.app.is_settled() && ticks < MAX_SETTLE_TICKS {
            self.clock.advance_ms(self.frame_ms);
            self.flush()?;
            ticks += 1;
        }
        debug!(ticks, elapsed_ms = self.clock.elapsed().as_millis(), "settled");
        Ok(())
    }

    /// Moves the virtual clock by `ms` in frame-sized ticks.
    pub fn advance(&mut self, ms: u64) -> Result<()> {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(self.frame_ms);
            self.clock.advance_ms(step);
            remaining -= step;
            self.flush()?;
        }
        Ok(())
    }

    pub fn navigation(&mut self, outcome: NavigationOutcome) -> Result<()> {
        self.emit(&Event::Navigation(outcome))?;
        self.flush()
    }

    pub fn frame(&mut self) -> Result<()> {
        let frame = self.app.frame();
        self.emit(&Event::Frame(Box::new(frame)))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Emits pending redirects and phase changes without moving the clock.
    pub fn flush(&mut self) -> Result<()> {
        for outcome in self.app.take_redirects() {
            self.emit(&Event::Navigation(outcome))?;
        }
        let at_ms = self.clock.elapsed().as_millis();
        for change in self.app.tick() {
            self.emit(&Event::Phase { at_ms, change })?;
        }
        Ok(())
    }
}
