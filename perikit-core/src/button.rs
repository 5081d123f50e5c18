//! Push-button driver with software debounce
//!
//! The backend arms an edge interrupt on the button pin. The interrupt is
//! routed through [`crate::edge::EdgeLines`] to [`Button::on_edge`], which
//! filters contact bounce against a time window and forwards accepted
//! presses to the registered [`PressHandler`].
//!
//! Handlers run in interrupt context. Keep them short; [`PressCounter`] is
//! the usual choice when the work belongs in the poll loop.

use core::sync::atomic::{AtomicU32, Ordering};

use perikit_hal::tick::elapsed_ms;
use perikit_hal::{ButtonBackend, Result};

use crate::config::ButtonConfig;
use crate::edge::EdgeSink;
use crate::shared::Shared;

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Button event delivered to a press handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Debounced press edge
    Pressed,
    /// Reserved; not produced yet
    Released,
    /// Reserved; not produced yet
    LongPress,
}

/// Receiver for debounced button events
pub trait PressHandler {
    fn on_event(&self, event: ButtonEvent);
}

impl<F: Fn(ButtonEvent)> PressHandler for F {
    fn on_event(&self, event: ButtonEvent) {
        self(event)
    }
}

/// Press handler that counts presses for the poll loop
///
/// The interrupt side only writes `presses`; the poll side only writes
/// `seen`. That keeps it to plain loads and stores, which every target has.
#[derive(Debug, Default)]
pub struct PressCounter {
    presses: AtomicU32,
    seen: AtomicU32,
}

impl PressCounter {
    pub const fn new() -> Self {
        Self {
            presses: AtomicU32::new(0),
            seen: AtomicU32::new(0),
        }
    }

    /// Presses since the previous call
    pub fn take(&self) -> u32 {
        let presses = self.presses.load(Ordering::Acquire);
        let seen = self.seen.load(Ordering::Relaxed);
        self.seen.store(presses, Ordering::Relaxed);
        presses.wrapping_sub(seen)
    }
}

impl PressHandler for PressCounter {
    fn on_event(&self, event: ButtonEvent) {
        if event == ButtonEvent::Pressed {
            let presses = self.presses.load(Ordering::Relaxed);
            self.presses.store(presses.wrapping_add(1), Ordering::Release);
        }
    }
}

/// Debounced push button
pub struct Button<'h, B: ButtonBackend> {
    backend: B,
    debounce_window_ms: u32,
    /// Tick of the last edge, accepted or not; `None` until the first edge
    last_irq_time: Option<u32>,
    handler: Option<&'h (dyn PressHandler + Sync)>,
}

impl<'h, B: ButtonBackend> Button<'h, B> {
    /// Arm the edge interrupt
    ///
    /// Starts with the default debounce window and no handler.
    pub fn init(mut backend: B) -> Result<Self> {
        backend.init()?;
        debug!("button armed");
        Ok(Self {
            backend,
            debounce_window_ms: DEFAULT_DEBOUNCE_MS,
            last_irq_time: None,
            handler: None,
        })
    }

    /// Disarm the edge interrupt and release the backend
    ///
    /// The handler is dropped first. Callers that routed edges through a
    /// [`Shared`] slot take the button out of the slot before calling this,
    /// which makes any later edge a no-op.
    pub fn deinit(mut self) -> Result<B> {
        self.handler = None;
        self.backend.deinit()?;
        Ok(self.backend)
    }

    /// Install the press handler, replacing any previous one
    pub fn register_press_handler(&mut self, handler: &'h (dyn PressHandler + Sync)) {
        self.handler = Some(handler);
    }

    pub fn clear_press_handler(&mut self) {
        self.handler = None;
    }

    pub fn set_debounce_window(&mut self, window_ms: u32) {
        self.debounce_window_ms = window_ms;
    }

    pub fn debounce_window_ms(&self) -> u32 {
        self.debounce_window_ms
    }

    /// Apply a button configuration
    pub fn configure(&mut self, config: &ButtonConfig) {
        self.set_debounce_window(config.debounce_window_ms);
    }

    /// Handle one edge from the interrupt
    ///
    /// The edge is accepted when it is the first since init or when more
    /// than the debounce window has passed since the previous edge. Every
    /// edge restarts the window, so a bouncing contact stays suppressed
    /// until it settles.
    pub fn on_edge(&mut self) -> Option<ButtonEvent> {
        let now = self.backend.now_ms();
        let accepted = match self.last_irq_time {
            None => true,
            Some(last) => elapsed_ms(now, last) > self.debounce_window_ms,
        };
        self.last_irq_time = Some(now);

        if !accepted {
            trace!("button bounce at {}", now);
            return None;
        }

        let event = ButtonEvent::Pressed;
        if let Some(handler) = self.handler {
            handler.on_event(event);
        }
        Some(event)
    }

    /// Poll hook; events are interrupt-driven, so there is nothing to do
    pub fn poll(&mut self) -> Result<()> {
        Ok(())
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ButtonBackend> EdgeSink for Shared<Option<Button<'_, B>>> {
    fn on_edge(&self) {
        self.lock(|slot| {
            if let Some(button) = slot {
                button.on_edge();
            }
        });
    }
}
