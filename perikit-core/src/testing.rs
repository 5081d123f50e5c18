//! Mock backends shared by the driver tests
//!
//! Each mock keeps its own clock in a `Cell` so a test can move time forward
//! while the device holds the backend.

use core::cell::Cell;

use heapless::Vec;
use perikit_hal::{
    ButtonBackend, Error, I2cBackend, LedBackend, MemAddress, Result, SpiBackend, Tick,
    UartBackend,
};

use crate::completion::Completion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LedCall {
    Init,
    Deinit,
    SetState(bool),
    Toggle,
    SetBrightness(u8),
}

pub(crate) struct MockLed {
    pub now: Cell<u32>,
    pub level: bool,
    pub toggles: u32,
    pub calls: Vec<LedCall, 32>,
    pub fail_init: bool,
    pub dimmable: bool,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            level: false,
            toggles: 0,
            calls: Vec::new(),
            fail_init: false,
            dimmable: false,
        }
    }

    fn record(&mut self, call: LedCall) {
        // Long blink runs only care about the toggle count
        let _ = self.calls.push(call);
    }
}

impl Tick for MockLed {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

impl LedBackend for MockLed {
    fn init(&mut self) -> Result<()> {
        self.record(LedCall::Init);
        if self.fail_init {
            return Err(Error::Backend);
        }
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.record(LedCall::Deinit);
        Ok(())
    }

    fn set_state(&mut self, on: bool) -> Result<()> {
        self.record(LedCall::SetState(on));
        self.level = on;
        Ok(())
    }

    fn toggle(&mut self) -> Result<()> {
        self.record(LedCall::Toggle);
        self.level = !self.level;
        self.toggles += 1;
        Ok(())
    }

    fn set_brightness(&mut self, percent: u8) -> Result<()> {
        if !self.dimmable {
            return Err(Error::NotSupported);
        }
        self.record(LedCall::SetBrightness(percent));
        Ok(())
    }
}

pub(crate) struct MockButton {
    pub now: Cell<u32>,
    pub armed: bool,
    pub fail_init: bool,
}

impl MockButton {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            armed: false,
            fail_init: false,
        }
    }
}

impl Tick for MockButton {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

impl ButtonBackend for MockButton {
    fn init(&mut self) -> Result<()> {
        if self.fail_init {
            return Err(Error::Backend);
        }
        self.armed = true;
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.armed = false;
        Ok(())
    }
}

pub(crate) struct MockUart {
    pub now: Cell<u32>,
    pub running: bool,
    pub sent: Vec<u8, 64>,
    pub fail_transmit: bool,
}

impl MockUart {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            running: false,
            sent: Vec::new(),
            fail_transmit: false,
        }
    }
}

impl Tick for MockUart {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

impl UartBackend for MockUart {
    fn init(&mut self) -> Result<()> {
        self.running = true;
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.running = false;
        Ok(())
    }

    fn transmit(&mut self, data: &[u8]) -> Result<()> {
        if self.fail_transmit {
            return Err(Error::Backend);
        }
        self.sent
            .extend_from_slice(data)
            .map_err(|_| Error::Backend)
    }
}

/// Bus event, in order of occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BusCall {
    Select,
    Deselect,
    Transfer(usize),
    Acquire,
    Release,
    Write(u8, MemAddress, usize),
    Read(u8, MemAddress, usize),
    Probe(u8),
}

/// SPI mock that answers each transfer with `tx[i] ^ reply_xor`
///
/// Completion is reported through a [`Completion`] the way a DMA interrupt
/// would.
pub(crate) struct MockSpi {
    pub now: Cell<u32>,
    pub selected: bool,
    pub calls: Vec<BusCall, 16>,
    pub last_tx: Vec<u8, 256>,
    pub reply_xor: u8,
    pub fail_select: bool,
    pub fail_deselect: bool,
    pub fail_transfer: bool,
    /// Never complete, like a DMA that lost its interrupt
    pub hang: bool,
    done: Completion,
}

impl MockSpi {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            selected: false,
            calls: Vec::new(),
            last_tx: Vec::new(),
            reply_xor: 0,
            fail_select: false,
            fail_deselect: false,
            fail_transfer: false,
            hang: false,
            done: Completion::new(),
        }
    }
}

impl Tick for MockSpi {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

impl SpiBackend for MockSpi {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        Ok(())
    }

    fn chip_select(&mut self) -> Result<()> {
        let _ = self.calls.push(BusCall::Select);
        if self.fail_select {
            return Err(Error::Backend);
        }
        self.selected = true;
        Ok(())
    }

    fn chip_deselect(&mut self) -> Result<()> {
        let _ = self.calls.push(BusCall::Deselect);
        self.selected = false;
        if self.fail_deselect {
            return Err(Error::Backend);
        }
        Ok(())
    }

    async fn transceive(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        let _ = self.calls.push(BusCall::Transfer(tx.len()));
        self.last_tx.clear();
        let _ = self.last_tx.extend_from_slice(tx);

        self.done.reset();
        if self.hang {
            core::future::pending::<()>().await;
        }
        if self.fail_transfer {
            self.done.complete(Err(Error::Backend));
        } else {
            for (r, t) in rx.iter_mut().zip(tx) {
                *r = t ^ self.reply_xor;
            }
            self.done.complete(Ok(()));
        }
        self.done.wait().await
    }
}

/// I2C mock backed by a 256-byte register file at one target address
pub(crate) struct MockI2c {
    pub now: Cell<u32>,
    pub target: u8,
    pub memory: [u8; 256],
    pub calls: Vec<BusCall, 16>,
    pub fail_acquire: bool,
    pub fail_write: bool,
}

impl MockI2c {
    pub fn new(target: u8) -> Self {
        Self {
            now: Cell::new(0),
            target,
            memory: [0; 256],
            calls: Vec::new(),
            fail_acquire: false,
            fail_write: false,
        }
    }

    fn check_target(&self, address: u8) -> Result<()> {
        if address == self.target {
            Ok(())
        } else {
            Err(Error::Backend)
        }
    }
}

impl Tick for MockI2c {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

impl I2cBackend for MockI2c {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        Ok(())
    }

    async fn mem_write(&mut self, address: u8, mem: MemAddress, data: &[u8]) -> Result<()> {
        let _ = self.calls.push(BusCall::Write(address, mem, data.len()));
        self.check_target(address)?;
        if self.fail_write {
            return Err(Error::Backend);
        }
        let start = usize::from(mem.address());
        for (i, byte) in data.iter().enumerate() {
            self.memory[(start + i) % 256] = *byte;
        }
        Ok(())
    }

    async fn mem_read(&mut self, address: u8, mem: MemAddress, buf: &mut [u8]) -> Result<()> {
        let _ = self.calls.push(BusCall::Read(address, mem, buf.len()));
        self.check_target(address)?;
        let start = usize::from(mem.address());
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.memory[(start + i) % 256];
        }
        Ok(())
    }

    async fn device_ready(&mut self, address: u8, _timeout_ms: u32) -> Result<()> {
        let _ = self.calls.push(BusCall::Probe(address));
        self.check_target(address)
    }

    fn acquire_bus(&mut self) -> Result<()> {
        let _ = self.calls.push(BusCall::Acquire);
        if self.fail_acquire {
            return Err(Error::Backend);
        }
        Ok(())
    }

    fn release_bus(&mut self) -> Result<()> {
        let _ = self.calls.push(BusCall::Release);
        Ok(())
    }
}
