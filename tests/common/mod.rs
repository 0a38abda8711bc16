//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use vendomatic::error::SensorError;
use vendomatic::motor::{Phase, CHANNELS};
use vendomatic::{Centimeters, DistanceSensor, Sequencer, StopFlag};

/// Every write across all channels, in issue order: `(channel, level)`.
pub type WriteLog = Rc<RefCell<Vec<(usize, bool)>>>;

#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin that records writes and can be made to fail.
pub struct RecordingPin {
    channel: usize,
    log: WriteLog,
    broken: Rc<Cell<bool>>,
}

impl ErrorType for RecordingPin {
    type Error = PinFault;
}

impl RecordingPin {
    fn write(&mut self, level: bool) -> Result<(), PinFault> {
        if self.broken.get() {
            return Err(PinFault);
        }
        self.log.borrow_mut().push((self.channel, level));
        Ok(())
    }
}

impl OutputPin for RecordingPin {
    fn set_high(&mut self) -> Result<(), PinFault> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<(), PinFault> {
        self.write(false)
    }
}

/// Four recording pins sharing one log, plus a per-channel failure switch.
pub struct Bench {
    pub log: WriteLog,
    pub broken: [Rc<Cell<bool>>; CHANNELS],
}

impl Bench {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            broken: Default::default(),
        }
    }

    pub fn pins(&self) -> [RecordingPin; CHANNELS] {
        let pin = |channel: usize| RecordingPin {
            channel,
            log: Rc::clone(&self.log),
            broken: Rc::clone(&self.broken[channel]),
        };
        [pin(0), pin(1), pin(2), pin(3)]
    }

    pub fn break_channel(&self, channel: usize) {
        self.broken[channel].set(true);
    }

    pub fn writes(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Last level written to each channel.
    pub fn levels(&self) -> Phase {
        let mut levels = [false; CHANNELS];
        for &(channel, level) in self.log.borrow().iter() {
            levels[channel] = level;
        }
        levels
    }

    /// The log grouped into complete 4-channel phases, checking channel order.
    pub fn phases(&self) -> Vec<Phase> {
        let log = self.log.borrow();
        assert_eq!(log.len() % CHANNELS, 0, "partial phase in log");
        log.chunks(CHANNELS)
            .map(|chunk| {
                let mut phase = [false; CHANNELS];
                for (i, &(channel, level)) in chunk.iter().enumerate() {
                    assert_eq!(channel, i, "channels written out of order");
                    phase[channel] = level;
                }
                phase
            })
            .collect()
    }
}

/// Delay that only adds up the requested time.
#[derive(Clone, Default)]
pub struct RecordingDelay {
    pub total_ns: Rc<Cell<u64>>,
}

impl RecordingDelay {
    pub fn total_secs(&self) -> f64 {
        self.total_ns.get() as f64 / 1e9
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + ns as u64);
    }
}

/// Delay backed by `std::thread::sleep`.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Delay that requests a stop once it has been called `after` times.
pub struct StopAfter<'a> {
    pub after: u32,
    pub calls: u32,
    pub flag: &'a StopFlag,
}

impl DelayNs for StopAfter<'_> {
    fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
        if self.calls >= self.after {
            self.flag.request();
        }
    }
}

/// Sensor replaying a script, then requesting a stop and timing out.
pub struct ScriptedSensor<'a> {
    pub readings: VecDeque<Result<Centimeters, SensorError>>,
    pub when_empty: &'a StopFlag,
    pub reads: u32,
}

impl<'a> ScriptedSensor<'a> {
    pub fn new(readings: &[Result<f32, SensorError>], when_empty: &'a StopFlag) -> Self {
        Self {
            readings: readings.iter().copied().map(|r| r.map(Centimeters)).collect(),
            when_empty,
            reads: 0,
        }
    }
}

impl DistanceSensor for ScriptedSensor<'_> {
    fn read(&mut self) -> Result<Centimeters, SensorError> {
        self.reads += 1;
        match self.readings.pop_front() {
            Some(reading) => reading,
            None => {
                self.when_empty.request();
                Err(SensorError::Timeout)
            }
        }
    }
}

/// A sequencer on recording pins, with its construction-time reset cleared
/// from the log.
pub fn sequencer<D: DelayNs>(bench: &Bench, delay: D, steps_per_revolution: u32, rpm: f32) -> Sequencer<RecordingPin, D> {
    let sequencer = Sequencer::builder()
        .name("test")
        .channels(bench.pins())
        .delay(delay)
        .steps_per_revolution(steps_per_revolution)
        .speed_rpm(rpm)
        .build()
        .expect("valid sequencer");
    bench.clear();
    sequencer
}
