//! Sensor-triggered vending.
//!
//! Feeds a simulated hand approaching and withdrawing into the vending loop.
//! Each approach dispenses one revolution; hovering does not re-trigger.
//! Ctrl-C stops the loop and releases the coils.

use std::collections::VecDeque;
use std::process::ExitCode;

use vendomatic::error::SensorError;
use vendomatic::{
    load_config, Centimeters, DistanceSensor, PollOutcome, Sequencer, StopFlag, SystemConfig,
    VendingLoop,
};

struct ThreadDelay;

impl embedded_hal::delay::DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

struct SimPin;

impl embedded_hal::digital::ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for SimPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Replays distances; `None` is a sensor timeout. Requests a stop when done.
struct SimulatedSonar {
    script: VecDeque<Option<f32>>,
    stop: &'static StopFlag,
}

impl DistanceSensor for SimulatedSonar {
    fn read(&mut self) -> Result<Centimeters, SensorError> {
        match self.script.pop_front() {
            Some(Some(cm)) => {
                let distance = Centimeters(cm);
                println!("  distance {:.1} cm", distance.value());
                Ok(distance)
            }
            Some(None) => {
                println!("  timeout");
                Err(SensorError::Timeout)
            }
            None => {
                self.stop.request();
                Err(SensorError::Timeout)
            }
        }
    }
}

static STOP: StopFlag = StopFlag::new();

fn main() -> ExitCode {
    let mut config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::from(1);
            }
        },
        None => SystemConfig::default(),
    };
    // Keep the demo short
    if config.trigger.cooldown_ms > 500 {
        println!("Cooldown shortened from {} ms to 500 ms", config.trigger.cooldown_ms);
        config.trigger.cooldown_ms = 500;
    }

    let motor = match Sequencer::builder()
        .from_config(&config)
        .channels([SimPin, SimPin, SimPin, SimPin])
        .delay(ThreadDelay)
        .build()
    {
        Ok(motor) => motor,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let sonar = SimulatedSonar {
        script: [
            Some(60.0),
            None,
            Some(25.0),
            Some(6.5),
            Some(5.0),
            Some(9.0),
            Some(14.0),
            Some(3.0),
            Some(40.0),
        ]
        .into_iter()
        .collect(),
        stop: &STOP,
    };

    let mut vending = match VendingLoop::new(motor, sonar, ThreadDelay, config.trigger.clone()) {
        Ok(vending) => vending,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    if let Err(e) = ctrlc::set_handler(|| STOP.request()) {
        eprintln!("Could not install Ctrl-C handler: {}", e);
    }

    let report = |outcome: PollOutcome| match outcome {
        PollOutcome::Vended { steps } => println!("Triggered: vended {} steps", steps),
        PollOutcome::Released => println!("Released, ready for the next customer"),
        PollOutcome::Stopped => println!("Stopped during a vend, outputs reset"),
        PollOutcome::NoReading | PollOutcome::Unchanged => {}
    };

    match vending.run_with(&STOP, report) {
        Ok(vends) => {
            println!(
                "Dispensed {} times, motor at step {}",
                vends,
                vending.sequencer().current_step()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}
