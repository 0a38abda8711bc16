//! Standalone run.
//!
//! Turns the motor one full revolution and de-energizes the coils, using
//! console pins in place of GPIO. Pass a TOML config path to override the
//! motor defaults. Ctrl-C stops between steps; the coils are still released.
//!
//! ```text
//! cargo run --example basic_stepper -- vendomatic.toml
//! ```

use std::process::ExitCode;

use vendomatic::{load_config, run_steps, Direction, Sequencer, StopFlag, SystemConfig};

/// Delay provider backed by the OS scheduler.
struct ThreadDelay;

impl embedded_hal::delay::DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Output pin that remembers its level.
struct ConsolePin {
    label: &'static str,
    state: bool,
}

impl ConsolePin {
    fn new(label: &'static str) -> Self {
        Self { label, state: false }
    }
}

impl embedded_hal::digital::ErrorType for ConsolePin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for ConsolePin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

static STOP: StopFlag = StopFlag::new();

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::from(1);
            }
        },
        None => SystemConfig::default(),
    };

    let pins = [
        ConsolePin::new("IN1"),
        ConsolePin::new("IN2"),
        ConsolePin::new("IN3"),
        ConsolePin::new("IN4"),
    ];

    let mut motor = match Sequencer::builder()
        .from_config(&config)
        .channels(pins)
        .delay(ThreadDelay)
        .build()
    {
        Ok(motor) => motor,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let dwell = motor.dwell_time().unwrap_or_default();
    println!(
        "{}: {} steps/rev at {} RPM, dwell {:?}",
        motor.name(),
        motor.steps_per_revolution(),
        motor.speed().value(),
        dwell
    );

    if let Err(e) = ctrlc::set_handler(|| STOP.request()) {
        eprintln!("Could not install Ctrl-C handler: {}", e);
    }

    let steps = motor.steps_per_revolution();
    match run_steps(&mut motor, steps, Direction::Clockwise, &STOP) {
        Ok(report) => {
            if report.stopped {
                println!("Interrupted, outputs reset");
            }
            println!(
                "Completed {}/{} steps, position {}",
                report.completed,
                report.requested,
                motor.current_step()
            );
        }
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    }

    let (pins, _) = motor.release();
    for pin in &pins {
        println!("  {} = {}", pin.label, if pin.state { "HIGH" } else { "LOW" });
    }
    ExitCode::SUCCESS
}
