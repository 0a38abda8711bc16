//! Integration tests for vendomatic.
//!
//! These tests drive the sequencer and both drivers through recording pins and
//! delays, checking the exact writes issued and the time requested.

mod common;

use std::time::Instant;

use common::{sequencer, Bench, RecordingDelay, ScriptedSensor, StdDelay, StopAfter};
use vendomatic::error::{Error, MotorError, SensorError};
use vendomatic::motor::{ALL_LOW, HALF_STEP};
use vendomatic::{run_steps, Direction, PollOutcome, StopFlag, TriggerConfig, VendingLoop};

// =============================================================================
// Sequencer
// =============================================================================

#[test]
fn full_revolution_at_15_rpm() {
    let bench = Bench::new();
    let delay = RecordingDelay::default();
    let mut motor = sequencer(&bench, delay.clone(), 4096, 15.0);

    motor.step(4096, Direction::Clockwise).unwrap();

    assert_eq!(motor.current_step(), 4096);
    let phases = bench.phases();
    assert_eq!(phases.len(), 4096);
    for (i, phase) in phases.iter().enumerate() {
        assert_eq!(*phase, HALF_STEP.phase_at(i as i64 + 1), "step {}", i + 1);
    }
    assert_eq!(phases[0], HALF_STEP.phase_at(1));
    assert_eq!(phases[4095], HALF_STEP.phase_at(0));

    // 4096 x 0.9765625 ms = 4.0 s
    assert!((delay.total_secs() - 4.0).abs() < 0.01, "{}", delay.total_secs());

    bench.clear();
    motor.reset().unwrap();
    assert_eq!(bench.phases(), vec![ALL_LOW]);
    assert_eq!(motor.current_step(), 4096);
}

#[test]
fn real_sleep_paces_steps() {
    let bench = Bench::new();
    let mut motor = sequencer(&bench, StdDelay, 4096, 15.0);

    let started = Instant::now();
    motor.step(256, Direction::Clockwise).unwrap();
    let elapsed = started.elapsed().as_secs_f64();

    // 256 x 0.977 ms = 0.25 s; sleeps only ever overshoot
    assert!(elapsed >= 0.25, "elapsed {}", elapsed);
    assert!(elapsed < 2.5, "elapsed {}", elapsed);
}

#[test]
fn forward_then_back_restores_position() {
    let bench = Bench::new();
    let mut motor = sequencer(&bench, RecordingDelay::default(), 4096, 15.0);

    motor.step(37, Direction::Clockwise).unwrap();
    motor.step(37, Direction::CounterClockwise).unwrap();

    assert_eq!(motor.current_step(), 0);
    assert_eq!(bench.levels(), HALF_STEP.phase_at(0));
}

#[test]
fn single_step_back_from_zero_uses_last_phase() {
    let bench = Bench::new();
    let mut motor = sequencer(&bench, RecordingDelay::default(), 4096, 15.0);

    motor.step(1, Direction::CounterClockwise).unwrap();

    assert_eq!(motor.current_step(), -1);
    assert_eq!(motor.phase_index(), 7);
    assert_eq!(bench.phases(), vec![[false, false, false, true]]);
}

#[test]
fn speed_change_applies_to_next_step() {
    let bench = Bench::new();
    let delay = RecordingDelay::default();
    let mut motor = sequencer(&bench, delay.clone(), 4096, 15.0);

    motor.step_one(Direction::Clockwise).unwrap();
    let at_15 = delay.total_ns.get();

    motor.set_speed(vendomatic::Rpm(10.0)).unwrap();
    motor.step_one(Direction::Clockwise).unwrap();
    let at_10 = delay.total_ns.get() - at_15;

    assert_eq!(at_15, 976_563);
    assert_eq!(at_10, 1_464_844);
}

// =============================================================================
// Output failures
// =============================================================================

#[test]
fn failed_write_keeps_counter_and_skips_later_channels() {
    let bench = Bench::new();
    let delay = RecordingDelay::default();
    let mut motor = sequencer(&bench, delay.clone(), 4096, 15.0);
    bench.break_channel(2);

    let err = motor.step_one(Direction::Clockwise).unwrap_err();

    assert_eq!(err, Error::Motor(MotorError::PinError { channel: 2 }));
    assert_eq!(motor.current_step(), 1);
    // Channels 0 and 1 were written, 3 was not, and no dwell was taken
    assert_eq!(*bench.log.borrow(), vec![(0, true), (1, false)]);
    assert_eq!(delay.total_ns.get(), 0);
}

#[test]
fn failed_step_aborts_the_run() {
    let bench = Bench::new();
    let mut motor = sequencer(&bench, RecordingDelay::default(), 4096, 15.0);
    motor.step(3, Direction::Clockwise).unwrap();
    bench.break_channel(0);

    let result = motor.step(10, Direction::Clockwise);

    assert!(matches!(
        result,
        Err(Error::Motor(MotorError::PinError { channel: 0 }))
    ));
    assert_eq!(motor.current_step(), 4);
}

#[test]
fn failed_reset_reports_channel() {
    let bench = Bench::new();
    let mut motor = sequencer(&bench, RecordingDelay::default(), 4096, 15.0);
    bench.break_channel(1);

    assert_eq!(
        motor.reset(),
        Err(Error::Motor(MotorError::PinError { channel: 1 }))
    );
    assert_eq!(*bench.log.borrow(), vec![(0, false)]);
}

// =============================================================================
// Standalone driver
// =============================================================================

#[test]
fn run_steps_completes_and_resets() {
    let bench = Bench::new();
    let mut motor = sequencer(&bench, RecordingDelay::default(), 4096, 15.0);
    let stop = StopFlag::new();

    let report = run_steps(&mut motor, 100, Direction::Clockwise, &stop).unwrap();

    assert_eq!(report.requested, 100);
    assert_eq!(report.completed, 100);
    assert!(!report.stopped);
    assert_eq!(bench.levels(), ALL_LOW);
    assert_eq!(bench.writes(), 101 * 4);
}

#[test]
fn run_steps_stops_between_steps() {
    let bench = Bench::new();
    let stop = StopFlag::new();
    let delay = StopAfter {
        after: 10,
        calls: 0,
        flag: &stop,
    };
    let mut motor = sequencer(&bench, delay, 4096, 15.0);

    let report = run_steps(&mut motor, 4096, Direction::Clockwise, &stop).unwrap();

    assert_eq!(report.completed, 10);
    assert!(report.stopped);
    assert_eq!(motor.current_step(), 10);
    assert_eq!(bench.levels(), ALL_LOW);
}

#[test]
fn run_steps_honours_stop_from_another_thread() {
    static INTERRUPT: StopFlag = StopFlag::new();
    let bench = Bench::new();
    let mut motor = sequencer(&bench, StdDelay, 4096, 15.0);

    // Stands in for a SIGINT handler: it only sets the flag
    let handler = std::thread::spawn(|| {
        std::thread::sleep(std::time::Duration::from_millis(50));
        INTERRUPT.request();
    });
    let report = run_steps(&mut motor, 4096, Direction::Clockwise, &INTERRUPT).unwrap();
    handler.join().unwrap();

    assert!(report.stopped);
    assert!(report.completed > 0 && report.completed < 4096, "{:?}", report);
    assert_eq!(motor.current_step(), report.completed as i64);
    assert_eq!(bench.levels(), ALL_LOW);
}

#[test]
fn run_steps_reports_step_error_after_resetting() {
    let bench = Bench::new();
    let mut motor = sequencer(&bench, RecordingDelay::default(), 4096, 15.0);
    let stop = StopFlag::new();
    bench.break_channel(3);

    let result = run_steps(&mut motor, 5, Direction::Clockwise, &stop);

    assert_eq!(
        result,
        Err(Error::Motor(MotorError::PinError { channel: 3 }))
    );
    // Step wrote 0..2, then the reset attempt drove 0..2 low
    let log = bench.log.borrow();
    assert_eq!(&log[log.len() - 3..], &[(0, false), (1, false), (2, false)]);
}

// =============================================================================
// Vending loop
// =============================================================================

fn trigger_config() -> TriggerConfig {
    TriggerConfig::default()
}

#[test]
fn vending_loop_vends_once_per_presence() {
    let bench = Bench::new();
    let motor = sequencer(&bench, RecordingDelay::default(), 64, 15.0);
    let stop = StopFlag::new();
    let sensor = ScriptedSensor::new(
        &[
            Ok(30.0),
            Ok(5.0),
            Err(SensorError::Timeout),
            Ok(5.0),
            Ok(9.0),
            Ok(12.0),
            Ok(4.0),
        ],
        &stop,
    );
    let pacing = RecordingDelay::default();
    let mut vending = VendingLoop::new(motor, sensor, pacing.clone(), trigger_config()).unwrap();

    let vends = vending.run(&stop).unwrap();

    assert_eq!(vends, 2);
    assert_eq!(vending.sequencer().current_step(), 128);
    assert_eq!(bench.levels(), ALL_LOW);

    // 7 scripted reads + the read that ran dry, each followed by one 100 ms
    // poll pause, plus two 3 s cooldowns
    let (_, sensor, _) = vending.into_parts();
    assert_eq!(sensor.reads, 8);
    assert!((pacing.total_secs() - 6.8).abs() < 1e-6, "{}", pacing.total_secs());
}

#[test]
fn vending_loop_reports_each_poll() {
    let bench = Bench::new();
    let motor = sequencer(&bench, RecordingDelay::default(), 64, 15.0);
    let stop = StopFlag::new();
    let sensor = ScriptedSensor::new(
        &[Ok(30.0), Ok(5.0), Err(SensorError::Timeout), Ok(9.0), Ok(12.0), Ok(4.0)],
        &stop,
    );
    let mut vending =
        VendingLoop::new(motor, sensor, RecordingDelay::default(), trigger_config()).unwrap();

    let mut seen = Vec::new();
    let vends = vending.run_with(&stop, |outcome| seen.push(outcome)).unwrap();

    assert_eq!(vends, 2);
    assert_eq!(
        seen,
        vec![
            PollOutcome::Unchanged,
            PollOutcome::Vended { steps: 64 },
            PollOutcome::NoReading,
            PollOutcome::Unchanged,
            PollOutcome::Released,
            PollOutcome::Vended { steps: 64 },
            PollOutcome::NoReading,
        ]
    );
}

#[test]
fn vending_loop_poll_outcomes() {
    let bench = Bench::new();
    let motor = sequencer(&bench, RecordingDelay::default(), 64, 15.0);
    let stop = StopFlag::new();
    let sensor = ScriptedSensor::new(&[Err(SensorError::OutOfRange), Ok(2.0), Ok(11.0)], &stop);
    let mut vending =
        VendingLoop::new(motor, sensor, RecordingDelay::default(), trigger_config()).unwrap();

    assert_eq!(vending.poll_once(&stop).unwrap(), PollOutcome::NoReading);
    assert_eq!(vending.poll_once(&stop).unwrap(), PollOutcome::Vended { steps: 64 });
    assert!(vending.detector().is_triggered());
    assert_eq!(vending.poll_once(&stop).unwrap(), PollOutcome::Released);
    assert!(!vending.detector().is_triggered());
}

#[test]
fn vending_loop_stop_during_vend_resets_outputs() {
    let bench = Bench::new();
    let stop = StopFlag::new();
    let delay = StopAfter {
        after: 5,
        calls: 0,
        flag: &stop,
    };
    let motor = sequencer(&bench, delay, 4096, 15.0);
    let sensor = ScriptedSensor::new(&[Ok(3.0)], &stop);
    let mut vending =
        VendingLoop::new(motor, sensor, RecordingDelay::default(), trigger_config()).unwrap();

    assert_eq!(vending.poll_once(&stop).unwrap(), PollOutcome::Stopped);
    assert_eq!(vending.sequencer().current_step(), 5);
    assert_eq!(bench.levels(), ALL_LOW);

    assert_eq!(vending.run(&stop).unwrap(), 0);
}

#[test]
fn vend_steps_override() {
    let bench = Bench::new();
    let motor = sequencer(&bench, RecordingDelay::default(), 4096, 15.0);
    let stop = StopFlag::new();
    let sensor = ScriptedSensor::new(&[Ok(3.0)], &stop);
    let config = TriggerConfig {
        vend_steps: Some(512),
        cooldown_ms: 0,
        ..TriggerConfig::default()
    };
    let mut vending = VendingLoop::new(motor, sensor, RecordingDelay::default(), config).unwrap();

    assert_eq!(vending.vend_steps(), 512);
    assert_eq!(vending.poll_once(&stop).unwrap(), PollOutcome::Vended { steps: 512 });
}
