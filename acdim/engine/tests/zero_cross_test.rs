//! Zero-cross edge path tests for acdim-engine

use core::sync::atomic::{AtomicBool, Ordering};

use acdim_engine::{ChannelConfig, DimmerChannel, DutyLevel, FiringMethod, Micros};
use acdim_hal::gpio::{GatePin, Level};

struct TestPin {
    number: u32,
    level: AtomicBool,
}

impl TestPin {
    const fn new(number: u32) -> Self {
        Self {
            number,
            level: AtomicBool::new(false),
        }
    }

    fn is_high(&self) -> bool {
        self.level.load(Ordering::Relaxed)
    }
}

impl GatePin for TestPin {
    fn set_level(&self, level: Level) {
        self.level.store(level == Level::High, Ordering::Relaxed);
    }

    fn pin_number(&self) -> u32 {
        self.number
    }
}

#[test]
fn consecutive_edges_measure_the_cycle() {
    static PIN: TestPin = TestPin::new(1);
    static CH: DimmerChannel =
        DimmerChannel::new(ChannelConfig::new(5, FiringMethod::LeadingPulse), &PIN);

    CH.handle_zero_cross(Micros::from_raw(10_000));
    CH.handle_zero_cross(Micros::from_raw(20_000));
    assert_eq!(CH.cycle_length_us(), 10_000);
    assert_eq!(CH.last_zero_cross_at(), Micros::from_raw(20_000));
}

#[test]
fn bounced_edge_accumulates_into_the_estimate() {
    static PIN: TestPin = TestPin::new(1);
    static CH: DimmerChannel =
        DimmerChannel::new(ChannelConfig::new(5, FiringMethod::LeadingPulse), &PIN);

    CH.handle_zero_cross(Micros::from_raw(10_000));
    CH.handle_zero_cross(Micros::from_raw(20_000));
    assert_eq!(CH.cycle_length_us(), 10_000);

    // a re-trigger 2000us later is bounce, not a new half-cycle
    CH.handle_zero_cross(Micros::from_raw(22_000));
    assert_eq!(CH.cycle_length_us(), 12_000);
    assert_eq!(CH.last_zero_cross_at(), Micros::from_raw(22_000));
}

#[test]
fn full_duty_drives_the_gate_at_the_edge() {
    static PIN: TestPin = TestPin::new(1);
    static CH: DimmerChannel =
        DimmerChannel::new(ChannelConfig::new(5, FiringMethod::LeadingPulse), &PIN);

    CH.set_duty(DutyLevel::FULL);
    CH.handle_zero_cross(Micros::from_raw(10_000));
    CH.handle_zero_cross(Micros::from_raw(20_000));

    assert!(PIN.is_high());
    assert_eq!(CH.pending_enable_us(), None);
    assert_eq!(CH.pending_disable_us(), None);
    assert_eq!(CH.service(Micros::from_raw(21_000)), 0);
    assert!(PIN.is_high());
}

#[test]
fn zero_duty_drives_the_gate_low_at_the_edge() {
    static PIN: TestPin = TestPin::new(1);
    static CH: DimmerChannel =
        DimmerChannel::new(ChannelConfig::new(5, FiringMethod::LeadingPulse), &PIN);

    PIN.set_level(Level::High);
    CH.set_duty(DutyLevel::OFF);
    CH.handle_zero_cross(Micros::from_raw(10_000));

    assert!(!PIN.is_high());
    assert_eq!(CH.pending_enable_us(), None);
    assert_eq!(CH.pending_disable_us(), None);
}

#[test]
fn init_cycle_conducts_one_full_half_cycle() {
    static PIN: TestPin = TestPin::new(1);
    static CH: DimmerChannel = DimmerChannel::new(
        ChannelConfig::new(5, FiringMethod::LeadingPulse).with_init_half_cycle(),
        &PIN,
    );

    CH.handle_zero_cross(Micros::from_raw(10_000));
    CH.handle_zero_cross(Micros::from_raw(20_000));

    CH.set_duty(DutyLevel::from_raw(20_000));
    CH.request_init_cycle();
    CH.handle_zero_cross(Micros::from_raw(30_000));

    assert!(PIN.is_high());
    assert!(!CH.init_cycle_pending());
    assert_eq!(CH.pending_enable_us(), None);
    assert_eq!(CH.pending_disable_us(), Some(CH.cycle_length_us()));
}

#[test]
fn trailing_edge_schedules_from_the_zero_cross() {
    static PIN: TestPin = TestPin::new(1);
    static CH: DimmerChannel =
        DimmerChannel::new(ChannelConfig::new(5, FiringMethod::Trailing), &PIN);

    CH.set_duty(DutyLevel::from_raw(32_768));
    CH.handle_zero_cross(Micros::from_raw(10_000));
    CH.handle_zero_cross(Micros::from_raw(20_000));

    assert_eq!(CH.pending_enable_us(), Some(1));
    let disable = CH.pending_disable_us().unwrap();
    assert!((disable as i64 - 5_000).abs() <= 1);
}

#[test]
fn leading_edge_resets_the_gate_at_the_zero_cross() {
    static PIN: TestPin = TestPin::new(1);
    static CH: DimmerChannel =
        DimmerChannel::new(ChannelConfig::new(5, FiringMethod::Leading), &PIN);

    CH.set_duty(DutyLevel::from_raw(16_384));
    PIN.set_level(Level::High);
    CH.handle_zero_cross(Micros::from_raw(10_000));
    CH.handle_zero_cross(Micros::from_raw(20_000));

    assert!(!PIN.is_high());
    let enable = CH.pending_enable_us().unwrap();
    assert!((enable as i64 - 7_500).abs() <= 1);
    assert_eq!(CH.pending_disable_us(), Some(CH.cycle_length_us()));
}
