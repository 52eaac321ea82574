//! Firing-angle computation

use acdim_core::{DutyLevel, FiringMethod, MinPower};

use crate::scheduler::GATE_ENABLE_TIME_US;

/// Gate timing for one half-cycle, relative to the zero-cross
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOffsets {
    /// Offset at which the gate goes high; 0 = no enable pending
    pub enable_us: u32,
    /// Offset at which the gate goes low; 0 = no disable pending
    pub disable_us: u32,
}

/// Compute the gate offsets for a non-saturated duty
///
/// Nonzero offsets are at least 1us (0 is reserved for "nothing pending")
/// and never exceed `cycle_us`.
pub fn compute_offsets(
    method: FiringMethod,
    duty: DutyLevel,
    cycle_us: u32,
    min_power: MinPower,
) -> GateOffsets {
    match method {
        FiringMethod::Trailing => GateOffsets {
            // conduction grows from the start of the half-cycle; enable
            // right after the zero-cross, never exactly at it
            enable_us: 1,
            disable_us: scale(duty.raw(), cycle_us).max(10),
        },
        FiringMethod::Leading | FiringMethod::LeadingPulse => {
            let min_conduction_us = scale_thousandths(cycle_us, min_power.thousandths());
            let enable_us =
                scale(u16::MAX - duty.raw(), cycle_us - min_conduction_us).max(1);
            let disable_us = if method == FiringMethod::LeadingPulse {
                // the pulse must stay long enough for the triac to latch
                // even when the natural window near full duty is tiny
                (enable_us + GATE_ENABLE_TIME_US)
                    .max(cycle_us / 10)
                    .min(cycle_us)
            } else {
                cycle_us
            };
            GateOffsets {
                enable_us,
                disable_us,
            }
        }
    }
}

/// `value / 65535` of `span`, widened so the product cannot overflow
fn scale(value: u16, span: u32) -> u32 {
    (value as u64 * span as u64 / u16::MAX as u64) as u32
}

/// `thousandths / 1000` of `span`, widened so the product cannot overflow
fn scale_thousandths(span: u32, thousandths: u16) -> u32 {
    (span as u64 * thousandths as u64 / 1000) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYCLE: u32 = 10_000;

    #[test]
    fn trailing_midpoint() {
        let offsets = compute_offsets(
            FiringMethod::Trailing,
            DutyLevel::from_raw(32_768),
            CYCLE,
            MinPower::ZERO,
        );
        assert_eq!(offsets.enable_us, 1);
        assert!((offsets.disable_us as i64 - 5_000).abs() <= 1, "got {}", offsets.disable_us);
    }

    #[test]
    fn trailing_disable_floor() {
        let offsets = compute_offsets(
            FiringMethod::Trailing,
            DutyLevel::from_raw(1),
            CYCLE,
            MinPower::ZERO,
        );
        assert_eq!(offsets.disable_us, 10);
    }

    #[test]
    fn leading_quarter_duty() {
        let offsets = compute_offsets(
            FiringMethod::Leading,
            DutyLevel::from_raw(16_384),
            CYCLE,
            MinPower::ZERO,
        );
        assert!((offsets.enable_us as i64 - 7_500).abs() <= 1, "got {}", offsets.enable_us);
        assert_eq!(offsets.disable_us, CYCLE);
    }

    #[test]
    fn leading_pulse_keeps_a_latching_pulse_near_full_duty() {
        let offsets = compute_offsets(
            FiringMethod::LeadingPulse,
            DutyLevel::from_raw(65_000),
            CYCLE,
            MinPower::ZERO,
        );
        assert!(offsets.disable_us >= offsets.enable_us + GATE_ENABLE_TIME_US);
        assert_eq!(offsets.disable_us, CYCLE / 10);
    }

    #[test]
    fn leading_pulse_offsets_fit_the_cycle() {
        let offsets = compute_offsets(
            FiringMethod::LeadingPulse,
            DutyLevel::from_raw(1),
            CYCLE,
            MinPower::ZERO,
        );
        assert!(offsets.enable_us <= CYCLE);
        assert!(offsets.disable_us <= CYCLE);
    }

    #[test]
    fn trailing_disable_grows_with_duty() {
        let mut previous = 0;
        for raw in (1..u16::MAX).step_by(997) {
            let offsets = compute_offsets(
                FiringMethod::Trailing,
                DutyLevel::from_raw(raw),
                CYCLE,
                MinPower::ZERO,
            );
            assert!(offsets.disable_us >= previous, "regressed at duty {}", raw);
            previous = offsets.disable_us;
        }
    }

    #[test]
    fn leading_enable_shrinks_with_duty() {
        for method in [FiringMethod::Leading, FiringMethod::LeadingPulse] {
            let mut previous = u32::MAX;
            for raw in (1..u16::MAX).step_by(997) {
                let offsets =
                    compute_offsets(method, DutyLevel::from_raw(raw), CYCLE, MinPower::ZERO);
                assert!(offsets.enable_us <= previous, "grew at duty {}", raw);
                previous = offsets.enable_us;
            }
        }
    }

    #[test]
    fn min_power_floor_bounds_the_enable_offset() {
        // with a 10% floor the enable point never moves past 90% of the
        // half-cycle, so at least 10% always conducts
        let floor = MinPower::from_thousandths(100);
        let offsets = compute_offsets(
            FiringMethod::Leading,
            DutyLevel::from_raw(1),
            CYCLE,
            floor,
        );
        assert!(offsets.enable_us <= CYCLE - CYCLE / 10);
    }

    #[test]
    fn offsets_are_never_zero_for_live_duties() {
        for method in [
            FiringMethod::Leading,
            FiringMethod::LeadingPulse,
            FiringMethod::Trailing,
        ] {
            for raw in [1, 100, 32_768, 65_000, u16::MAX - 1] {
                let offsets =
                    compute_offsets(method, DutyLevel::from_raw(raw), CYCLE, MinPower::ZERO);
                assert!(offsets.enable_us >= 1);
                assert!(offsets.disable_us >= 1);
            }
        }
    }
}
