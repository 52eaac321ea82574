//! Gate firing methods

use core::fmt;

/// Gate firing strategy, fixed at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiringMethod {
    /// Short gate pulse at the firing angle; conduction runs to the next
    /// zero-cross once the triac has latched
    LeadingPulse,
    /// Gate held high from the firing angle until the next zero-cross
    Leading,
    /// Gate high from the zero-cross; conduction ends at the firing angle
    Trailing,
}

impl fmt::Display for FiringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiringMethod::LeadingPulse => write!(f, "leading pulse"),
            FiringMethod::Leading => write!(f, "leading"),
            FiringMethod::Trailing => write!(f, "trailing"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FiringMethod {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FiringMethod::LeadingPulse => defmt::write!(fmt, "leading pulse"),
            FiringMethod::Leading => defmt::write!(fmt, "leading"),
            FiringMethod::Trailing => defmt::write!(fmt, "trailing"),
        }
    }
}
