//! Wong barrier-penetration fusion cross section.
//!
//! σ(E) = π·R_B²·(ħω/E)·ln(1 + exp(2π(E − V_B)/ħω)), converted from fm² to mb.

use crate::common::constants::{MB_PER_FM2, PI, PI2};
use crate::domain::{BarrierResult, CrossSectionSample};
use crate::numerics::log_one_plus_exp;
use serde::{Deserialize, Serialize};

/// Upper bound on the samples a single window may produce.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Sampling window around the barrier and the numeric guards of the integrand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrossSectionWindow {
    /// First sample sits at V_B − below_barrier (MeV).
    pub below_barrier: f64,
    /// Last sample sits at V_B + above_barrier (MeV), inclusive.
    pub above_barrier: f64,
    pub step: f64,
    /// Lower bound on σ in mb, keeps log-scale plots defined.
    pub sigma_floor: f64,
    /// ln(1 + eˣ) is replaced by x above this argument.
    pub overflow_threshold: f64,
}

impl Default for CrossSectionWindow {
    fn default() -> Self {
        Self {
            below_barrier: 50.0,
            above_barrier: 100.0,
            step: 0.5,
            sigma_floor: 1.0e-3,
            overflow_threshold: 100.0,
        }
    }
}

impl CrossSectionWindow {
    pub fn validate(&self) -> Result<(), CrossSectionWindowError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(CrossSectionWindowError::InvalidStep { step: self.step });
        }
        for (name, value) in [
            ("belowBarrier", self.below_barrier),
            ("aboveBarrier", self.above_barrier),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CrossSectionWindowError::InvalidExtent { name, value });
            }
        }
        if !(self.sigma_floor.is_finite() && self.sigma_floor > 0.0) {
            return Err(CrossSectionWindowError::InvalidFloor {
                floor: self.sigma_floor,
            });
        }
        if !self.overflow_threshold.is_finite() {
            return Err(CrossSectionWindowError::InvalidThreshold {
                threshold: self.overflow_threshold,
            });
        }
        if self.sample_count().is_none() {
            return Err(CrossSectionWindowError::TooManySamples {
                steps: (self.below_barrier + self.above_barrier) / self.step,
                limit: MAX_SAMPLES,
            });
        }
        Ok(())
    }

    /// Number of grid points from start to end inclusive, `None` past [`MAX_SAMPLES`].
    fn sample_count(&self) -> Option<usize> {
        let span = (self.below_barrier + self.above_barrier) / self.step;
        // tolerate a span that lands a hair below an integer
        let steps = (span + 1.0e-9).floor();
        if !(steps >= 0.0 && steps < MAX_SAMPLES as f64) {
            return None;
        }
        Some(steps as usize + 1)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CrossSectionWindowError {
    #[error("step must be finite and > 0, got {step}")]
    InvalidStep { step: f64 },
    #[error("{name} must be finite and >= 0, got {value}")]
    InvalidExtent { name: &'static str, value: f64 },
    #[error("sigmaFloor must be finite and > 0, got {floor}")]
    InvalidFloor { floor: f64 },
    #[error("overflowThreshold must be finite, got {threshold}")]
    InvalidThreshold { threshold: f64 },
    #[error("window spans {steps} steps, over the limit of {limit} samples")]
    TooManySamples { steps: f64, limit: usize },
}

fn usable_barrier(barrier: &BarrierResult) -> bool {
    [barrier.vb, barrier.rb, barrier.hw]
        .iter()
        .all(|value| value.is_finite() && *value > 0.0)
}

/// σ at one center-of-mass energy in mb, before the floor is applied.
///
/// `None` for non-positive energies or an unusable barrier.
pub fn wong_cross_section(
    barrier: &BarrierResult,
    e_cm: f64,
    overflow_threshold: f64,
) -> Option<f64> {
    if !usable_barrier(barrier) || !(e_cm.is_finite() && e_cm > 0.0) {
        return None;
    }
    let x = PI2 * (e_cm - barrier.vb) / barrier.hw;
    let penetration = log_one_plus_exp(x, overflow_threshold);
    Some(PI * barrier.rb * barrier.rb * (barrier.hw / e_cm) * penetration * MB_PER_FM2)
}

/// Floored σ at a single energy with the given window's guards.
pub fn cross_section_at(
    barrier: &BarrierResult,
    e_cm: f64,
    window: &CrossSectionWindow,
) -> Option<f64> {
    wong_cross_section(barrier, e_cm, window.overflow_threshold)
        .map(|sigma| sigma.max(window.sigma_floor))
}

/// σ(E_cm) sampled on `[V_B − below, V_B + above]` with a fixed step.
///
/// An unusable barrier (any parameter non-positive or non-finite) produces an
/// empty series; energies at or below zero are skipped.
pub fn cross_section_curve(
    barrier: &BarrierResult,
    window: &CrossSectionWindow,
) -> Vec<CrossSectionSample> {
    if !usable_barrier(barrier) {
        tracing::debug!(?barrier, "barrier not usable, no cross-section samples");
        return Vec::new();
    }
    if let Err(error) = window.validate() {
        tracing::warn!(%error, "invalid cross-section window, no samples");
        return Vec::new();
    }
    let Some(count) = window.sample_count() else {
        return Vec::new();
    };

    let start = barrier.vb - window.below_barrier;
    (0..count)
        .map(|index| start + index as f64 * window.step)
        .filter_map(|e_cm| {
            cross_section_at(barrier, e_cm, window)
                .map(|sigma| CrossSectionSample { e_cm, sigma })
        })
        .collect()
}
