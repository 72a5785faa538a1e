//! Physical and empirical constants shared by the barrier, energy and
//! cross-section kernels.

pub const PI: f64 = std::f64::consts::PI;
pub const PI2: f64 = 2.0 * PI;

/// Coulomb coupling e²/(4πε₀) in MeV·fm.
pub const E2: f64 = 1.44;

/// Unit conversion fm² → mb.
pub const MB_PER_FM2: f64 = 10.0;

/// Liquid-drop surface-energy coefficient a_s(A, Z) = A_S·(1 − K_S·I²), MeV.
pub const SURFACE_ENERGY_COEFF: f64 = 50.883;
/// Surface-asymmetry coefficient K_S shared by the fissility and proximity terms.
pub const SURFACE_ASYMMETRY: f64 = 1.7826;
/// Proximity surface tension prefactor γ₀ in MeV/fm².
pub const PROXIMITY_GAMMA0: f64 = 0.9517;

/// Empirical curvature prefactor ħω = C·Zp·Zt/(∛Ap + ∛At)^1.5.
pub const CURVATURE_PREFACTOR: f64 = 0.065;
/// Floor applied when a polynomial ħω fit turns negative.
pub const CURVATURE_FLOOR: f64 = 0.5;

pub const DEFAULT_OUTPUT_PRECISION: u32 = 3;
