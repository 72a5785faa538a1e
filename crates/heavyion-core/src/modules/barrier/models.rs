//! Phenomenological fusion-barrier parametrisations.
//!
//! Every function guards its own input: an incomplete reaction yields
//! [`BarrierResult::ZERO`] because callers pass through partially edited
//! states continuously.

use crate::common::constants::{
    CURVATURE_FLOOR, CURVATURE_PREFACTOR, E2, PROXIMITY_GAMMA0, SURFACE_ASYMMETRY,
};
use crate::domain::{BarrierResult, ReactionSystem};

#[derive(Debug, Clone, Copy)]
struct Nucleons {
    zp: f64,
    ap: f64,
    zt: f64,
    at: f64,
}

impl Nucleons {
    fn from_reaction(reaction: &ReactionSystem) -> Option<Self> {
        reaction.is_complete().then(|| Self {
            zp: f64::from(reaction.zp),
            ap: f64::from(reaction.ap),
            zt: f64::from(reaction.zt),
            at: f64::from(reaction.at),
        })
    }

    fn charge_product(&self) -> f64 {
        self.zp * self.zt
    }

    fn radius_sum(&self) -> f64 {
        self.ap.cbrt() + self.at.cbrt()
    }

    /// Zp·Zt / (∛Ap + ∛At), the argument of the polynomial fits.
    fn coulomb_parameter(&self) -> f64 {
        self.charge_product() / self.radius_sum()
    }

    /// ħω = 0.065·Zp·Zt / (∛Ap + ∛At)^1.5
    fn empirical_curvature(&self) -> f64 {
        CURVATURE_PREFACTOR * self.charge_product() / self.radius_sum().powf(1.5)
    }

    fn point_coulomb(&self, radius: f64) -> f64 {
        E2 * self.charge_product() / radius
    }
}

fn evaluate(
    reaction: &ReactionSystem,
    kernel: impl FnOnce(&Nucleons) -> BarrierResult,
) -> BarrierResult {
    let Some(nucleons) = Nucleons::from_reaction(reaction) else {
        tracing::debug!(?reaction, "incomplete reaction, returning zero barrier");
        return BarrierResult::ZERO;
    };
    let result = kernel(&nucleons);
    if result.is_finite() {
        result
    } else {
        tracing::warn!(?reaction, ?result, "non-finite barrier, returning zero barrier");
        BarrierResult::ZERO
    }
}

fn cubic(coefficients: [f64; 4], x: f64) -> f64 {
    let [c3, c2, c1, c0] = coefficients;
    ((c3 * x + c2) * x + c1) * x + c0
}

fn floor_curvature(hw: f64) -> f64 {
    if hw < 0.0 { CURVATURE_FLOOR } else { hw }
}

/// Dutt–Puri half-density radius C_i = 1.28∛A − 0.76 + 0.8/∛A.
fn dutt_radius(a: f64) -> f64 {
    let cube_root = a.cbrt();
    1.28 * cube_root - 0.76 + 0.8 / cube_root
}

/// Süssmann central radius C = R(1 − b²/R²) with b = 1 fm.
fn central_radius(radius: f64) -> f64 {
    radius * (1.0 - 1.0 / (radius * radius))
}

/// Liquid-drop radius with isospin and curvature corrections.
fn manjunatha_radius(a: f64, z: f64) -> f64 {
    let r00 = 1.24 * a.cbrt() * (1.0 + 1.646 / a - 0.191 * ((a - 2.0 * z) / a));
    let r0 = r00 * (1.0 - 3.5 / (r00 * r00));
    central_radius(r0)
}

/// Bass (1973).
pub fn bass(reaction: &ReactionSystem) -> BarrierResult {
    evaluate(reaction, |n| {
        let radius_sum = n.radius_sum();
        let rb = 1.07 * radius_sum + 0.54;
        let vb = n.point_coulomb(rb) - 50.0 / radius_sum;
        BarrierResult::new(vb, rb, n.empirical_curvature())
    })
}

/// Dutt–Puri (2010), proximity 1977 parametrisation.
pub fn dutt_puri(reaction: &ReactionSystem) -> BarrierResult {
    const ALPHA: f64 = 5.18419;
    const BETA: f64 = 0.33979;
    const DELTA: f64 = 0.99903;

    evaluate(reaction, |n| {
        // (x − 2)^0.25 is undefined below x = 2
        let excess = (n.coulomb_parameter() - 2.0).max(0.0);
        let separation = ALPHA * (-BETA * excess.powf(0.25)).exp();
        let rb = dutt_radius(n.ap) + dutt_radius(n.at) + separation;
        let vb = DELTA * n.point_coulomb(rb) * (1.0 - 0.75 / rb) * 0.95;
        BarrierResult::new(vb, rb, n.empirical_curvature())
    })
}

/// Manjunatha (2018).
pub fn manjunatha(reaction: &ReactionSystem) -> BarrierResult {
    evaluate(reaction, |n| {
        let x = n.coulomb_parameter();
        let separation = cubic([-1.236e-7, 7.774e-5, -2.324e-2, 3.759], x);
        let rb = separation + manjunatha_radius(n.ap, n.zp) + manjunatha_radius(n.at, n.zt);
        let vb = 1.4057 * (n.charge_product() / rb) * (1.0 - 1.0 / rb) + 5.4746;
        let hw = floor_curvature(cubic([-3.34e-7, 1.39e-4, -2.37e-2, 5.67], x));
        BarrierResult::new(vb, rb, hw)
    })
}

/// Actinide-target systematics (2018).
pub fn actinide(reaction: &ReactionSystem) -> BarrierResult {
    evaluate(reaction, |n| {
        let x = n.coulomb_parameter();
        let separation = cubic([-1.79e-7, 1.05e-4, -2.76e-2, 3.98], x);
        let rb = separation
            + central_radius(dutt_radius(n.ap))
            + central_radius(dutt_radius(n.at));
        let vb = 1.435 * (n.charge_product() / rb) * (1.0 - 1.0 / rb) + 1.866;
        let hw = floor_curvature(cubic([1.46e-7, -9.4e-5, 1.02e-2, -4.02], x));
        BarrierResult::new(vb, rb, hw)
    })
}

/// Adamian (2003).
pub fn adamian(reaction: &ReactionSystem) -> BarrierResult {
    evaluate(reaction, |n| {
        let rb = 1.25 * n.radius_sum();
        BarrierResult::new(n.point_coulomb(rb), rb, 4.0)
    })
}

/// Arora–Puri–Gupta (2000); the radius depends on the projectile mass alone.
pub fn arora_puri_gupta(reaction: &ReactionSystem) -> BarrierResult {
    evaluate(reaction, |n| {
        let rb = cubic([1.567e-11, -1.182e-6, 3.076e-3, 7.359], n.ap);
        let hw = 4.5 - 0.002 * n.charge_product();
        BarrierResult::new(n.point_coulomb(rb), rb, hw)
    })
}

/// Coulomb plus Woods–Saxon nuclear term at the touching radius.
pub fn woods_saxon(reaction: &ReactionSystem) -> BarrierResult {
    const R0: f64 = 1.2;
    const DIFFUSENESS: f64 = 0.65;
    const DEPTH: f64 = 50.0;

    evaluate(reaction, |n| {
        let rb = R0 * n.radius_sum();
        let vb = n.point_coulomb(rb) + DEPTH * (-rb / DIFFUSENESS).exp();
        BarrierResult::new(vb, rb, n.empirical_curvature())
    })
}

/// Coulomb barrier reduced by a proximity surface term.
pub fn proximity(reaction: &ReactionSystem) -> BarrierResult {
    const R0: f64 = 1.17;

    evaluate(reaction, |n| {
        let asymmetry = (n.ap - 2.0 * n.zp) / n.ap;
        let gamma = PROXIMITY_GAMMA0 * (1.0 - SURFACE_ASYMMETRY * asymmetry * asymmetry);
        let c1 = R0 * n.ap.cbrt() + 0.5;
        let c2 = R0 * n.at.cbrt() + 0.5;
        let rb = c1 + c2;
        let vb = n.point_coulomb(rb) - 0.01 * gamma * (c1 * c2) / (c1 + c2);
        BarrierResult::new(vb, rb, n.empirical_curvature())
    })
}
