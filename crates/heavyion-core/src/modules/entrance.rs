//! Entrance-channel asymmetry and fissility parameters.
//!
//! Each quantity depends only on the nucleon numbers it needs, so a missing
//! projectile mass still leaves the charge-only quantities available.

use crate::common::constants::{SURFACE_ASYMMETRY, SURFACE_ENERGY_COEFF};
use crate::domain::ReactionSystem;
use crate::numerics::{cube_root_sum, round_to};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EntranceChannelParameters {
    /// |Ap − At| / (Ap + At)
    pub mass_asymmetry: Option<f64>,
    /// |Zp − Zt| / (Zp + Zt)
    pub charge_asymmetry: Option<f64>,
    pub charge_product: Option<f64>,
    /// Zp·Zt / (∛Ap + ∛At)
    pub coulomb_parameter: Option<f64>,
    pub projectile_n_over_z: Option<f64>,
    pub target_n_over_z: Option<f64>,
    pub isospin_asymmetry: Option<f64>,
    pub mean_fissility: Option<f64>,
    pub effective_fissility: Option<f64>,
}

impl EntranceChannelParameters {
    pub fn rounded(&self, decimals: u32) -> Self {
        let round = |value: Option<f64>| value.map(|value| round_to(value, decimals));
        Self {
            mass_asymmetry: round(self.mass_asymmetry),
            charge_asymmetry: round(self.charge_asymmetry),
            charge_product: round(self.charge_product),
            coulomb_parameter: round(self.coulomb_parameter),
            projectile_n_over_z: round(self.projectile_n_over_z),
            target_n_over_z: round(self.target_n_over_z),
            isospin_asymmetry: round(self.isospin_asymmetry),
            mean_fissility: round(self.mean_fissility),
            effective_fissility: round(self.effective_fissility),
        }
    }
}

pub fn entrance_channel_parameters(reaction: &ReactionSystem) -> EntranceChannelParameters {
    let zp = present(reaction.zp);
    let ap = present(reaction.ap);
    let zt = present(reaction.zt);
    let at = present(reaction.at);

    let mass_asymmetry = ap.zip(at).map(|(ap, at)| (ap - at).abs() / (ap + at));
    let charge_asymmetry = zp.zip(zt).map(|(zp, zt)| (zp - zt).abs() / (zp + zt));
    let charge_product = zp.zip(zt).map(|(zp, zt)| zp * zt);
    let projectile_n_over_z = zp.zip(ap).map(|(z, a)| n_over_z(z, a));
    let target_n_over_z = zt.zip(at).map(|(z, a)| n_over_z(z, a));
    let isospin_asymmetry = projectile_n_over_z
        .zip(target_n_over_z)
        .map(|(projectile, target)| (projectile - target).abs());

    let mut parameters = EntranceChannelParameters {
        mass_asymmetry,
        charge_asymmetry,
        charge_product,
        projectile_n_over_z,
        target_n_over_z,
        isospin_asymmetry,
        ..EntranceChannelParameters::default()
    };

    if let (Some(zp), Some(ap), Some(zt), Some(at)) = (zp, ap, zt, at) {
        let radius_sum = cube_root_sum(ap, at);
        parameters.coulomb_parameter = Some(zp * zt / radius_sum);

        let z_total = zp + zt;
        let a_total = ap + at;
        let a_s = surface_energy_coefficient(a_total, z_total);
        // Coulomb-to-surface ratio of the touching configuration
        let contact = 4.0 * zp * zt / (radius_sum * (ap * at).cbrt());

        parameters.effective_fissility = finite(contact / a_s);
        parameters.mean_fissility =
            finite((2.0 * z_total * z_total / a_total) / (3.0 * a_s) + contact / (3.0 * a_s));
    }

    parameters
}

/// Liquid-drop surface-energy coefficient a_s(A, Z) in MeV.
pub fn surface_energy_coefficient(a: f64, z: f64) -> f64 {
    let asymmetry = (a - 2.0 * z) / a;
    SURFACE_ENERGY_COEFF * (1.0 - SURFACE_ASYMMETRY * asymmetry * asymmetry)
}

fn n_over_z(z: f64, a: f64) -> f64 {
    (a - z) / z
}

fn present(value: u32) -> Option<f64> {
    (value != 0).then(|| f64::from(value))
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
