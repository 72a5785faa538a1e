pub mod errors;

pub use errors::{HeavyIonError, HeavyIonErrorCategory, HeavyIonResult};

use crate::common::elements::{atomic_number_for_symbol, element_symbol};
use crate::numerics::round_to;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A nucleus keyed by proton number `z` and mass number `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Nuclide {
    pub z: u32,
    pub a: u32,
}

impl Nuclide {
    pub const fn new(z: u32, a: u32) -> Self {
        Self { z, a }
    }

    pub const fn is_present(self) -> bool {
        self.z != 0 && self.a != 0
    }

    /// Mass-number prefixed symbol such as `48Ca`; unknown elements fall back to `Z`.
    pub fn label(self) -> String {
        match element_symbol(self.z) {
            Some(symbol) => format!("{}{}", self.a, symbol),
            None => format!("{}{}", self.a, self.z),
        }
    }
}

impl Display for Nuclide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Nuclide {
    type Err = HeavyIonError;

    /// Parses mass-number prefixed notation such as `48Ca` or `208pb`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let split = trimmed
            .find(|character: char| !character.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (mass, symbol) = trimmed.split_at(split);

        let a = mass.parse::<u32>().ok().filter(|a| *a > 0);
        let z = atomic_number_for_symbol(symbol);
        match (z, a) {
            (Some(z), Some(a)) => Ok(Self::new(z, a)),
            _ => Err(HeavyIonError::input_validation(
                "INPUT.NUCLIDE",
                format!(
                    "invalid nuclide '{text}'; expected a mass number and symbol like '48Ca'"
                ),
            )),
        }
    }
}

/// Projectile and target of one reaction. A zero entry stands for a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ReactionSystem {
    pub zp: u32,
    pub ap: u32,
    pub zt: u32,
    pub at: u32,
}

impl ReactionSystem {
    pub const fn new(zp: u32, ap: u32, zt: u32, at: u32) -> Self {
        Self { zp, ap, zt, at }
    }

    pub const fn projectile(&self) -> Nuclide {
        Nuclide::new(self.zp, self.ap)
    }

    pub const fn target(&self) -> Nuclide {
        Nuclide::new(self.zt, self.at)
    }

    /// `(Zp + Zt, Ap + At)`, or `None` when either sum overflows `u32`.
    pub const fn compound(&self) -> Option<Nuclide> {
        match (self.zp.checked_add(self.zt), self.ap.checked_add(self.at)) {
            (Some(z), Some(a)) => Some(Nuclide::new(z, a)),
            _ => None,
        }
    }

    pub const fn is_complete(&self) -> bool {
        self.zp != 0 && self.ap != 0 && self.zt != 0 && self.at != 0
    }

    /// `48Ca + 208Pb -> 256No`, or `None` while any nucleon number is missing.
    pub fn label(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        let compound = self.compound()?;
        Some(format!(
            "{} + {} -> {}",
            self.projectile(),
            self.target(),
            compound
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarrierResult {
    /// Barrier height in MeV.
    pub vb: f64,
    /// Barrier radius in fm.
    pub rb: f64,
    /// Barrier curvature in MeV.
    pub hw: f64,
}

impl BarrierResult {
    pub const ZERO: Self = Self {
        vb: 0.0,
        rb: 0.0,
        hw: 0.0,
    };

    pub const fn new(vb: f64, rb: f64, hw: f64) -> Self {
        Self { vb, rb, hw }
    }

    pub fn is_zero(&self) -> bool {
        self.vb == 0.0 && self.rb == 0.0 && self.hw == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.vb.is_finite() && self.rb.is_finite() && self.hw.is_finite()
    }

    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            vb: round_to(self.vb, decimals),
            rb: round_to(self.rb, decimals),
            hw: round_to(self.hw, decimals),
        }
    }
}

/// The energy field currently acting as the independent variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingField {
    #[default]
    None,
    Elab,
    Ecm,
    EStar,
}

impl DrivingField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Elab => "elab",
            Self::Ecm => "ecm",
            Self::EStar => "estar",
        }
    }
}

impl Display for DrivingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyTriple {
    pub driving: DrivingField,
    pub e_lab: f64,
    pub e_cm: f64,
    pub e_star: f64,
    pub q: f64,
}

impl EnergyTriple {
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            driving: self.driving,
            e_lab: round_to(self.e_lab, decimals),
            e_cm: round_to(self.e_cm, decimals),
            e_star: round_to(self.e_star, decimals),
            q: round_to(self.q, decimals),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionSample {
    /// Center-of-mass energy in MeV.
    pub e_cm: f64,
    /// Fusion cross section in mb.
    pub sigma: f64,
}

#[cfg(test)]
mod tests {
    use super::{BarrierResult, Nuclide, ReactionSystem};

    #[test]
    fn reaction_label_uses_element_symbols() {
        let reaction = ReactionSystem::new(20, 48, 82, 208);
        assert_eq!(reaction.compound(), Some(Nuclide::new(102, 256)));
        assert_eq!(reaction.label().as_deref(), Some("48Ca + 208Pb -> 256No"));
    }

    #[test]
    fn incomplete_reaction_has_no_label() {
        let reaction = ReactionSystem::new(20, 48, 0, 208);
        assert!(!reaction.is_complete());
        assert!(reaction.label().is_none());
    }

    #[test]
    fn overflowing_compound_has_no_nuclide_or_label() {
        let reaction = ReactionSystem::new(u32::MAX, 10, 1, 10);
        assert!(reaction.is_complete());
        assert_eq!(reaction.compound(), None);
        assert!(reaction.label().is_none());
        assert_eq!(ReactionSystem::new(1, u32::MAX, 1, 1).compound(), None);
    }

    #[test]
    fn nuclide_notation_parses_mass_and_symbol() {
        assert_eq!("48Ca".parse::<Nuclide>(), Ok(Nuclide::new(20, 48)));
        assert_eq!(" 208pb ".parse::<Nuclide>(), Ok(Nuclide::new(82, 208)));
        assert_eq!("238U".parse::<Nuclide>(), Ok(Nuclide::new(92, 238)));

        for invalid in ["Ca", "48", "48Xx", "0Ca", ""] {
            let error = invalid
                .parse::<Nuclide>()
                .expect_err("malformed nuclide should fail");
            assert_eq!(error.placeholder(), "INPUT.NUCLIDE");
        }
    }

    #[test]
    fn unknown_element_label_falls_back_to_proton_number() {
        assert_eq!(Nuclide::new(130, 330).label(), "330130");
    }

    #[test]
    fn barrier_rounding_keeps_three_decimals() {
        let rounded = BarrierResult::new(214.078_216, 10.768_38, 3.606_805).rounded(3);
        assert_eq!(rounded, BarrierResult::new(214.078, 10.768, 3.607));
        assert!(BarrierResult::ZERO.is_zero());
    }
}
