//! Q-value and E_lab / E_cm / E* conversion.
//!
//! Non-relativistic kinematics: E_cm = At/(Ap + At)·E_lab and E* = E_cm + Q.

use super::tables::{MassExcessRecord, NuclideLookup};
use crate::domain::{DrivingField, EnergyTriple, Nuclide, ReactionSystem};

/// Preferred mass excess of `nuclide`, or `None` on a miss.
pub fn mass_excess(
    masses: &impl NuclideLookup<MassExcessRecord>,
    nuclide: Nuclide,
) -> Option<f64> {
    if !nuclide.is_present() {
        return None;
    }
    masses.lookup(nuclide)?.preferred()
}

/// Q = M(projectile) + M(target) − M(compound), or `None` if any mass is unknown.
pub fn q_value(
    masses: &impl NuclideLookup<MassExcessRecord>,
    reaction: &ReactionSystem,
) -> Option<f64> {
    if !reaction.is_complete() {
        return None;
    }
    let projectile = mass_excess(masses, reaction.projectile());
    let target = mass_excess(masses, reaction.target());
    let compound = reaction
        .compound()
        .and_then(|compound| mass_excess(masses, compound));

    match (projectile, target, compound) {
        (Some(projectile), Some(target), Some(compound)) => Some(projectile + target - compound),
        _ => {
            tracing::debug!(
                ?reaction,
                projectile = projectile.is_some(),
                target = target.is_some(),
                compound = compound.is_some(),
                "mass excess not found, Q-value unavailable"
            );
            None
        }
    }
}

/// Derives the full energy triple from one driving field.
///
/// Returns `None` when Q is unknown, either mass number is zero, the value
/// is not finite, or the driving field is [`DrivingField::None`].
pub fn convert_energy(
    field: DrivingField,
    value: f64,
    ap: u32,
    at: u32,
    q: Option<f64>,
) -> Option<EnergyTriple> {
    let q = q.filter(|q| q.is_finite())?;
    if ap == 0 || at == 0 || !value.is_finite() {
        return None;
    }
    let ap = f64::from(ap);
    let at = f64::from(at);
    let lab_to_cm = at / (ap + at);

    let (e_lab, e_cm, e_star) = match field {
        DrivingField::None => return None,
        DrivingField::Elab => {
            let e_cm = lab_to_cm * value;
            (value, e_cm, e_cm + q)
        }
        DrivingField::Ecm => ((ap + at) / at * value, value, value + q),
        DrivingField::EStar => {
            let e_cm = value - q;
            ((ap + at) / at * e_cm, e_cm, value)
        }
    };

    Some(EnergyTriple {
        driving: field,
        e_lab,
        e_cm,
        e_star,
        q,
    })
}

/// Single-writer state for the three mutually derived energy fields.
///
/// Exactly one field drives at a time; editing it recomputes the other two,
/// clearing any field clears all three and resets the driver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyConverter {
    ap: u32,
    at: u32,
    q: Option<f64>,
    driving: DrivingField,
    driving_value: Option<f64>,
    triple: Option<EnergyTriple>,
}

impl EnergyConverter {
    pub fn new(ap: u32, at: u32, q: Option<f64>) -> Self {
        Self {
            ap,
            at,
            q,
            ..Self::default()
        }
    }

    pub fn for_reaction(
        masses: &impl NuclideLookup<MassExcessRecord>,
        reaction: &ReactionSystem,
    ) -> Self {
        Self::new(reaction.ap, reaction.at, q_value(masses, reaction))
    }

    pub fn q_value(&self) -> Option<f64> {
        self.q
    }

    pub fn driving_field(&self) -> DrivingField {
        self.driving
    }

    /// The driver's raw value, kept even while the derived fields are unavailable.
    pub fn driving_value(&self) -> Option<f64> {
        self.driving_value
    }

    pub fn triple(&self) -> Option<EnergyTriple> {
        self.triple
    }

    /// Sets `field` to `value` (`None` clears) and returns the derived triple.
    pub fn edit(&mut self, field: DrivingField, value: Option<f64>) -> Option<EnergyTriple> {
        match (field, value) {
            (DrivingField::None, _) | (_, None) => self.clear(),
            (field, Some(value)) => {
                self.driving = field;
                self.driving_value = Some(value);
                self.recompute();
            }
        }
        self.triple
    }

    pub fn clear(&mut self) {
        self.driving = DrivingField::None;
        self.driving_value = None;
        self.triple = None;
    }

    /// Replaces the cached Q-value and re-derives from the current driver.
    pub fn set_q_value(&mut self, q: Option<f64>) -> Option<EnergyTriple> {
        self.q = q;
        self.recompute();
        self.triple
    }

    fn recompute(&mut self) {
        self.triple = self
            .driving_value
            .and_then(|value| convert_energy(self.driving, value, self.ap, self.at, self.q));
    }
}

#[cfg(test)]
mod tests {
    use super::{EnergyConverter, convert_energy, q_value};
    use crate::domain::{DrivingField, Nuclide, ReactionSystem};
    use crate::modules::tables::{MassExcessRecord, MassExcessTable};

    fn masses() -> MassExcessTable {
        [
            ((20, 48), Some(-44.224), None),
            ((82, 208), Some(-21.749), None),
            ((102, 256), None, Some(87.82)),
        ]
        .into_iter()
        .map(|((z, a), mexp, mth)| (Nuclide::new(z, a), MassExcessRecord { mexp, mth }))
        .collect()
    }

    #[test]
    fn q_value_uses_preferred_masses() {
        let q = q_value(&masses(), &ReactionSystem::new(20, 48, 82, 208))
            .expect("all masses are tabulated");
        assert!((q - (-44.224 - 21.749 - 87.82)).abs() <= 1.0e-12);
    }

    #[test]
    fn q_value_is_unavailable_when_compound_is_missing() {
        assert!(q_value(&masses(), &ReactionSystem::new(20, 48, 82, 207)).is_none());
        assert!(q_value(&masses(), &ReactionSystem::new(20, 48, 0, 208)).is_none());
    }

    #[test]
    fn overflowing_compound_leaves_q_unknown() {
        let empty = MassExcessTable::new();
        assert!(q_value(&empty, &ReactionSystem::new(u32::MAX, 10, 1, 10)).is_none());
        assert!(q_value(&masses(), &ReactionSystem::new(20, u32::MAX, 82, 208)).is_none());
    }

    #[test]
    fn conversion_requires_q_and_masses() {
        assert!(convert_energy(DrivingField::Elab, 240.0, 48, 208, None).is_none());
        assert!(convert_energy(DrivingField::Elab, 240.0, 48, 0, Some(-150.0)).is_none());
        assert!(convert_energy(DrivingField::Elab, f64::NAN, 48, 208, Some(-150.0)).is_none());
        assert!(convert_energy(DrivingField::None, 240.0, 48, 208, Some(-150.0)).is_none());
    }

    #[test]
    fn elab_drives_ecm_and_excitation() {
        let triple = convert_energy(DrivingField::Elab, 256.0, 48, 208, Some(-153.0))
            .expect("conversion should succeed");
        assert_eq!(triple.driving, DrivingField::Elab);
        assert_eq!(triple.e_lab, 256.0);
        assert_eq!(triple.e_cm, 208.0);
        assert_eq!(triple.e_star, 55.0);
    }

    #[test]
    fn excitation_drives_back_to_lab_frame() {
        let triple = convert_energy(DrivingField::EStar, 55.0, 48, 208, Some(-153.0))
            .expect("conversion should succeed");
        assert_eq!(triple.e_cm, 208.0);
        assert!((triple.e_lab - 256.0).abs() <= 1.0e-9);
    }

    #[test]
    fn converter_switches_driver_and_clears_everything() {
        let mut converter = EnergyConverter::new(48, 208, Some(-153.0));
        assert_eq!(converter.driving_field(), DrivingField::None);

        let from_lab = converter
            .edit(DrivingField::Elab, Some(256.0))
            .expect("lab energy should convert");
        assert_eq!(from_lab.e_cm, 208.0);

        let from_cm = converter
            .edit(DrivingField::Ecm, Some(200.0))
            .expect("cm energy should convert");
        assert_eq!(converter.driving_field(), DrivingField::Ecm);
        assert_eq!(from_cm.e_star, 47.0);
        assert!((from_cm.e_lab - 200.0 * 256.0 / 208.0).abs() <= 1.0e-12);

        assert!(converter.edit(DrivingField::Ecm, None).is_none());
        assert_eq!(converter.driving_field(), DrivingField::None);
        assert!(converter.triple().is_none());
        assert!(converter.driving_value().is_none());
    }

    #[test]
    fn unknown_q_suppresses_derived_fields_until_provided() {
        let mut converter = EnergyConverter::new(48, 208, None);
        assert!(converter.edit(DrivingField::Elab, Some(256.0)).is_none());
        assert_eq!(converter.driving_field(), DrivingField::Elab);

        let triple = converter
            .set_q_value(Some(-153.0))
            .expect("Q-value should unlock the conversion");
        assert_eq!(triple.e_star, 55.0);
    }
}
