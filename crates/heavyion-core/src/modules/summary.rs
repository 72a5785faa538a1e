//! Reaction overview: label, compound nucleus, entrance channel and deformations.

use super::entrance::{EntranceChannelParameters, entrance_channel_parameters};
use super::tables::{DeformationRecord, NuclideLookup};
use crate::domain::{Nuclide, ReactionSystem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionSummary {
    pub reaction: ReactionSystem,
    pub label: Option<String>,
    pub compound: Option<Nuclide>,
    pub entrance: EntranceChannelParameters,
    pub projectile_deformation: DeformationRecord,
    pub target_deformation: DeformationRecord,
}

impl ReactionSummary {
    pub fn rounded(mut self, decimals: u32) -> Self {
        self.entrance = self.entrance.rounded(decimals);
        self
    }
}

/// Deformation of `nuclide`; a miss or missing nucleus reads as both betas absent.
pub fn deformation_of(
    deformations: &impl NuclideLookup<DeformationRecord>,
    nuclide: Nuclide,
) -> DeformationRecord {
    if !nuclide.is_present() {
        return DeformationRecord::default();
    }
    deformations.lookup(nuclide).unwrap_or_default()
}

pub fn reaction_summary(
    reaction: &ReactionSystem,
    deformations: &impl NuclideLookup<DeformationRecord>,
) -> ReactionSummary {
    ReactionSummary {
        reaction: *reaction,
        label: reaction.label(),
        compound: reaction.is_complete().then(|| reaction.compound()).flatten(),
        entrance: entrance_channel_parameters(reaction),
        projectile_deformation: deformation_of(deformations, reaction.projectile()),
        target_deformation: deformation_of(deformations, reaction.target()),
    }
}
