pub mod models;

use crate::domain::{BarrierResult, HeavyIonError, HeavyIonResult, ReactionSystem};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The registered fusion-barrier models, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierModel {
    Bass,
    DuttPuri,
    Manjunatha,
    Actinide,
    Adamian,
    AroraPuriGupta,
    WoodsSaxon,
    Proximity,
}

impl BarrierModel {
    pub const ALL: [Self; 8] = [
        Self::Bass,
        Self::DuttPuri,
        Self::Manjunatha,
        Self::Actinide,
        Self::Adamian,
        Self::AroraPuriGupta,
        Self::WoodsSaxon,
        Self::Proximity,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Bass => "bass",
            Self::DuttPuri => "dutt",
            Self::Manjunatha => "manju",
            Self::Actinide => "acti",
            Self::Adamian => "adam",
            Self::AroraPuriGupta => "arora",
            Self::WoodsSaxon => "ws",
            Self::Proximity => "prox",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bass => "Bass (1973)",
            Self::DuttPuri => "Dutt–Puri (2010)",
            Self::Manjunatha => "Manjunatha (2018)",
            Self::Actinide => "Actinide (2018)",
            Self::Adamian => "Adamian (2003)",
            Self::AroraPuriGupta => "Arora–Puri–Gupta (2000)",
            Self::WoodsSaxon => "Woods–Saxon",
            Self::Proximity => "Proximity",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim();
        Self::ALL
            .into_iter()
            .find(|model| model.key().eq_ignore_ascii_case(normalized))
    }

    pub fn evaluate(self, reaction: &ReactionSystem) -> BarrierResult {
        let kernel: fn(&ReactionSystem) -> BarrierResult = match self {
            Self::Bass => models::bass,
            Self::DuttPuri => models::dutt_puri,
            Self::Manjunatha => models::manjunatha,
            Self::Actinide => models::actinide,
            Self::Adamian => models::adamian,
            Self::AroraPuriGupta => models::arora_puri_gupta,
            Self::WoodsSaxon => models::woods_saxon,
            Self::Proximity => models::proximity,
        };
        kernel(reaction)
    }
}

impl Display for BarrierModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BarrierModel {
    type Err = HeavyIonError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::from_key(key).ok_or_else(|| {
            let known = Self::ALL.map(Self::key).join(", ");
            HeavyIonError::input_validation(
                "INPUT.BARRIER_MODEL",
                format!("unknown barrier model '{key}'; expected one of: {known}"),
            )
        })
    }
}

pub fn barrier(model: BarrierModel, reaction: &ReactionSystem) -> BarrierResult {
    model.evaluate(reaction)
}

/// Dispatch by registry key. An unknown key is a caller error, never a default.
pub fn barrier_by_key(key: &str, reaction: &ReactionSystem) -> HeavyIonResult<BarrierResult> {
    let model = key.parse::<BarrierModel>()?;
    Ok(model.evaluate(reaction))
}

pub fn compare_all_barriers(reaction: &ReactionSystem) -> Vec<(BarrierModel, BarrierResult)> {
    BarrierModel::ALL
        .into_iter()
        .map(|model| (model, model.evaluate(reaction)))
        .collect()
}
