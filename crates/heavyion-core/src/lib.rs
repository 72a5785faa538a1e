pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;

pub use domain::{
    BarrierResult, CrossSectionSample, DrivingField, EnergyTriple, HeavyIonError,
    HeavyIonErrorCategory, HeavyIonResult, Nuclide, ReactionSystem,
};
