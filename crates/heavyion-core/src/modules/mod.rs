pub mod barrier;
pub mod cross_section;
pub mod energy;
pub mod entrance;
pub mod serialization;
pub mod summary;
pub mod tables;

pub use barrier::{BarrierModel, barrier, barrier_by_key, compare_all_barriers};
pub use cross_section::{
    CrossSectionWindow, CrossSectionWindowError, cross_section_at, cross_section_curve,
};
pub use energy::{EnergyConverter, convert_energy, q_value};
pub use entrance::{EntranceChannelParameters, entrance_channel_parameters};
pub use summary::{ReactionSummary, reaction_summary};
pub use tables::{
    DeformationRecord, DeformationTable, MassExcessRecord, MassExcessTable, NuclideLookup,
    NuclideTable, TableError,
};
