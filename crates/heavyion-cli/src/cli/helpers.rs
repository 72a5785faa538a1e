use super::{CliError, GlobalFlags};
use anyhow::Context;
use heavyion_core::common::config::{EngineConfig, load_engine_config};
use heavyion_core::domain::{BarrierResult, HeavyIonError, ReactionSystem};
use heavyion_core::modules::barrier::BarrierModel;
use heavyion_core::modules::tables::{
    DeformationTable, MassExcessTable, load_deformation_table, load_mass_excess_table,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub(super) const LOG_ENV_VAR: &str = "HEAVYION_LOG";

#[derive(Debug, Clone)]
pub(super) struct RunContext {
    pub(super) config: EngineConfig,
    pub(super) json: bool,
}

impl RunContext {
    pub(super) fn precision(&self) -> u32 {
        self.config.output_precision
    }

    pub(super) fn text_precision(&self) -> usize {
        self.config.output_precision as usize
    }
}

pub(super) fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // a second install in the same process keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(super) fn load_run_context(global: &GlobalFlags) -> Result<RunContext, CliError> {
    let config = match &global.config {
        Some(path) => {
            let config = load_engine_config(path).map_err(HeavyIonError::from)?;
            tracing::info!(path = %path.display(), "loaded engine config");
            config
        }
        None => EngineConfig::default(),
    };

    Ok(RunContext {
        config,
        json: global.json,
    })
}

/// Command-line path first, then the configured one.
pub(super) fn resolve_table_path(
    flag: Option<&Path>,
    configured: Option<&PathBuf>,
) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| configured.cloned())
}

pub(super) fn load_deformations(path: Option<&Path>) -> Result<DeformationTable, CliError> {
    match path {
        Some(path) => Ok(load_deformation_table(path).map_err(HeavyIonError::from)?),
        None => Ok(DeformationTable::new()),
    }
}

pub(super) fn load_masses(path: &Path) -> Result<MassExcessTable, CliError> {
    Ok(load_mass_excess_table(path).map_err(HeavyIonError::from)?)
}

pub(super) fn resolve_model(key: &str) -> Result<BarrierModel, CliError> {
    Ok(key.parse::<BarrierModel>()?)
}

/// Barrier given on the command line, bypassing the model registry.
pub(super) fn manual_barrier(
    vb: Option<f64>,
    rb: Option<f64>,
    hw: Option<f64>,
) -> Result<Option<BarrierResult>, CliError> {
    match (vb, rb, hw) {
        (None, None, None) => Ok(None),
        (Some(vb), Some(rb), Some(hw)) => Ok(Some(BarrierResult::new(vb, rb, hw))),
        _ => Err(CliError::Usage(
            "--vb, --rb and --hw must be given together".to_string(),
        )),
    }
}

pub(super) fn reaction_heading(reaction: &ReactionSystem) -> String {
    reaction
        .label()
        .unwrap_or_else(|| "incomplete reaction".to_string())
}

pub(super) fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(value).context("failed to serialize JSON output")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{manual_barrier, resolve_table_path};
    use heavyion_core::domain::BarrierResult;
    use std::path::{Path, PathBuf};

    #[test]
    fn flag_path_wins_over_configured_path() {
        let configured = PathBuf::from("config-masses.csv");
        let resolved = resolve_table_path(Some(Path::new("flag-masses.csv")), Some(&configured));
        assert_eq!(resolved, Some(PathBuf::from("flag-masses.csv")));
        assert_eq!(resolve_table_path(None, Some(&configured)), Some(configured));
        assert_eq!(resolve_table_path(None, None), None);
    }

    #[test]
    fn manual_barrier_requires_all_three_parameters() {
        assert_eq!(
            manual_barrier(Some(200.0), Some(11.0), Some(4.0)).expect("complete triple"),
            Some(BarrierResult::new(200.0, 11.0, 4.0))
        );
        assert!(manual_barrier(None, None, None).expect("absent triple").is_none());
        assert!(manual_barrier(Some(200.0), None, Some(4.0)).is_err());
    }
}
