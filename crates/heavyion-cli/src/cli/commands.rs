use super::CliError;
use super::helpers::*;
use heavyion_core::domain::{
    BarrierResult, CrossSectionSample, DrivingField, EnergyTriple, HeavyIonError, Nuclide,
    ReactionSystem,
};
use heavyion_core::modules::barrier::{BarrierModel, barrier, compare_all_barriers};
use heavyion_core::modules::cross_section::cross_section_curve;
use heavyion_core::modules::energy::EnergyConverter;
use heavyion_core::modules::serialization::{
    format_optional, render_barrier_table, render_cross_section_csv, write_text_artifact,
};
use heavyion_core::modules::summary::reaction_summary;
use heavyion_core::modules::tables::DeformationRecord;
use heavyion_core::numerics::round_to;
use serde::Serialize;
use std::path::PathBuf;

#[derive(clap::Args, Debug, Clone, Copy)]
pub(super) struct ReactionArgs {
    /// Projectile proton number (0 = not given)
    #[arg(long, default_value_t = 0)]
    zp: u32,

    /// Projectile mass number (0 = not given)
    #[arg(long, default_value_t = 0)]
    ap: u32,

    /// Target proton number (0 = not given)
    #[arg(long, default_value_t = 0)]
    zt: u32,

    /// Target mass number (0 = not given)
    #[arg(long, default_value_t = 0)]
    at: u32,

    /// Projectile in nuclide notation, e.g. 48Ca (replaces --zp/--ap)
    #[arg(long, conflicts_with_all = ["zp", "ap"])]
    projectile: Option<Nuclide>,

    /// Target in nuclide notation, e.g. 208Pb (replaces --zt/--at)
    #[arg(long, conflicts_with_all = ["zt", "at"])]
    target: Option<Nuclide>,
}

impl ReactionArgs {
    fn reaction(self) -> ReactionSystem {
        let projectile = self.projectile.unwrap_or(Nuclide::new(self.zp, self.ap));
        let target = self.target.unwrap_or(Nuclide::new(self.zt, self.at));
        ReactionSystem::new(projectile.z, projectile.a, target.z, target.a)
    }
}

#[derive(clap::Args)]
pub(super) struct EntranceArgs {
    #[command(flatten)]
    reaction: ReactionArgs,

    /// Deformation table (Z, A, beta2, beta4)
    #[arg(long)]
    deformation_table: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct BarrierArgs {
    #[command(flatten)]
    reaction: ReactionArgs,

    /// Barrier model key (bass, dutt, manju, acti, adam, arora, ws, prox)
    #[arg(long, default_value = "bass", conflicts_with = "all")]
    model: String,

    /// Evaluate every registered model
    #[arg(long)]
    all: bool,
}

#[derive(clap::Args)]
#[command(group(clap::ArgGroup::new("driver").required(true).args(["elab", "ecm", "estar"])))]
pub(super) struct EnergyArgs {
    #[command(flatten)]
    reaction: ReactionArgs,

    /// Mass-excess table (Z, A, Mexp, Mth)
    #[arg(long)]
    mass_table: Option<PathBuf>,

    /// Use this Q-value (MeV) instead of the mass table
    #[arg(long, allow_hyphen_values = true)]
    q_value: Option<f64>,

    /// Laboratory energy (MeV)
    #[arg(long, allow_hyphen_values = true)]
    elab: Option<f64>,

    /// Center-of-mass energy (MeV)
    #[arg(long, allow_hyphen_values = true)]
    ecm: Option<f64>,

    /// Compound-nucleus excitation energy (MeV)
    #[arg(long, allow_hyphen_values = true)]
    estar: Option<f64>,
}

impl EnergyArgs {
    fn driver(&self) -> (DrivingField, Option<f64>) {
        if self.elab.is_some() {
            (DrivingField::Elab, self.elab)
        } else if self.ecm.is_some() {
            (DrivingField::Ecm, self.ecm)
        } else {
            (DrivingField::EStar, self.estar)
        }
    }
}

#[derive(clap::Args)]
pub(super) struct CrossSectionArgs {
    #[command(flatten)]
    reaction: ReactionArgs,

    /// Barrier model key; ignored when --vb/--rb/--hw are given
    #[arg(long, default_value = "bass")]
    model: String,

    /// Barrier height (MeV)
    #[arg(long)]
    vb: Option<f64>,

    /// Barrier radius (fm)
    #[arg(long)]
    rb: Option<f64>,

    /// Barrier curvature (MeV)
    #[arg(long)]
    hw: Option<f64>,

    /// Write the series as CSV to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BarrierRow {
    model: &'static str,
    name: &'static str,
    #[serde(flatten)]
    barrier: BarrierResult,
}

impl BarrierRow {
    fn new(model: BarrierModel, barrier: BarrierResult) -> Self {
        Self {
            model: model.key(),
            name: model.display_name(),
            barrier,
        }
    }
}

#[derive(Debug, Serialize)]
struct BarrierReport {
    reaction: ReactionSystem,
    label: Option<String>,
    barriers: Vec<BarrierRow>,
}

#[derive(Debug, Serialize)]
struct EnergyReport {
    reaction: ReactionSystem,
    label: Option<String>,
    q_value: Option<f64>,
    driving: DrivingField,
    driving_value: Option<f64>,
    energies: Option<EnergyTriple>,
}

#[derive(Debug, Serialize)]
struct CrossSectionReport {
    model: Option<&'static str>,
    barrier: BarrierResult,
    output: Option<PathBuf>,
    samples: Vec<CrossSectionSample>,
}

pub(super) fn run_entrance_command(
    context: &RunContext,
    args: EntranceArgs,
) -> Result<i32, CliError> {
    let reaction = args.reaction.reaction();
    let table_path = resolve_table_path(
        args.deformation_table.as_deref(),
        context.config.deformation_table.as_ref(),
    );
    let deformations = load_deformations(table_path.as_deref())?;
    let summary = reaction_summary(&reaction, &deformations).rounded(context.precision());

    if context.json {
        print_json(&summary)?;
        return Ok(0);
    }

    let precision = context.text_precision();
    let entrance = &summary.entrance;
    println!("Reaction: {}", reaction_heading(&reaction));
    if let Some(compound) = summary.compound {
        println!("Compound nucleus: {compound} (Z = {}, A = {})", compound.z, compound.a);
    }
    for (name, value) in [
        ("Mass asymmetry", entrance.mass_asymmetry),
        ("Charge asymmetry", entrance.charge_asymmetry),
        ("Zp*Zt", entrance.charge_product),
        ("Coulomb parameter", entrance.coulomb_parameter),
        ("Projectile N/Z", entrance.projectile_n_over_z),
        ("Target N/Z", entrance.target_n_over_z),
        ("Isospin asymmetry", entrance.isospin_asymmetry),
        ("Mean fissility", entrance.mean_fissility),
        ("Effective fissility", entrance.effective_fissility),
    ] {
        println!("{name:<22}{}", format_optional(value, precision));
    }
    print_deformation("Projectile", summary.projectile_deformation, precision);
    print_deformation("Target", summary.target_deformation, precision);
    Ok(0)
}

fn print_deformation(role: &str, record: DeformationRecord, precision: usize) {
    println!(
        "{:<22}beta2 = {}, beta4 = {}",
        format!("{role} deformation"),
        format_optional(record.beta2, precision),
        format_optional(record.beta4, precision)
    );
}

pub(super) fn run_barrier_command(
    context: &RunContext,
    args: BarrierArgs,
) -> Result<i32, CliError> {
    let reaction = args.reaction.reaction();
    let results = if args.all {
        compare_all_barriers(&reaction)
    } else {
        let model = resolve_model(&args.model)?;
        vec![(model, barrier(model, &reaction))]
    };
    let results: Vec<_> = results
        .into_iter()
        .map(|(model, result)| (model, result.rounded(context.precision())))
        .collect();

    if results.iter().all(|(_, result)| result.is_zero()) {
        tracing::info!(?reaction, "incomplete reaction, barriers report the zero sentinel");
    }

    if context.json {
        print_json(&BarrierReport {
            reaction,
            label: reaction.label(),
            barriers: results
                .into_iter()
                .map(|(model, result)| BarrierRow::new(model, result))
                .collect(),
        })?;
        return Ok(0);
    }

    println!("Reaction: {}", reaction_heading(&reaction));
    print!("{}", render_barrier_table(&results, context.text_precision()));
    Ok(0)
}

pub(super) fn run_energy_command(
    context: &RunContext,
    args: EnergyArgs,
) -> Result<i32, CliError> {
    let reaction = args.reaction.reaction();
    let (field, value) = args.driver();

    let mut converter = match args.q_value {
        Some(q) => EnergyConverter::new(reaction.ap, reaction.at, Some(q)),
        None => {
            let path = resolve_table_path(
                args.mass_table.as_deref(),
                context.config.mass_table.as_ref(),
            )
            .ok_or_else(|| {
                HeavyIonError::input_validation(
                    "INPUT.CLI_MASS_TABLE",
                    "energy conversion needs --mass-table, a configured massTable, or --q-value",
                )
            })?;
            let masses = load_masses(&path)?;
            EnergyConverter::for_reaction(&masses, &reaction)
        }
    };
    let energies = converter.edit(field, value);
    if energies.is_none() {
        tracing::warn!(
            ?reaction,
            q_known = converter.q_value().is_some(),
            "derived energies unavailable"
        );
    }

    let precision = context.precision();
    let report = EnergyReport {
        reaction,
        label: reaction.label(),
        q_value: converter.q_value().map(|q| round_to(q, precision)),
        driving: converter.driving_field(),
        driving_value: converter.driving_value(),
        energies: energies.map(|triple| triple.rounded(precision)),
    };

    if context.json {
        print_json(&report)?;
        return Ok(0);
    }

    let precision = context.text_precision();
    println!("Reaction: {}", reaction_heading(&reaction));
    println!("{:<10}{}", "Q (MeV)", format_optional(report.q_value, precision));
    let triple = report.energies;
    for (name, field, value) in [
        ("E_lab", DrivingField::Elab, triple.map(|triple| triple.e_lab)),
        ("E_cm", DrivingField::Ecm, triple.map(|triple| triple.e_cm)),
        ("E*", DrivingField::EStar, triple.map(|triple| triple.e_star)),
    ] {
        let marker = if field == report.driving { " (driving)" } else { "" };
        println!("{name:<10}{}{marker}", format_optional(value, precision));
    }
    Ok(0)
}

pub(super) fn run_cross_section_command(
    context: &RunContext,
    args: CrossSectionArgs,
) -> Result<i32, CliError> {
    let reaction = args.reaction.reaction();
    let (model, barrier_result) = match manual_barrier(args.vb, args.rb, args.hw)? {
        Some(manual) => (None, manual),
        None => {
            let model = resolve_model(&args.model)?;
            (Some(model), barrier(model, &reaction))
        }
    };

    let samples = cross_section_curve(&barrier_result, &context.config.cross_section);
    if samples.is_empty() {
        return Err(HeavyIonError::computation(
            "COMPUTE.CROSS_SECTION",
            format!(
                "barrier (V_B = {}, R_B = {}, hw = {}) yields no cross-section samples; \
                 all three parameters must be positive",
                barrier_result.vb, barrier_result.rb, barrier_result.hw
            ),
        )
        .into());
    }
    tracing::info!(samples = samples.len(), "computed cross-section series");

    let precision = context.text_precision();
    if let Some(path) = &args.output {
        write_text_artifact(path, &render_cross_section_csv(&samples, precision)).map_err(
            |source| {
                HeavyIonError::io_system(
                    "IO.CLI_OUTPUT",
                    format!("failed to write '{}': {}", path.display(), source),
                )
            },
        )?;
    }

    if context.json {
        print_json(&CrossSectionReport {
            model: model.map(BarrierModel::key),
            barrier: barrier_result,
            output: args.output,
            samples,
        })?;
        return Ok(0);
    }

    match &args.output {
        Some(path) => println!("Wrote {} samples to {}", samples.len(), path.display()),
        None => print!("{}", render_cross_section_csv(&samples, precision)),
    }
    Ok(0)
}
