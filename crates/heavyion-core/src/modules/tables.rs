//! Tabulated nuclide data: ground-state deformations and mass excesses.
//!
//! Tables are loaded once from comma-separated text with a header row and
//! then exposed to the kernels through the synchronous [`NuclideLookup`] seam.

use crate::domain::{HeavyIonError, Nuclide};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const Z_ALIASES: &[&str] = &["Z", "Zp", "Z_p"];
const A_ALIASES: &[&str] = &["A", "Ap", "A_p"];
const BETA2_ALIASES: &[&str] = &["beta2", "b2", "beta_2"];
const BETA4_ALIASES: &[&str] = &["beta4", "b4", "beta_4"];
const MEXP_ALIASES: &[&str] = &["Mexp"];
const MTH_ALIASES: &[&str] = &["Mth"];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeformationRecord {
    pub beta2: Option<f64>,
    pub beta4: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassExcessRecord {
    /// Experimental mass excess in MeV.
    pub mexp: Option<f64>,
    /// Theoretical mass excess in MeV.
    pub mth: Option<f64>,
}

impl MassExcessRecord {
    /// Experimental value when present, otherwise the theoretical one.
    pub fn preferred(&self) -> Option<f64> {
        self.mexp.or(self.mth)
    }
}

/// Synchronous `(Z, A) -> record` lookup. A miss is a valid outcome.
pub trait NuclideLookup<R> {
    fn lookup(&self, nuclide: Nuclide) -> Option<R>;
}

impl<R, F> NuclideLookup<R> for F
where
    F: Fn(Nuclide) -> Option<R>,
{
    fn lookup(&self, nuclide: Nuclide) -> Option<R> {
        self(nuclide)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NuclideTable<R> {
    records: HashMap<Nuclide, R>,
}

pub type DeformationTable = NuclideTable<DeformationRecord>;
pub type MassExcessTable = NuclideTable<MassExcessRecord>;

impl<R> Default for NuclideTable<R> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<R> NuclideTable<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` unless the nuclide is already present; the first row wins.
    pub fn insert(&mut self, nuclide: Nuclide, record: R) -> bool {
        match self.records.entry(nuclide) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn get(&self, nuclide: Nuclide) -> Option<&R> {
        self.records.get(&nuclide)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R> FromIterator<(Nuclide, R)> for NuclideTable<R> {
    fn from_iter<I: IntoIterator<Item = (Nuclide, R)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (nuclide, record) in iter {
            table.insert(nuclide, record);
        }
        table
    }
}

impl<R: Copy> NuclideLookup<R> for NuclideTable<R> {
    fn lookup(&self, nuclide: Nuclide) -> Option<R> {
        let record = self.get(nuclide).copied();
        if record.is_none() {
            tracing::debug!(z = nuclide.z, a = nuclide.a, "nuclide table miss");
        }
        record
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read nuclide table '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("nuclide table has no header row")]
    MissingHeader,
    #[error("nuclide table header lacks a '{column}' column")]
    MissingColumn { column: &'static str },
    #[error("invalid {column} value '{value}' at line {line}")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },
}

impl From<TableError> for HeavyIonError {
    fn from(error: TableError) -> Self {
        match error {
            TableError::Read { .. } => {
                HeavyIonError::io_system("IO.NUCLIDE_TABLE", error.to_string())
            }
            _ => HeavyIonError::input_validation("INPUT.NUCLIDE_TABLE", error.to_string()),
        }
    }
}

pub fn parse_deformation_table(content: &str) -> Result<DeformationTable, TableError> {
    parse_table(content, [("beta2", BETA2_ALIASES), ("beta4", BETA4_ALIASES)], |values| {
        DeformationRecord {
            beta2: values[0],
            beta4: values[1],
        }
    })
}

pub fn parse_mass_excess_table(content: &str) -> Result<MassExcessTable, TableError> {
    parse_table(content, [("Mexp", MEXP_ALIASES), ("Mth", MTH_ALIASES)], |values| {
        MassExcessRecord {
            mexp: values[0],
            mth: values[1],
        }
    })
}

pub fn load_deformation_table(path: &Path) -> Result<DeformationTable, TableError> {
    let table = parse_deformation_table(&read_table(path)?)?;
    tracing::info!(path = %path.display(), rows = table.len(), "loaded deformation table");
    Ok(table)
}

pub fn load_mass_excess_table(path: &Path) -> Result<MassExcessTable, TableError> {
    let table = parse_mass_excess_table(&read_table(path)?)?;
    tracing::info!(path = %path.display(), rows = table.len(), "loaded mass-excess table");
    Ok(table)
}

fn read_table(path: &Path) -> Result<String, TableError> {
    fs::read_to_string(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a header + rows table keyed by Z and A with `N` optional value columns.
///
/// Value columns missing from the header read as absent for every row.
fn parse_table<R, const N: usize>(
    content: &str,
    value_columns: [(&'static str, &'static [&'static str]); N],
    build: impl Fn([Option<f64>; N]) -> R,
) -> Result<NuclideTable<R>, TableError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines.next().ok_or(TableError::MissingHeader)?;
    let header = split_fields(header);
    let z_index =
        column_index(&header, Z_ALIASES).ok_or(TableError::MissingColumn { column: "Z" })?;
    let a_index =
        column_index(&header, A_ALIASES).ok_or(TableError::MissingColumn { column: "A" })?;
    let value_indices = value_columns.map(|(_, aliases)| column_index(&header, aliases));

    let mut table = NuclideTable::new();
    let mut skipped = 0_usize;
    for (line_number, line) in lines {
        let fields = split_fields(line);
        let z = fields.get(z_index).and_then(|field| field.parse::<u32>().ok());
        let a = fields.get(a_index).and_then(|field| field.parse::<u32>().ok());
        let (Some(z), Some(a)) = (z, a) else {
            tracing::warn!(line = line_number, "skipping nuclide row without usable Z/A");
            skipped += 1;
            continue;
        };

        let mut values = [None; N];
        for (slot, (index, &(column, _))) in values
            .iter_mut()
            .zip(value_indices.iter().zip(value_columns.iter()))
        {
            let Some(raw) = index.and_then(|index| fields.get(index)) else {
                continue;
            };
            *slot = parse_optional_value(raw, line_number, column)?;
        }

        table.insert(Nuclide::new(z, a), build(values));
    }

    if skipped > 0 {
        tracing::warn!(skipped, "nuclide table rows skipped");
    }
    Ok(table)
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|field| field.trim().trim_matches('"').trim())
        .collect()
}

fn column_index(header: &[&str], aliases: &[&str]) -> Option<usize> {
    header.iter().position(|name| {
        aliases
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

fn parse_optional_value(
    raw: &str,
    line: usize,
    column: &'static str,
) -> Result<Option<f64>, TableError> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("NA") || raw == "-" {
        return Ok(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or_else(|| TableError::InvalidValue {
            line,
            column,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{
        MassExcessRecord, NuclideLookup, NuclideTable, TableError, load_mass_excess_table,
        parse_deformation_table, parse_mass_excess_table,
    };
    use crate::domain::Nuclide;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn deformation_header_aliases_are_accepted() {
        let table = parse_deformation_table("z,a,b2,beta_4\n20,48,0.000,NA\n82,208,0.0,0.0\n")
            .expect("table should parse");

        assert_eq!(table.len(), 2);
        let calcium = table.lookup(Nuclide::new(20, 48)).expect("48Ca should exist");
        assert_eq!(calcium.beta2, Some(0.0));
        assert_eq!(calcium.beta4, None);
        assert!(table.lookup(Nuclide::new(92, 238)).is_none());
    }

    #[test]
    fn missing_value_column_reads_as_absent() {
        let table =
            parse_deformation_table("Z,A,beta2\n92,238,0.236\n").expect("table should parse");
        let uranium = table.lookup(Nuclide::new(92, 238)).expect("238U should exist");
        assert_eq!(uranium.beta2, Some(0.236));
        assert_eq!(uranium.beta4, None);
    }

    #[test]
    fn mass_excess_prefers_experimental_value() {
        let table = parse_mass_excess_table(
            "Z,A,Mexp,Mth\n20,48,-44.224,-44.5\n102,256,,87.82\n110,270,,\n",
        )
        .expect("table should parse");

        let calcium = table.lookup(Nuclide::new(20, 48)).expect("48Ca should exist");
        assert_eq!(calcium.preferred(), Some(-44.224));
        let nobelium = table.lookup(Nuclide::new(102, 256)).expect("256No should exist");
        assert_eq!(nobelium.preferred(), Some(87.82));
        let darmstadtium = table.lookup(Nuclide::new(110, 270)).expect("row should exist");
        assert_eq!(darmstadtium.preferred(), None);
    }

    #[test]
    fn rows_without_nucleon_numbers_are_skipped() {
        let table = parse_mass_excess_table("Z,A,Mexp,Mth\n,,1.0,2.0\n8,16,-4.737,\n\n")
            .expect("table should parse");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn first_duplicate_row_wins() {
        let table = parse_mass_excess_table("Z,A,Mexp,Mth\n8,16,-4.737,\n8,16,99.0,\n")
            .expect("table should parse");
        assert_eq!(
            table.lookup(Nuclide::new(8, 16)).and_then(|record| record.preferred()),
            Some(-4.737)
        );
    }

    #[test]
    fn malformed_value_reports_line_and_column() {
        let error = parse_mass_excess_table("Z,A,Mexp,Mth\n8,16,abc,\n")
            .expect_err("non-numeric mass should fail");
        match error {
            TableError::InvalidValue { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "Mexp");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_without_mass_number_is_rejected() {
        let error = parse_mass_excess_table("Z,Mexp\n8,1.0\n").expect_err("missing A should fail");
        assert!(matches!(error, TableError::MissingColumn { column: "A" }));
        assert!(matches!(
            parse_mass_excess_table("\n\n"),
            Err(TableError::MissingHeader)
        ));
    }

    #[test]
    fn load_reads_table_from_disk() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("mass_excess.csv");
        fs::write(&path, "Z,A,Mexp,Mth\r\n8,16,-4.737,\r\n").expect("table should be written");

        let table = load_mass_excess_table(&path).expect("table should load");
        assert_eq!(table.len(), 1);
        assert!(load_mass_excess_table(&temp.path().join("absent.csv")).is_err());
    }

    #[test]
    fn closures_act_as_lookups() {
        let lookup = |nuclide: Nuclide| {
            (nuclide == Nuclide::new(2, 4)).then_some(MassExcessRecord {
                mexp: Some(2.425),
                mth: None,
            })
        };
        assert_eq!(
            lookup.lookup(Nuclide::new(2, 4)).and_then(|record| record.preferred()),
            Some(2.425)
        );
        let empty: NuclideTable<MassExcessRecord> = NuclideTable::new();
        assert!(empty.is_empty());
        assert!(empty.lookup(Nuclide::new(2, 4)).is_none());
    }
}
