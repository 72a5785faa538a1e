use super::barrier::BarrierModel;
use crate::domain::{BarrierResult, CrossSectionSample};
use std::fs;
use std::path::Path;

pub const NOT_AVAILABLE: &str = "NA";

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

/// Fixed-precision value or `NA` for an absent one.
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(value) => format!("{value:.precision$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, normalize_text_artifact(content))
}

/// `Ecm,sigma` CSV of a cross-section series.
pub fn render_cross_section_csv(samples: &[CrossSectionSample], precision: usize) -> String {
    let mut content = String::from("Ecm_MeV,sigma_mb\n");
    for sample in samples {
        content.push_str(&format!(
            "{:.2},{:.precision$e}\n",
            sample.e_cm, sample.sigma
        ));
    }
    content
}

/// Column-aligned model comparison, one row per model in registry order.
pub fn render_barrier_table(rows: &[(BarrierModel, BarrierResult)], precision: usize) -> String {
    let name_width = rows
        .iter()
        .map(|(model, _)| model.display_name().chars().count())
        .max()
        .unwrap_or(0)
        .max("Model".len());

    let mut content = format!(
        "{:<name_width$} {:>12} {:>12} {:>12}\n",
        "Model", "V_B (MeV)", "R_B (fm)", "hw (MeV)"
    );
    for (model, result) in rows {
        let name = model.display_name();
        let padding = name_width - name.chars().count();
        content.push_str(&format!(
            "{name}{:padding$} {} {} {}\n",
            "",
            format_fixed_f64(result.vb, 12, precision),
            format_fixed_f64(result.rb, 12, precision),
            format_fixed_f64(result.hw, 12, precision),
        ));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::{
        format_fixed_f64, format_optional, normalize_text_artifact, render_barrier_table,
        render_cross_section_csv, write_text_artifact,
    };
    use crate::domain::{BarrierResult, CrossSectionSample};
    use crate::modules::barrier::BarrierModel;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn fixed_width_float_formatting_is_deterministic() {
        let first = format_fixed_f64(1.23, 13, 5);
        let second = format_fixed_f64(1.23, 13, 5);

        assert_eq!(first, "      1.23000");
        assert_eq!(first, second);
    }

    #[test]
    fn absent_values_render_as_na() {
        assert_eq!(format_optional(None, 3), "NA");
        assert_eq!(format_optional(Some(0.62500), 3), "0.625");
    }

    #[test]
    fn normalize_text_artifact_uses_canonical_line_endings() {
        let normalized = normalize_text_artifact("alpha\r\nbeta\rgamma");
        assert_eq!(normalized, "alpha\nbeta\ngamma\n");
    }

    #[test]
    fn repeated_text_writes_produce_identical_bytes() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("nested/sigma.csv");
        let input = "line 1\r\nline 2\rline 3";

        write_text_artifact(&path, input).expect("first write should succeed");
        let first = fs::read(&path).expect("artifact should be readable");

        write_text_artifact(&path, input).expect("second write should succeed");
        let second = fs::read(&path).expect("artifact should be readable");

        assert_eq!(first, second);
        assert_eq!(second, b"line 1\nline 2\nline 3\n");
    }

    #[test]
    fn cross_section_csv_has_header_and_one_row_per_sample() {
        let samples = [
            CrossSectionSample {
                e_cm: 164.078,
                sigma: 1.0e-3,
            },
            CrossSectionSample {
                e_cm: 164.578,
                sigma: 1021.48,
            },
        ];
        let csv = render_cross_section_csv(&samples, 3);
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines, ["Ecm_MeV,sigma_mb", "164.08,1.000e-3", "164.58,1.021e3"]);
    }

    #[test]
    fn barrier_table_lists_models_in_given_order() {
        let rows = [
            (BarrierModel::Bass, BarrierResult::new(214.078, 10.768, 3.607)),
            (BarrierModel::Adamian, BarrierResult::ZERO),
        ];
        let table = render_barrier_table(&rows, 2);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Model"));
        assert!(lines[1].starts_with("Bass (1973)"));
        assert!(lines[1].ends_with("3.61"));
        assert!(lines[2].starts_with("Adamian (2003)"));
    }
}
