//! Run profiles: which columns to count, under which constraints, into which reports.
//!
//! A profile is plain JSON so an analyst can adapt it to a new data release
//! (an extra header spelling, a different status value) without touching code.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use tally_model::{AliasTable, Operand, Operator};

/// Complete configuration for one `tally count` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunProfile {
    /// Field delimiter of the input files.
    #[serde(default = "default_input_delimiter")]
    pub input_delimiter: char,
    /// Encoding label of the input files (WHATWG names, e.g. `windows-1252`).
    #[serde(default = "default_input_encoding")]
    pub input_encoding: String,
    /// Logical column → accepted header spellings.
    #[serde(default)]
    pub aliases: AliasTable,
    /// Conditions every counted record must satisfy.
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
    /// One output file per entry.
    pub reports: Vec<ReportSpec>,
}

/// `column operator value`, e.g. `status == certified`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintSpec {
    pub column: String,
    pub operator: Operator,
    pub value: Operand,
}

/// A top-N report over one counted column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSpec {
    /// Logical column to count.
    pub column: String,
    /// Output file name, relative to the output directory.
    pub file: PathBuf,
    /// Header line fields.
    pub header: Vec<String>,
    /// Number of ranked entries.
    #[serde(default = "default_top")]
    pub top: usize,
    /// Output field delimiter. Values containing it are quoted.
    #[serde(default = "default_report_delimiter")]
    pub delimiter: char,
}

fn default_input_delimiter() -> char {
    ','
}

fn default_input_encoding() -> String {
    "utf-8".to_string()
}

fn default_top() -> usize {
    10
}

fn default_report_delimiter() -> char {
    ';'
}

impl RunProfile {
    /// Profile for the yearly H1B disclosure files.
    pub fn h1b() -> Self {
        let aliases: AliasTable = [
            ("status", vec!["STATUS", "CASE_STATUS"]),
            ("occupation", vec!["SOC_NAME", "LCA_CASE_SOC_NAME"]),
            ("state", vec!["LCA_CASE_WORKLOC1_STATE", "WORKSITE_STATE"]),
        ]
        .into_iter()
        .collect();
        Self {
            input_delimiter: ';',
            input_encoding: default_input_encoding(),
            aliases,
            constraints: vec![ConstraintSpec {
                column: "status".to_string(),
                operator: Operator::Equals,
                value: Operand::Text("certified".to_string()),
            }],
            reports: vec![
                ReportSpec {
                    column: "occupation".to_string(),
                    file: PathBuf::from("top_10_occupations.txt"),
                    header: h1b_header("TOP_OCCUPATIONS"),
                    top: 10,
                    delimiter: ';',
                },
                ReportSpec {
                    column: "state".to_string(),
                    file: PathBuf::from("top_10_states.txt"),
                    header: h1b_header("TOP_STATES"),
                    top: 10,
                    delimiter: ';',
                },
            ],
        }
    }

    /// Reads and validates a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read profile {}", path.display()))?;
        let profile: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse profile {}", path.display()))?;
        profile
            .validate()
            .with_context(|| format!("invalid profile {}", path.display()))?;
        Ok(profile)
    }

    /// Pretty JSON form, as accepted by [`RunProfile::load`].
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize profile")
    }

    /// Checks everything that can be checked before reading input files.
    pub fn validate(&self) -> Result<()> {
        self.input_delimiter_byte()?;
        if self.reports.is_empty() {
            bail!("profile defines no reports");
        }
        for report in &self.reports {
            if report.column.trim().is_empty() {
                bail!("report {} has an empty column", report.file.display());
            }
            if report.top == 0 {
                bail!("report {} must list at least one entry", report.file.display());
            }
            report.delimiter_byte()?;
            if report.header.is_empty() {
                bail!("report {} has an empty header", report.file.display());
            }
            if report.file.as_os_str().is_empty() || report.file.is_absolute() {
                bail!(
                    "report file '{}' must be a relative file name",
                    report.file.display()
                );
            }
        }
        for (index, report) in self.reports.iter().enumerate() {
            if self.reports[..index].iter().any(|other| other.file == report.file) {
                bail!("report file {} is listed twice", report.file.display());
            }
        }
        Ok(())
    }

    /// Input delimiter as the single byte the reader needs.
    pub fn input_delimiter_byte(&self) -> Result<u8> {
        ascii_byte(self.input_delimiter, "input delimiter")
    }

    /// Distinct counted columns in report order.
    pub fn counter_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for report in &self.reports {
            if !columns.contains(&report.column.as_str()) {
                columns.push(&report.column);
            }
        }
        columns
    }
}

impl ReportSpec {
    /// Output delimiter as the single byte the writer needs.
    pub fn delimiter_byte(&self) -> Result<u8> {
        ascii_byte(self.delimiter, "report delimiter")
    }
}

fn ascii_byte(ch: char, what: &str) -> Result<u8> {
    u8::try_from(ch)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("{what} '{ch}' must be a single ASCII character"))
}

fn h1b_header(first: &str) -> Vec<String> {
    vec![
        first.to_string(),
        "NUMBER_CERTIFIED_APPLICATIONS".to_string(),
        "PERCENTAGE".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h1b_profile_is_valid() {
        let profile = RunProfile::h1b();
        profile.validate().unwrap();
        assert_eq!(profile.input_delimiter_byte().unwrap(), b';');
        assert_eq!(profile.counter_columns(), vec!["occupation", "state"]);
    }

    #[test]
    fn test_minimal_profile_uses_defaults() {
        let profile: RunProfile = serde_json::from_str(
            r#"{"reports": [{"column": "state", "file": "states.txt", "header": ["S", "N", "P"]}]}"#,
        )
        .unwrap();
        assert_eq!(profile.input_delimiter, ',');
        assert_eq!(profile.input_encoding, "utf-8");
        assert!(profile.aliases.is_empty());
        assert_eq!(profile.reports[0].top, 10);
        assert_eq!(profile.reports[0].delimiter, ';');
        profile.validate().unwrap();
    }

    #[test]
    fn test_json_round_trip() {
        let profile = RunProfile::h1b();
        let parsed: RunProfile = serde_json::from_str(&profile.to_json().unwrap()).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn test_numeric_constraint_value() {
        let spec: ConstraintSpec =
            serde_json::from_str(r#"{"column": "wage", "operator": ">=", "value": 60000}"#)
                .unwrap();
        assert_eq!(spec.operator, Operator::GreaterOrEqual);
        assert_eq!(spec.value, Operand::Number(60000.0));
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let result = serde_json::from_str::<ConstraintSpec>(
            r#"{"column": "status", "operator": "like", "value": "x"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_top() {
        let mut profile = RunProfile::h1b();
        profile.reports[0].top = 0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_files() {
        let mut profile = RunProfile::h1b();
        profile.reports[1].file = profile.reports[0].file.clone();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn test_validate_rejects_wide_delimiter() {
        let mut profile = RunProfile::h1b();
        profile.input_delimiter = '¦';
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wide_report_delimiter() {
        let mut profile = RunProfile::h1b();
        profile.reports[1].delimiter = '→';
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("report delimiter"));
    }

    #[test]
    fn test_counter_columns_are_distinct() {
        let mut profile = RunProfile::h1b();
        let mut extra = profile.reports[1].clone();
        extra.file = PathBuf::from("top_50_states.txt");
        extra.top = 50;
        profile.reports.push(extra);
        assert_eq!(profile.counter_columns(), vec!["occupation", "state"]);
    }
}
