//! End-to-end tests for the count pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use tally_cli::pipeline::{CountOptions, count};
use tally_cli::profile::{ConstraintSpec, ReportSpec, RunProfile};
use tally_ingest::CaseFold;
use tally_model::{AliasTable, Operand, Operator};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn state_profile(top: usize) -> RunProfile {
    let mut aliases = AliasTable::new();
    aliases.add("state", "STATE");
    aliases.add("state", "RGN");
    aliases.add("status", "STATUS");
    RunProfile {
        input_delimiter: ',',
        input_encoding: "utf-8".to_string(),
        aliases,
        constraints: vec![ConstraintSpec {
            column: "status".to_string(),
            operator: Operator::Equals,
            value: Operand::Text("certified".to_string()),
        }],
        reports: vec![ReportSpec {
            column: "state".to_string(),
            file: PathBuf::from("top_states.txt"),
            header: vec![
                "state".to_string(),
                "count".to_string(),
                "percentage".to_string(),
            ],
            top,
            delimiter: ',',
        }],
    }
}

fn dirs() -> (TempDir, PathBuf, PathBuf) {
    let root = TempDir::new().unwrap();
    let input = root.path().join("input");
    let output = root.path().join("output");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();
    (root, input, output)
}

#[test]
fn counts_directory_with_aliased_headers() {
    let (_root, input, output) = dirs();
    write(
        &input,
        "a.csv",
        "STATE,STATUS\nCA,certified\nCA,certified\nNY,denied\n",
    );
    write(&input, "b.csv", "RGN,STATUS\nTX,certified\n");

    let outcome = count(&input, &output, &state_profile(2), CountOptions::default()).unwrap();

    assert_eq!(outcome.input_files.len(), 2);
    assert_eq!(outcome.reports.len(), 1);
    let report = &outcome.reports[0];
    assert_eq!(report.entries, 2);
    assert_eq!(report.total, 3);
    assert_eq!(report.leader.as_ref().map(|e| e.value.as_str()), Some("CA"));

    let text = fs::read_to_string(output.join("top_states.txt")).unwrap();
    assert_eq!(text, "state,count,percentage\nCA,2,66.7\nTX,1,33.3\n");
}

#[test]
fn counts_every_certified_row_in_both_files() {
    let (_root, input, output) = dirs();
    write(
        &input,
        "a.csv",
        "STATE,STATUS\nCA,certified\nCA,certified\nNY,denied\n",
    );
    write(&input, "b.csv", "RGN,STATUS\nCA,certified\nTX,certified\n");

    count(&input, &output, &state_profile(2), CountOptions::default()).unwrap();

    let text = fs::read_to_string(output.join("top_states.txt")).unwrap();
    assert_eq!(text, "state,count,percentage\nCA,3,75.0\nTX,1,25.0\n");
}

#[test]
fn missing_column_writes_no_reports() {
    let (_root, input, output) = dirs();
    write(&input, "a.csv", "REGION,STATUS\nCA,certified\n");

    let err = count(&input, &output, &state_profile(2), CountOptions::default()).unwrap_err();

    assert!(format!("{err:#}").contains("state"));
    assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
}

#[test]
fn failure_in_later_file_writes_no_reports() {
    let (_root, input, output) = dirs();
    write(&input, "a.csv", "STATE,STATUS\nCA,certified\n");
    write(&input, "b.csv", "STATE\nTX\n");

    assert!(count(&input, &output, &state_profile(2), CountOptions::default()).is_err());
    assert!(!output.join("top_states.txt").exists());
}

#[test]
fn comma_report_quotes_values_containing_commas() {
    let (_root, input, output) = dirs();
    write(
        &input,
        "a.csv",
        "STATE,STATUS\n\"WASHINGTON, D.C.\",certified\nCA,certified\nCA,certified\n",
    );

    count(&input, &output, &state_profile(10), CountOptions::default()).unwrap();

    let text = fs::read_to_string(output.join("top_states.txt")).unwrap();
    assert_eq!(
        text,
        "state,count,percentage\nCA,2,66.7\n\"WASHINGTON, D.C.\",1,33.3\n"
    );
}

#[test]
fn single_file_input() {
    let (_root, input, output) = dirs();
    let file = write(&input, "only.csv", "STATE,STATUS\nWA,certified\n");

    let outcome = count(&file, &output, &state_profile(10), CountOptions::default()).unwrap();

    assert_eq!(outcome.input_files, vec![file]);
    let text = fs::read_to_string(output.join("top_states.txt")).unwrap();
    assert_eq!(text, "state,count,percentage\nWA,1,100.0\n");
}

#[test]
fn preserve_case_keeps_value_spelling() {
    let (_root, input, output) = dirs();
    write(&input, "a.csv", "STATE,STATUS\nCa,CERTIFIED\nCa,certified\n");

    let options = CountOptions {
        case_fold: CaseFold::Preserve,
    };
    let mut profile = state_profile(10);
    profile.constraints[0].value = Operand::Text("CERTIFIED".to_string());
    count(&input, &output, &profile, options).unwrap();

    let text = fs::read_to_string(output.join("top_states.txt")).unwrap();
    assert_eq!(text, "state,count,percentage\nCa,1,100.0\n");
}

#[test]
fn missing_output_directory_is_not_created() {
    let (_root, input, output) = dirs();
    write(&input, "a.csv", "STATE,STATUS\nCA,certified\n");
    let missing = output.join("nested");

    let err = count(&input, &missing, &state_profile(2), CountOptions::default()).unwrap_err();

    assert!(format!("{err:#}").contains("does not exist"));
    assert!(!missing.exists());
}

#[test]
fn h1b_profile_end_to_end() {
    let (_root, input, output) = dirs();
    write(
        &input,
        "h1b_2014.csv",
        "CASE_STATUS;LCA_CASE_SOC_NAME;LCA_CASE_WORKLOC1_STATE\n\
         CERTIFIED;SOFTWARE DEVELOPERS, APPLICATIONS;CA\n\
         CERTIFIED;SOFTWARE DEVELOPERS, APPLICATIONS;TX\n\
         DENIED;ACCOUNTANTS;NY\n",
    );
    write(
        &input,
        "h1b_2016.csv",
        "CASE_STATUS;SOC_NAME;WORKSITE_STATE\n\
         CERTIFIED;ACCOUNTANTS;CA\n\
         CERTIFIED-WITHDRAWN;ACCOUNTANTS;CA\n",
    );

    let outcome = count(&input, &output, &RunProfile::h1b(), CountOptions::default()).unwrap();
    assert_eq!(outcome.reports.len(), 2);

    let occupations = fs::read_to_string(output.join("top_10_occupations.txt")).unwrap();
    assert_eq!(
        occupations,
        "TOP_OCCUPATIONS;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE\n\
         SOFTWARE DEVELOPERS, APPLICATIONS;2;66.7\n\
         ACCOUNTANTS;1;33.3\n"
    );
    let states = fs::read_to_string(output.join("top_10_states.txt")).unwrap();
    assert_eq!(
        states,
        "TOP_STATES;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE\n\
         CA;2;66.7\n\
         TX;1;33.3\n"
    );
}

#[test]
fn profile_file_round_trips_through_load() {
    let root = TempDir::new().unwrap();
    let path = write(
        root.path(),
        "profile.json",
        &state_profile(5).to_json().unwrap(),
    );
    let loaded = RunProfile::load(&path).unwrap();
    assert_eq!(loaded, state_profile(5));
}

#[test]
fn invalid_profile_file_is_rejected() {
    let root = TempDir::new().unwrap();
    let path = write(root.path(), "profile.json", r#"{"reports": []}"#);
    let err = RunProfile::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("no reports"));
}

#[test]
fn h1b_profile_json_snapshot() {
    let json = RunProfile::h1b().to_json().unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "input_delimiter": ";",
      "input_encoding": "utf-8",
      "aliases": {
        "occupation": [
          "SOC_NAME",
          "LCA_CASE_SOC_NAME"
        ],
        "state": [
          "LCA_CASE_WORKLOC1_STATE",
          "WORKSITE_STATE"
        ],
        "status": [
          "STATUS",
          "CASE_STATUS"
        ]
      },
      "constraints": [
        {
          "column": "status",
          "operator": "==",
          "value": "certified"
        }
      ],
      "reports": [
        {
          "column": "occupation",
          "file": "top_10_occupations.txt",
          "header": [
            "TOP_OCCUPATIONS",
            "NUMBER_CERTIFIED_APPLICATIONS",
            "PERCENTAGE"
          ],
          "top": 10,
          "delimiter": ";"
        },
        {
          "column": "state",
          "file": "top_10_states.txt",
          "header": [
            "TOP_STATES",
            "NUMBER_CERTIFIED_APPLICATIONS",
            "PERCENTAGE"
          ],
          "top": 10,
          "delimiter": ";"
        }
      ]
    }
    "#);
}
