//! Tests for the CLI summary tables.

use hx_cli::summary::{category_table, load_table, lookup_tables, preview_table, stage_table};
use hx_core::{LookupIndex, run};
use hx_model::{RunConfig, WorkerRoster};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values.iter().copied().map(String::from).collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

fn reference() -> DataFrame {
    test_df(vec![
        ("Appointment State", vec!["TX", "TX"]),
        ("Visit Type", vec!["New Patient", "Follow Up"]),
        ("Workable", vec!["Y", "N"]),
    ])
}

fn report() -> DataFrame {
    test_df(vec![
        ("Appointment State", vec!["TX", "TX", "NV"]),
        ("Visit Type", vec!["New Patient", "Follow Up", "New Patient"]),
        ("Primary Insurance Name", vec!["Aetna", "Aetna", "Aetna"]),
        ("Appointment Provider Name", vec!["Dr Zhang", "Dr Zhang", "Dr Ortiz"]),
        ("Appointment Date", vec!["03/14/2024", "03/15/2024", "03/16/2024"]),
    ])
}

#[test]
fn stage_table_lists_every_stage_and_total() {
    let config = RunConfig::new().with_roster(WorkerRoster::new(["Agent-1"]));
    let output = run(&report(), &reference(), &config).unwrap();
    let rendered = stage_table(&output.summary).to_string();

    for label in [
        "state validity",
        "workable status",
        "insurance exclusion",
        "payor substring",
        "visit status",
        "escalation",
        "sort",
        "TOTAL",
    ] {
        assert!(rendered.contains(label), "missing {label}:\n{rendered}");
    }
}

#[test]
fn load_and_category_tables_show_counts() {
    let config = RunConfig::new().with_roster(WorkerRoster::new(["Ana", "Ben"]));
    let output = run(&report(), &reference(), &config).unwrap();

    let loads = load_table(&output.summary).to_string();
    assert!(loads.contains("Ana"));
    assert!(loads.contains("Ben"));
    let categories = category_table(&output.summary).to_string();
    assert!(categories.contains("NP"));
    assert!(categories.contains("FU"));
}

#[test]
fn preview_shows_allocated_columns() {
    let config = RunConfig::new().with_roster(WorkerRoster::new(["Ana"]));
    let output = run(&report(), &reference(), &config).unwrap();
    let rendered = preview_table(&output.frame, &config.columns, 10).to_string();

    assert!(rendered.contains("Allocation Priority"));
    assert!(rendered.contains("NP-001"));
    assert!(rendered.contains("Dr Zhang"));
    assert!(!rendered.contains("Dr Ortiz"));
}

#[test]
fn lookup_tables_show_workability() {
    let lookup = LookupIndex::build(&reference(), &RunConfig::default().reference).unwrap();
    let (states, visit_types) = lookup_tables(&lookup);
    // Keys are shown normalized.
    assert!(states.to_string().contains("tx"));
    let rendered = visit_types.to_string();
    assert!(rendered.contains("new patient"));
    assert!(rendered.contains("follow up"));
    assert!(rendered.contains('Y'));
    assert!(rendered.contains('N'));
}
