//! Property tests for ordering, labelling and load balancing.

use std::collections::BTreeMap;

use hx_core::datetime::parse_appointment_date;
use hx_core::frame::string_values;
use hx_core::run;
use hx_core::sort::sort_order;
use hx_core::WorkerAssigner;
use hx_model::{RunConfig, WorkerRoster};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

const PROVIDERS: [&str; 4] = ["Dr A", "Dr B", "dr a", "Dr C"];
const DATES: [&str; 5] = ["01/02/2024", "2024-01-01", "1/3/24", "not a date", ""];
const VISIT_TYPES: [&str; 3] = ["New Patient", "Follow Up", "Established"];

fn report(rows: &[(usize, usize, usize)]) -> DataFrame {
    let column = |name: &str, values: Vec<&str>| -> Column {
        Series::new(
            name.into(),
            values.into_iter().map(String::from).collect::<Vec<_>>(),
        )
        .into_column()
    };
    let n = rows.len();
    DataFrame::new(vec![
        column("Appointment State", vec!["TX"; n]),
        column(
            "Visit Type",
            rows.iter().map(|row| VISIT_TYPES[row.2]).collect(),
        ),
        column("Primary Insurance Name", vec!["Aetna"; n]),
        column(
            "Appointment Provider Name",
            rows.iter().map(|row| PROVIDERS[row.0]).collect(),
        ),
        column(
            "Appointment Date",
            rows.iter().map(|row| DATES[row.1]).collect(),
        ),
    ])
    .unwrap()
}

fn reference() -> DataFrame {
    let column = |name: &str, values: [&str; 3]| -> Column {
        Series::new(name.into(), values.map(String::from).to_vec()).into_column()
    };
    DataFrame::new(vec![
        column("Appointment State", ["TX", "TX", "TX"]),
        column("Visit Type", VISIT_TYPES),
        column("Workable", ["Y", "y", "Y"]),
    ])
    .unwrap()
}

fn row_strategy() -> impl Strategy<Value = (usize, usize, usize)> {
    (
        0..PROVIDERS.len(),
        0..DATES.len(),
        0..VISIT_TYPES.len(),
    )
}

proptest! {
    #[test]
    fn sort_is_stable_and_ordered(keys in prop::collection::vec((0..PROVIDERS.len(), 0..DATES.len()), 0..60)) {
        let providers: Vec<String> = keys.iter().map(|key| PROVIDERS[key.0].to_string()).collect();
        let dates: Vec<_> = keys.iter().map(|key| parse_appointment_date(DATES[key.1])).collect();
        let order = sort_order(&providers, &dates);

        let mut seen = order.clone();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..keys.len()).collect::<Vec<_>>());

        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(providers[a] <= providers[b]);
            if providers[a] == providers[b] {
                match (dates[a], dates[b]) {
                    (Some(x), Some(y)) => prop_assert!(x <= y),
                    (None, Some(_)) => prop_assert!(false, "undated row before dated row"),
                    _ => {}
                }
                if dates[a] == dates[b] {
                    prop_assert!(a < b, "equal keys must keep input order");
                }
            }
        }
    }

    #[test]
    fn worker_loads_stay_within_two(
        roster_size in 1usize..8,
        providers in prop::collection::vec(0usize..6, 0..300),
    ) {
        let mut assigner = WorkerAssigner::new(roster_size).unwrap();
        for provider in &providers {
            let worker = assigner.assign(&format!("provider-{provider}"));
            prop_assert!(worker < roster_size);
            let max = assigner.loads().iter().max().copied().unwrap_or_default();
            let min = assigner.loads().iter().min().copied().unwrap_or_default();
            prop_assert!(max - min <= 2, "loads {:?}", assigner.loads());
        }
        prop_assert_eq!(assigner.loads().iter().sum::<usize>(), providers.len());
    }

    #[test]
    fn labels_are_contiguous_per_category(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let config = RunConfig::new().with_roster(WorkerRoster::new(["A", "B", "C"]));
        let output = run(&report(&rows), &reference(), &config).unwrap();
        prop_assert_eq!(output.frame.height(), rows.len());

        let labels = string_values(&output.frame, "Allocation Priority").unwrap();
        let mut next: BTreeMap<String, usize> = BTreeMap::new();
        for label in labels {
            let (code, number) = label.split_once('-').unwrap();
            let expected = next.entry(code.to_string()).or_insert(0);
            *expected += 1;
            prop_assert_eq!(number.parse::<usize>().unwrap(), *expected);
        }
    }

    #[test]
    fn repeated_runs_are_identical(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let config = RunConfig::new().with_roster(WorkerRoster::new(["A", "B"]));
        let first = run(&report(&rows), &reference(), &config).unwrap();
        let second = run(&report(&rows), &reference(), &config).unwrap();

        prop_assert!(first.frame.equals(&second.frame));
        prop_assert_eq!(first.ordinals, second.ordinals);
        prop_assert_eq!(first.assignments, second.assignments);
        prop_assert_eq!(first.summary, second.summary);
    }
}
