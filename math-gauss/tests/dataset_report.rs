//! End-to-end checks: text dataset in, report out

use approx::assert_relative_eq;
use math_audio_gauss::{
    DatasetError, OutputFormat, PivotStrategy, Report, SolverConfig, generate_dataset,
    read_dataset, triangularize, write_dataset,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;

#[test]
fn generated_dataset_survives_text_roundtrip() {
    let mut rng = StdRng::seed_from_u64(2024);
    let dataset = generate_dataset(6, &mut rng).unwrap();

    let mut buf = Vec::new();
    write_dataset(&dataset, &mut buf).unwrap();
    let parsed = read_dataset(Cursor::new(buf)).unwrap();

    assert_eq!(parsed, dataset);
}

#[test]
fn same_seed_same_dataset() {
    let a = generate_dataset(5, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = generate_dataset(5, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn solve_text_input_to_json() {
    let input = "3\n0 2 1\n1 1 1\n2 1 3\n7 6 13\n";
    let system = read_dataset(Cursor::new(input))
        .unwrap()
        .to_system()
        .unwrap();

    let report = Report::build(&system, &SolverConfig::default()).unwrap();
    let mut buf = Vec::new();
    report.write(OutputFormat::Json, &mut buf).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    let rounded: Vec<f64> = value["solution"]["rounded_result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert_eq!(rounded, vec![1.0, 2.0, 3.0]);

    // det = 0*(3-1) - 2*(3-2) + 1*(1-2) = -3
    let det = value["solution"]["determinant"].as_f64().unwrap();
    assert_relative_eq!(det, -3.0, epsilon = 1e-12);
    let reference_det = value["reference_solution"]["determinant"].as_f64().unwrap();
    assert_relative_eq!(reference_det, -3.0, epsilon = 1e-12);
}

#[test]
fn leading_zero_pivot_takes_exactly_one_swap() {
    let dataset = read_dataset(Cursor::new("3\n0 2 1\n1 1 1\n2 1 3\n7 6 13\n")).unwrap();
    let system = dataset.to_system().unwrap();

    let mut a = system.matrix().clone();
    let mut b = system.rhs().clone();
    let tri = triangularize(&mut a, &mut b, PivotStrategy::FirstNonZero, |_| {}).unwrap();
    assert_eq!(tri.permutations, 1);
    assert_eq!(tri.sign(), -1.0);
}

#[test]
fn comma_decimals_solve_like_periods() {
    let commas = read_dataset(Cursor::new("2\n2,5 1\n1 3,5\n4,5 6\n")).unwrap();
    let periods = read_dataset(Cursor::new("2\n2.5 1\n1 3.5\n4.5 6\n")).unwrap();
    assert_eq!(commas, periods);

    let x = commas.to_system().unwrap().solve().unwrap();
    let y = periods.to_system().unwrap().solve().unwrap();
    assert_eq!(x, y);
}

#[test]
fn verbose_steps_render_each_column() {
    let system = read_dataset(Cursor::new("3\n4 1 0\n1 3 1\n0 1 2\n1 2 3\n"))
        .unwrap()
        .to_system()
        .unwrap();

    let mut rendered = Vec::new();
    Report::build_traced(&system, &SolverConfig::default(), |step| {
        rendered.push(step.to_string());
    })
    .unwrap();

    assert_eq!(rendered.len(), 2);
    assert!(rendered[0].starts_with("step 1:"));
    assert!(rendered[1].starts_with("step 2:"));
    assert!(rendered[1].ends_with(&"-".repeat(30)));
}

#[test]
fn singular_text_input_reports_error() {
    let system = read_dataset(Cursor::new("2\n1 1\n2 2\n2 4\n"))
        .unwrap()
        .to_system()
        .unwrap();

    assert_eq!(system.determinant(), 0.0);
    let err = Report::build(&system, &SolverConfig::default()).unwrap_err();
    assert!(err.is_singular());
}

#[test]
fn input_layer_rejects_duplicate_rows() {
    let err = read_dataset(Cursor::new("2\n1 1\n1 1\n2 2\n")).unwrap_err();
    assert!(matches!(err, DatasetError::DuplicateRows { .. }));
}
