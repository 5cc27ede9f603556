// Report commands: distribution and scaling facet grids written as ECharts HTML

use assert_cmd::Command;
use predicates::prelude::*;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_results(dir: &TempDir) -> PathBuf {
    let mut csv = String::from(
        "name,repetition,input_size,baseline_instruction_count,exec_instruction_count\n",
    );
    for i in 0..30u64 {
        writeln!(csv, "ADD,100,,5000,{}", 7100 + i % 7).unwrap();
        writeln!(csv, "MUL,100,,5000,{}", 8000 + (i * 3) % 11).unwrap();
    }
    for size in [32u64, 64, 128, 256, 65536] {
        for jitter in 0..6u64 {
            writeln!(csv, "MCOPY,10,{size},100,{}", 130 + size * 3 + jitter).unwrap();
        }
    }

    let path = dir.path().join("results.csv");
    fs::write(&path, csv).unwrap();
    path
}

#[test]
fn test_plot_dist_writes_report() {
    let tmp_dir = TempDir::new().unwrap();
    let input = write_results(&tmp_dir);
    let out = tmp_dir.path().join("dist.html");

    let mut cmd = Command::cargo_bin("opcost").unwrap();
    cmd.arg("plot-dist").arg(&input).arg("--out").arg(&out);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("dist.html"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("echarts"));
    assert!(html.contains("Instruction Cost Distribution per Opcode"));
    for operation in ["ADD", "MUL", "MCOPY"] {
        assert!(html.contains(&format!("\"{operation}\"")), "missing {operation}");
    }
    assert!(html.contains("Binned mode"));
}

#[test]
fn test_plot_dist_filter_and_columns() {
    let tmp_dir = TempDir::new().unwrap();
    let input = write_results(&tmp_dir);
    let out = tmp_dir.path().join("dist.html");

    Command::cargo_bin("opcost")
        .unwrap()
        .arg("plot-dist")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--filter")
        .arg("re:^M")
        .arg("--columns")
        .arg("1")
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(!html.contains("\"ADD\""));
    assert!(html.contains("\"MUL\""));
    // Single column: the second facet's grid starts one cell lower
    assert!(html.contains("\"356\""));
}

#[test]
fn test_plot_dist_skips_operation_without_finite_samples() {
    let tmp_dir = TempDir::new().unwrap();
    let input = tmp_dir.path().join("results.csv");
    let mut csv = String::from(
        "name,repetition,baseline_instruction_count,exec_instruction_count,instruction_count_consumes_by_other_estimated\n",
    );
    for exec in [7100, 7101, 7102] {
        writeln!(csv, "ADD,100,5000,{exec},0").unwrap();
    }
    writeln!(csv, "BAD,100,5000,7100,NaN").unwrap();
    writeln!(csv, "BAD,100,5000,7100,NaN").unwrap();
    fs::write(&input, csv).unwrap();
    let out = tmp_dir.path().join("dist.html");

    Command::cargo_bin("opcost")
        .unwrap()
        .arg("plot-dist")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("dist.html"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("\"ADD\""));
    assert!(html.contains("Skipped: BAD"));
}

#[test]
fn test_plot_scaling_writes_report() {
    let tmp_dir = TempDir::new().unwrap();
    let input = write_results(&tmp_dir);
    let out = tmp_dir.path().join("scaling.html");

    Command::cargo_bin("opcost")
        .unwrap()
        .arg("plot-scaling")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Instruction Cost vs Input Size per Opcode"));
    assert!(html.contains("\"Input Size\""));
    assert!(html.contains("\"Instruction Cost\""));
    assert!(html.contains("\"MCOPY\""));
    // Unsized operations have no scaling facet
    assert!(!html.contains("\"ADD\""));
    // 65536 is above the plot limit
    assert!(!html.contains("65536"));
}

#[test]
fn test_plot_zero_columns_rejected() {
    let tmp_dir = TempDir::new().unwrap();
    let input = write_results(&tmp_dir);

    let mut cmd = Command::cargo_bin("opcost").unwrap();
    cmd.arg("plot-scaling")
        .arg(&input)
        .arg("--out")
        .arg(tmp_dir.path().join("s.html"))
        .arg("--columns")
        .arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid analysis settings"));
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    let tmp_dir = TempDir::new().unwrap();
    let input = write_results(&tmp_dir);

    let mut cmd = Command::cargo_bin("opcost").unwrap();
    cmd.arg("--debug")
        .arg("plot-dist")
        .arg(&input)
        .arg("--out")
        .arg(tmp_dir.path().join("d.html"));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("loaded measurement log"));
}
