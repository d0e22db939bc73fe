// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use crate::{get_cmd_output, ngts_explorer, write_files, PERIOD};

#[test]
fn test_classes_no_stderr() {
    let (_dir, catalogue, data) = write_files();

    #[rustfmt::skip]
    let cmd = ngts_explorer()
        .args([
            "classes",
            "--match", &format!("{}", catalogue.display()),
            "--data", &format!("{}", data.display()),
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "classes failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("3 objects in 2 classes"), "{stdout}");
    assert!(stdout.contains("RotV*: 2"), "{stdout}");
    assert!(stdout.contains("EB*: 1"), "{stdout}");
}

#[test]
fn test_find_period_no_stderr() {
    let (dir, catalogue, data) = write_files();
    let json = dir.path().join("spectrum.json");

    #[rustfmt::skip]
    let cmd = ngts_explorer()
        .args([
            "find-period",
            "-m", &format!("{}", catalogue.display()),
            "-d", &format!("{}", data.display()),
            "--class", "RotV*",
            "--index", "0",
            "--num-periods", "400",
            "--spectrum-json", &format!("{}", json.display()),
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "find-period failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    let spectrum: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(&json).unwrap()).unwrap();
    let periods = spectrum["periods"].as_array().unwrap();
    let power = spectrum["power"].as_array().unwrap();
    assert_eq!(periods.len(), 400);
    assert_eq!(power.len(), 400);

    let (i_max, _) = power
        .iter()
        .map(|p| p.as_f64().unwrap())
        .enumerate()
        .fold((0, f64::MIN), |(i_max, max), (i, p)| {
            if p > max {
                (i, p)
            } else {
                (i_max, max)
            }
        });
    let peak = periods[i_max].as_f64().unwrap();
    assert!((peak - PERIOD).abs() < 0.01, "peak period was {peak}");
}

#[test]
fn test_dry_run_no_stderr() {
    let (dir, catalogue, data) = write_files();
    let outdir = dir.path().join("figures");

    #[rustfmt::skip]
    let cmd = ngts_explorer()
        .args([
            "plot-all",
            "-m", &format!("{}", catalogue.display()),
            "-d", &format!("{}", data.display()),
            "--class", "RotV*",
            "--save",
            "--no-pause",
            "--outdir", &format!("{}", outdir.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "dry run failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Dry run -- exiting now."), "{stdout}");
    assert!(!outdir.exists());
}
