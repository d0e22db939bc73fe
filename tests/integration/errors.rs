// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Failing commands report a single error on stderr and exit with 1.

use crate::{get_cmd_output, ngts_explorer, write_files};

#[test]
fn test_missing_data_file() {
    let (dir, catalogue, _) = write_files();
    let missing = dir.path().join("missing.fits");

    #[rustfmt::skip]
    let cmd = ngts_explorer()
        .args([
            "classes",
            "-m", &format!("{}", catalogue.display()),
            "-d", &format!("{}", missing.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("doesn't exist"), "{stderr}");
    assert!(stderr.contains("missing.fits"), "{stderr}");
}

#[test]
fn test_unknown_class() {
    let (_dir, catalogue, data) = write_files();

    #[rustfmt::skip]
    let cmd = ngts_explorer()
        .args([
            "find-period",
            "-m", &format!("{}", catalogue.display()),
            "-d", &format!("{}", data.display()),
            "-c", "QSO",
            "-i", "0",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("QSO"), "{stderr}");
    assert!(stderr.contains("ngts-explorer classes"), "{stderr}");
}

#[test]
fn test_bad_airmass_source() {
    let (_dir, catalogue, data) = write_files();

    #[rustfmt::skip]
    let cmd = ngts_explorer()
        .args([
            "classes",
            "-m", &format!("{}", catalogue.display()),
            "-d", &format!("{}", data.display()),
            "--airmass-source", "guess",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("'guess'"), "{stderr}");
    assert!(stderr.contains("--airmass-source"), "{stderr}");
}

#[test]
fn test_missing_class_for_plot_all() {
    let (_dir, catalogue, data) = write_files();

    #[rustfmt::skip]
    let cmd = ngts_explorer()
        .args([
            "plot-all",
            "-m", &format!("{}", catalogue.display()),
            "-d", &format!("{}", data.display()),
            "--no-pause",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("-c/--class"), "{stderr}");
}

#[test]
fn test_conflicting_preview_args() {
    let cmd = ngts_explorer()
        .args(["classes", "--preview", "a.png", "--no-preview"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("cannot be used with"), "{stderr}");
}
