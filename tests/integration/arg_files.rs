// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arguments can be saved into a file with --save-toml and used again.

use crate::{get_cmd_output, ngts_explorer, write_files};

#[test]
fn test_save_toml_then_reuse() {
    let (dir, catalogue, data) = write_files();
    let toml = dir.path().join("args.toml");

    #[rustfmt::skip]
    let cmd = ngts_explorer()
        .args([
            "classes",
            "-m", &format!("{}", catalogue.display()),
            "-d", &format!("{}", data.display()),
            "--db-user", "observer",
            "--db-password", "secret",
            "--save-toml", &format!("{}", toml.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "saving arguments failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&toml).unwrap();
    assert!(contents.contains("[session]"), "{contents}");
    assert!(contents.contains("observer"), "{contents}");
    assert!(!contents.contains("secret"), "{contents}");

    let cmd = ngts_explorer()
        .args(["classes", &format!("{}", toml.display())])
        .ok();
    assert!(
        cmd.is_ok(),
        "classes with an argument file failed: {}",
        cmd.err().unwrap()
    );
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("RotV*: 2"), "{stdout}");
}

#[test]
fn test_cli_overrides_arg_file() {
    let (dir, catalogue, data) = write_files();
    let json = dir.path().join("args.json");
    std::fs::write(
        &json,
        serde_json::json!({
            "session": {
                "match": catalogue,
                "data": dir.path().join("missing.fits"),
            },
        })
        .to_string(),
    )
    .unwrap();

    // The file's data file doesn't exist, so this only works if the CLI
    // argument wins.
    #[rustfmt::skip]
    let cmd = ngts_explorer()
        .args([
            "classes",
            &format!("{}", json.display()),
            "-d", &format!("{}", data.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{}", cmd.err().unwrap());

    let cmd = ngts_explorer()
        .args(["classes", &format!("{}", json.display())])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("missing.fits"), "{stderr}");
}

#[test]
fn test_unknown_arg_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = dir.path().join("args.yaml");
    std::fs::write(&yaml, "session:\n").unwrap();

    let cmd = ngts_explorer()
        .args(["classes", &format!("{}", yaml.display())])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Valid extensions are: toml, json"), "{stderr}");
}
