// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drive the interactive shell over stdin.

use indoc::formatdoc;

use crate::{get_cmd_output, ngts_explorer, write_files};

#[test]
fn test_shell_session() {
    let (_dir, catalogue, data) = write_files();

    let cmd = ngts_explorer()
        .args(["shell", "--no-preview"])
        .write_stdin(formatdoc! {"
            # comments and blank lines are skipped

            load '{}' '{}'
            classes
            count RotV*
            select EB* 0
            select EB* 5
            select RotV* 0
            period --min-period 0.2 --max-period 0.6 --no-plot
            quit
        ", catalogue.display(), data.display()})
        .ok();
    assert!(cmd.is_ok(), "shell failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    assert!(stdout.contains("ngts-explorer"), "{stdout}");
    assert!(stdout.contains("Loaded 3 objects in 2 classes"), "{stdout}");
    assert!(stdout.contains("EB*: 1"), "{stdout}");
    assert!(stdout.contains("ngts> 2\n"), "{stdout}");
    assert!(stdout.contains("Selected HD 1"), "{stdout}");
    // A bad index is reported but the session continues.
    assert!(stdout.contains("index 5 is out of range"), "{stdout}");
    assert!(stdout.contains("Peak period:"), "{stdout}");
}

#[test]
fn test_shell_without_files() {
    let cmd = ngts_explorer()
        .args(["shell", "--no-preview"])
        .write_stdin("classes\n")
        .ok();
    assert!(cmd.is_ok(), "shell failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("No files are loaded"), "{stdout}");
}
