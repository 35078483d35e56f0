//! `orc --help` / `orc <group> --help` (spec §6's command surface).

use crate::prelude::cli;

#[test]
fn top_level_help_lists_command_groups() {
    cli().args(&["--help"]).passes().stdout_has("agent").stdout_has("team").stdout_has("monitor").stdout_has("pm");
}

#[test]
fn agent_help_lists_subcommands() {
    cli()
        .args(&["agent", "--help"])
        .passes()
        .stdout_has("spawn")
        .stdout_has("restart")
        .stdout_has("kill")
        .stdout_has("message")
        .stdout_has("status");
}

#[test]
fn monitor_help_lists_subcommands() {
    cli()
        .args(&["monitor", "--help"])
        .passes()
        .stdout_has("start")
        .stdout_has("stop")
        .stdout_has("status")
        .stdout_has("pause");
}

#[test]
fn no_subcommand_fails_with_usage() {
    // clap exits 2 on a missing required subcommand, matching spec §6's
    // "bad argument" exit code.
    cli().exits_with(2);
}
