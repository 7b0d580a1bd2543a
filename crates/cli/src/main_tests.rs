// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn create_requires_a_file() {
    assert!(Cli::try_parse_from(["rig", "create"]).is_err());
    let cli = Cli::try_parse_from(["rig", "create", "-f", "rigfile.yaml"]).unwrap();
    match cli.command {
        Commands::Create(args) => assert_eq!(args.file.to_str(), Some("rigfile.yaml")),
        _ => panic!("expected create"),
    }
}

#[test]
fn destroy_parses_target_and_force() {
    let cli = Cli::try_parse_from(["rig", "destroy", "-i", "all", "--force"]).unwrap();
    match cli.command {
        Commands::Destroy(args) => {
            assert_eq!(args.id, "all");
            assert!(args.force);
        }
        _ => panic!("expected destroy"),
    }
}

#[test]
fn destroy_requires_a_target() {
    assert!(Cli::try_parse_from(["rig", "destroy"]).is_err());
}

#[test]
fn list_takes_no_arguments() {
    let cli = Cli::try_parse_from(["rig", "list"]).unwrap();
    assert!(matches!(cli.command, Commands::List));
    assert!(Cli::try_parse_from(["rig", "list", "extra"]).is_err());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["rig", "teleport"]).is_err());
}
