use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_graph_command() {
    let cli = Cli::try_parse_from([
        "dw", "-v", "graph", "--catalog", "objects.json", "-s", "+db.s.t", "-o", "table",
    ])
    .unwrap();

    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, ".");
    match cli.command {
        Commands::Graph(args) => {
            assert_eq!(args.catalog, "objects.json");
            assert_eq!(args.select.as_deref(), Some("+db.s.t"));
            assert_eq!(args.output, GraphOutput::Table);
            assert!(!args.enrich);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_refs_command() {
    let cli = Cli::try_parse_from([
        "dw", "refs", "proc.sql", "--catalog", "objects.json", "-d", "db", "--procedure",
    ])
    .unwrap();

    match cli.command {
        Commands::Refs(args) => {
            assert_eq!(args.ddl, "proc.sql");
            assert_eq!(args.database.as_deref(), Some("db"));
            assert!(args.procedure);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_normalize_defaults() {
    let cli = Cli::try_parse_from(["dw", "normalize", "script.sql"]).unwrap();
    match cli.command {
        Commands::Normalize(args) => {
            assert!(!args.for_parser);
            assert_eq!(args.output, TextOutput::Text);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_catalog_required() {
    assert!(Cli::try_parse_from(["dw", "lineage"]).is_err());
}

#[test]
fn test_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["dw", "lineage", "--catalog", "c.json", "-c", "dw.yml"]).unwrap();
    assert_eq!(cli.global.config.as_deref(), Some("dw.yml"));
}
