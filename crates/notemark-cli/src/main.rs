use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use notemark_config::Config;
use notemark_engine::{
    Environment, NoteId, NoteIndex, NoteRenderer, PlaceholderMath, TagRegistry, dump_tree, io,
};
use std::{path::PathBuf, process};

#[derive(Debug, Parser)]
#[command(name = "notemark", version)]
#[command(about = "Render notes written in note text")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Notes folder, instead of the one in the config file
    #[arg(long = "notes", global = true, value_name = "NOTES_FOLDER")]
    notes_path: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// List notes with their titles
    List,
    /// Print a note as HTML
    Render { id: String },
    /// Print a note's block tree
    Tree { id: String },
    /// Print the notes a note links to
    Links { id: String },
}

/// Settings from the config file, with the notes path overridden by the
/// command line.
fn resolve_config(notes_path: Option<PathBuf>) -> Result<Config> {
    let config_path = Config::config_path();
    let loaded = Config::load()
        .with_context(|| format!("Failed to load config file '{}'", config_path.display()))?;

    match (notes_path, loaded) {
        (Some(notes_path), Some(config)) => Ok(Config {
            notes_path,
            ..config
        }),
        (Some(notes_path), None) => Ok(Config::new(notes_path)),
        (None, Some(config)) => {
            log::info!("Loaded notes path from config: {}", config.notes_path.display());
            Ok(config)
        }
        (None, None) => bail!(
            "No notes path provided and no config file found. Pass --notes or create a config file at {}",
            config_path.display()
        ),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.notes_path)?;
    io::validate_notes_dir(&config.notes_path).with_context(|| {
        format!("Notes path '{}' is invalid", config.notes_path.display())
    })?;

    let index = NoteIndex::from_notes_dir(&config.notes_path, &config.note_extension)?;
    let registry = TagRegistry::with_builtins();
    let env = Environment::new(&index, &PlaceholderMath).with_content_width(config.content_width);
    let renderer = NoteRenderer::new(&registry, env);

    let load = |id: &NoteId| {
        io::read_note(&config.notes_path, id, &config.note_extension)
            .with_context(|| format!("Failed to read note '{id}'"))
    };

    match cli.command {
        Command::List => {
            for note in index.iter() {
                println!("{}\t{}", note.id, note.title);
            }
        }
        Command::Render { id } => {
            let id = NoteId::new(id);
            let source = load(&id)?;
            let rendered = renderer
                .render(&id, &source)
                .with_context(|| format!("Failed to parse note '{id}'"))?;
            print!("{}", rendered.to_html());
        }
        Command::Tree { id } => {
            let id = NoteId::new(id);
            let source = load(&id)?;
            let tree = renderer
                .parse(&source)
                .with_context(|| format!("Failed to parse note '{id}'"))?;
            print!("{}", dump_tree(&tree));
        }
        Command::Links { id } => {
            let id = NoteId::new(id);
            let source = load(&id)?;
            let rendered = renderer
                .render(&id, &source)
                .with_context(|| format!("Failed to parse note '{id}'"))?;
            for intent in &rendered.intents {
                println!("{intent}");
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["notemark", "render", "garden"]).unwrap();
        assert_eq!(cli.notes_path, None);
        assert_eq!(cli.command, Command::Render { id: "garden".into() });

        let cli = Cli::try_parse_from(["notemark", "tree", "a/b", "--notes", "/srv/notes"]).unwrap();
        assert_eq!(cli.notes_path, Some(PathBuf::from("/srv/notes")));
        assert_eq!(cli.command, Command::Tree { id: "a/b".into() });

        let cli = Cli::try_parse_from(["notemark", "--notes", "/srv/notes", "list"]).unwrap();
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Cli::try_parse_from(["notemark"]).is_err());
        assert!(Cli::try_parse_from(["notemark", "render"]).is_err());
        assert!(Cli::try_parse_from(["notemark", "list", "--notes"]).is_err());
        assert!(Cli::try_parse_from(["notemark", "frobnicate", "x"]).is_err());
    }
}
