use anyhow::{Context, Result, bail};
use outline_notes_config::Config;
use outline_notes_engine::{
    AddNoteCommand, FilePageConnection, NoteType, Notifier, Outline, PageConnection,
    PageDocument, PlacementOptions, io,
};
use relative_path::RelativePathBuf;
use std::{env, path::PathBuf, process};

/// Prints user-facing messages to stderr
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn display(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    AddNote {
        page: RelativePathBuf,
        note_type: NoteType,
        quote: bool,
    },
    Outlines {
        page: RelativePathBuf,
    },
    Pages,
}

#[derive(Debug, PartialEq)]
struct Cli {
    pages_override: Option<PathBuf>,
    command: Command,
}

fn usage(program: &str) -> String {
    let note_types: Vec<&str> = NoteType::ALL.iter().map(NoteType::name).collect();
    format!(
        "Usage: {program} [--pages <dir>] <command>\n\
         Commands:\n  \
           add-note <page> <note-type> [--no-quote]\n  \
           outlines <page>\n  \
           pages\n\
         Note types: {}",
        note_types.join(", ")
    )
}

fn parse_args(args: &[String]) -> Result<Cli> {
    let mut pages_override = None;
    let mut positional = Vec::new();
    let mut quote = true;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--pages" => {
                let dir = iter.next().context("--pages needs a directory")?;
                pages_override = Some(PathBuf::from(dir));
            }
            "--no-quote" => quote = false,
            flag if flag.starts_with("--") => bail!("Unknown option {flag}"),
            _ => positional.push(arg.as_str()),
        }
    }

    let command = match positional.as_slice() {
        ["add-note", page, note_type] => Command::AddNote {
            page: RelativePathBuf::from(*page),
            note_type: note_type.parse()?,
            quote,
        },
        ["outlines", page] => Command::Outlines {
            page: RelativePathBuf::from(*page),
        },
        ["pages"] => Command::Pages,
        [] => bail!("No command given"),
        [other, ..] => bail!("Unknown command or wrong arguments for {other}"),
    };

    Ok(Cli {
        pages_override,
        command,
    })
}

/// Settings with the pages path resolved from `--pages` or the config file
fn resolve_config(pages_override: Option<PathBuf>) -> Result<Config> {
    let config_path = Config::config_path();
    log::info!("Config path: {}", config_path.display());

    let loaded = Config::load().context("Failed to load config file")?;
    let config = match (pages_override, loaded) {
        (Some(pages_path), Some(config)) => Config {
            pages_path,
            ..config
        },
        (Some(pages_path), None) => Config::new(pages_path),
        (None, Some(config)) => config,
        (None, None) => bail!(
            "No pages path provided and no config file found. Pass --pages <dir> or create {}",
            config_path.display()
        ),
    };

    io::validate_pages_dir(&config.pages_path).with_context(|| {
        format!("Pages path '{}' is invalid", config.pages_path.display())
    })?;
    Ok(config)
}

/// Warn when a page was written by a different schema version
fn check_namespace(document: &PageDocument, expected: &str) {
    if document.namespace().uri() != expected {
        log::warn!(
            "Page namespace {} differs from configured {expected}",
            document.namespace()
        );
    }
}

fn add_note(config: &Config, page: RelativePathBuf, note_type: NoteType, quote: bool) -> Result<()> {
    let mut connection = FilePageConnection::new(&config.pages_path, page);
    let document = connection.open()?;
    check_namespace(&document, &config.namespace);
    connection.release();

    let options = PlacementOptions::default().with_horizontal_offset(config.horizontal_offset);
    let outcome = AddNoteCommand::new()
        .with_options(options)
        .with_quote(quote && config.quote_selection)
        .execute(&mut connection, note_type, &mut StderrNotifier)?;

    let placement = outcome.placement;
    println!(
        "{} {} outline at ({}, {})",
        note_type.label(),
        if placement.created { "added in new" } else { "appended to" },
        placement.position.x,
        placement.position.y
    );
    Ok(())
}

fn list_outlines(config: &Config, page: RelativePathBuf) -> Result<()> {
    let mut connection = FilePageConnection::new(&config.pages_path, page);
    let document = connection.open()?;
    connection.release();
    check_namespace(&document, &config.namespace);

    for outline in document.root().elements().filter_map(Outline::wrap) {
        let bounds = outline.positional_data();
        let marker = if outline.is_selected() { "*" } else { " " };
        println!(
            "{marker} ({}, {}) {}x{}",
            bounds.x, bounds.y, bounds.width, bounds.height
        );
        let selected = outline.selected_text();
        if !selected.is_empty() {
            println!("    selected: {selected:?}");
        }
    }
    Ok(())
}

fn list_pages(config: &Config) -> Result<()> {
    for page in io::scan_pages(&config.pages_path)? {
        println!("{page}");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("outline-notes-cli");

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    };

    let config = resolve_config(cli.pages_override)?;

    match cli.command {
        Command::AddNote {
            page,
            note_type,
            quote,
        } => add_note(&config, page, note_type, quote),
        Command::Outlines { page } => list_outlines(&config, page),
        Command::Pages => list_pages(&config),
    }
}
