mod error;
mod fetch;
mod format;
mod lookup;
mod parser;
mod records;
mod text;

use clap::{Parser, Subcommand};
use tracing::error;

use format::{ListQuery, OutputFormat};
use records::Feature;

const LOG_FILE: &str = "dnd_search.log";

#[derive(Parser)]
#[command(
    name = "dnd_search",
    about = "Look up D&D 5e classes, subclasses, and spells from dnd5e.wikidot.com"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch spell information
    Spell {
        #[command(subcommand)]
        command: SpellCommand,
    },
    /// Fetch class information
    Class {
        #[command(subcommand)]
        command: ClassCommand,
    },
}

#[derive(Subcommand)]
enum SpellCommand {
    /// Fetch an individual spell
    Get {
        /// Spell name (multiple words allowed)
        #[arg(required = true)]
        name: Vec<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "txt")]
        output: OutputFormat,
    },
    /// List spells as a table
    List {
        /// Limit to one class's spell list
        #[arg(short = 'c', long = "class")]
        class_name: Option<String>,
        /// Limit to a spell level
        #[arg(short, long)]
        level: Option<String>,
        /// Limit to a school of magic
        #[arg(short, long)]
        school: Option<String>,
        /// Limit to spells using all the given components
        #[arg(short = 'C', long = "component", num_args = 1..)]
        components: Vec<String>,
        /// Abbreviate columns for narrow displays
        #[arg(long)]
        short: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value = "txt")]
        output: OutputFormat,
    },
}

#[derive(Subcommand)]
enum ClassCommand {
    /// Fetch base class information
    Get {
        /// Class name, e.g. wizard
        name: String,
        /// Show only features whose title contains the given words
        #[arg(short, long, num_args = 1..)]
        feature: Vec<String>,
        /// Show only the leveling table
        #[arg(long)]
        leveling: bool,
        /// List the class's subclasses instead
        #[arg(long)]
        list_subclasses: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value = "txt")]
        output: OutputFormat,
    },
    /// Fetch subclass/archetype information
    Subclass {
        /// Parent class
        name: String,
        /// Subclass name (multiple words allowed)
        #[arg(required = true)]
        subclass: Vec<String>,
        /// Show only features whose title contains the given words
        #[arg(short, long, num_args = 1..)]
        feature: Vec<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "txt")]
        output: OutputFormat,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> error::Result<()> {
    let output = match cli.command {
        Commands::Spell { command } => match command {
            SpellCommand::Get { name, output } => {
                let spell = lookup::spell(&name.join(" "))?;
                format::spell(&spell, output)
            }
            SpellCommand::List {
                class_name,
                level,
                school,
                components,
                short,
                output,
            } => {
                let spells = lookup::spell_list(class_name.as_deref(), short)?;
                let query = ListQuery {
                    level,
                    school,
                    components,
                    short,
                };
                format::spell_list(&spells, &query, output)
            }
        },
        Commands::Class { command } => match command {
            ClassCommand::Get {
                name,
                feature,
                leveling,
                list_subclasses,
                output,
            } => {
                if list_subclasses {
                    let names = lookup::subclass_names(&name)?;
                    format::subclass_list(&text::title_case(&name), &names, output)
                } else {
                    let class = lookup::class(&name)?;
                    if !feature.is_empty() {
                        format::features(&filter_features(&class.features, &feature), output)
                    } else if leveling {
                        format::leveling(&class, output)
                    } else {
                        format::class(&class, output)
                    }
                }
            }
            ClassCommand::Subclass {
                name,
                subclass,
                feature,
                output,
            } => {
                let sub = lookup::subclass(&name, &subclass.join(" "))?;
                if !feature.is_empty() {
                    format::features(&filter_features(&sub.features, &feature), output)
                } else {
                    format::subclass(&sub, output)
                }
            }
        },
    };

    println!("{}", output);
    Ok(())
}

fn filter_features(features: &[Feature], words: &[String]) -> Vec<Feature> {
    let search = words.join(" ").to_lowercase();
    features
        .iter()
        .filter(|f| f.title.to_lowercase().contains(&search))
        .cloned()
        .collect()
}

fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter, Layer};

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "error".into()));

    // Diagnostic log file; logging degrades to stderr-only if it cannot be
    // opened.
    let file_layer = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .ok()
        .map(|file| {
            fmt::layer()
                .with_writer(std::sync::Arc::new(file))
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG)
        });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
}
