use clap::{Parser, Subcommand};
use palabra_config::ColorMode;

#[derive(Parser, Debug)]
#[command(name = "palabra", version)]
#[command(about = "Look up words on WordReference from the terminal")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Word to look up; without it an interactive prompt starts
    pub word: Option<String>,

    /// Source language code (defaults to PALABRA_FROM_LANG or "en")
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// Target language code (defaults to PALABRA_TO_LANG or "es")
    #[arg(long, global = true)]
    pub to: Option<String>,

    /// When to color output: auto, always or never
    #[arg(long, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Print results as JSON instead of colored text
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List dictionaries WordReference offers
    Dicts {
        /// Keep only pairs whose code or language name occurs in this text
        filter: Option<String>,
    },
    /// Talk to a local AnkiConnect service
    Anki {
        #[command(subcommand)]
        command: AnkiCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnkiCommand {
    /// Call any action and print its result
    Invoke {
        action: String,
        /// Params as a JSON object, e.g. '{"query": "deck:current"}'
        params: Option<String>,
    },
    /// List deck names
    Decks,
    /// List note type names
    Models,
    /// Look up a word and add cards for the entries at the given positions
    Add {
        word: String,
        /// 1-based entry positions, as numbered across all sections
        #[arg(required = true)]
        indexes: Vec<usize>,
        /// Open each card in $EDITOR before adding it
        #[arg(long)]
        edit: bool,
    },
    /// Generate example sentences for one entry of a word
    Phrases {
        word: String,
        /// 1-based entry position, as numbered across all sections
        index: usize,
        /// How many sentences to ask for (defaults to PALABRA_PHRASE_COUNT or 5)
        #[arg(long)]
        count: Option<usize>,
        /// Add cards for the generated sentences at these 1-based positions
        #[arg(long = "add", value_name = "N", num_args = 1..)]
        add: Vec<usize>,
        /// Open each card in $EDITOR before adding it
        #[arg(long)]
        edit: bool,
    },
}
