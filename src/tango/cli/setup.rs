use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tango::model::Frequency;

#[derive(Parser, Debug)]
#[command(name = "tango", bin_name = "tango", version)]
#[command(about = "Vocabulary flashcards for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $TANGO_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a word
    #[command(alias = "a")]
    Add {
        /// The word as written
        vocabulary: String,

        /// How it is read (e.g. hiragana)
        pronunciation: String,

        /// What it means
        meaning: String,
    },

    /// List words
    Ls {
        /// Only words containing this text in any field
        #[arg(short, long)]
        search: Option<String>,

        /// Newest words first
        #[arg(short, long, conflicts_with = "search")]
        recent: bool,

        /// How many words --recent shows
        #[arg(short = 'n', long, requires = "recent")]
        limit: Option<usize>,

        /// Only words rated at this tier (high, medium, low, unset)
        #[arg(short, long, conflicts_with_all = ["search", "recent"])]
        freq: Option<Frequency>,
    },

    /// Show a word and the lists it belongs to
    Show {
        /// Index or #id of the word
        word: String,
    },

    /// Change a word's text
    #[command(alias = "e")]
    Edit {
        /// Index or #id of the word
        word: String,

        #[arg(long)]
        vocabulary: Option<String>,

        #[arg(long)]
        pronunciation: Option<String>,

        #[arg(long)]
        meaning: Option<String>,
    },

    /// Rate how often words need review
    #[command(alias = "r")]
    Rate {
        /// high, medium or low
        frequency: Frequency,

        /// Indexes of the words (e.g. 1 3 5-7)
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Delete one or more words
    #[command(alias = "delete")]
    Rm {
        /// Indexes of the words (e.g. 1 3 5-7)
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Delete every word (lists are kept)
    Clear {
        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },

    /// Show today's study card
    #[command(alias = "d")]
    Daily {
        /// Build a fresh card from the collection
        #[arg(short, long)]
        generate: bool,
    },

    /// Manage study lists
    #[command(subcommand)]
    List(ListCommands),

    /// Export the collection as a markdown table
    Export {
        /// Directory to write into (defaults to the current directory)
        path: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "path")]
        stdout: bool,
    },

    /// Replace the collection with the words in a markdown table
    Import {
        /// File to read
        file: PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (daily-limit, recent-limit, max-import-bytes)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Show all lists
    Ls,

    /// Create a list
    New {
        name: String,

        /// Start the list with this word
        #[arg(long, value_name = "WORD")]
        with: Option<String>,
    },

    /// Rename a list
    Rename { name: String, new_name: String },

    /// Delete a list (its words are kept)
    Rm { name: String },

    /// Add words to a list
    Add {
        name: String,

        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Take words out of a list
    Remove {
        name: String,

        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Move words from one list to another
    Move {
        from: String,
        to: String,

        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Show the words in a list
    Show { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rate() {
        let cli = Cli::try_parse_from(["tango", "rate", "HIGH", "1", "3-4"]).unwrap();
        match cli.command {
            Some(Commands::Rate { frequency, words }) => {
                assert_eq!(frequency, Frequency::High);
                assert_eq!(words, vec!["1", "3-4"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_move() {
        let cli = Cli::try_parse_from(["tango", "list", "move", "A", "B", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List(ListCommands::Move { ref from, ref to, .. })) if from == "A" && to == "B"
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tango", "ls", "--data-dir", "/tmp/x", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_bad_frequency_is_rejected() {
        assert!(Cli::try_parse_from(["tango", "rate", "sometimes", "1"]).is_err());
    }
}
