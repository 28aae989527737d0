use clap::{Parser as ClapParser, Subcommand};
use mapq::DEFAULT_MAX_DEPTH;
use mapq::cli::{self, CheckOptions, CheckResult, CliError, FilterOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "mapq")]
#[command(about = "mapq - boolean filter expressions over JSON documents")]
#[command(version)]
struct Cli {
    /// Maximum nesting depth accepted by the parser
    #[arg(long, global = true, env = "MAPQ_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression against a JSON object (or any element of an array)
    Check {
        /// The filter expression
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the elements of a JSON array that satisfy an expression
    Filter {
        /// The filter expression
        query: String,

        /// JSON array input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'mapq docs' to list categories)
        category: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let max_depth = cli.max_depth;

    let result = match cli.command {
        Commands::Check {
            query,
            input,
            syntax_only,
        } => run_check(query, input, syntax_only, max_depth),
        Commands::Filter {
            query,
            input,
            pretty,
        } => run_filter(query, input, pretty, max_depth),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_check(
    query: String,
    input: Option<String>,
    syntax_only: bool,
    max_depth: usize,
) -> Result<(), CliError> {
    // Syntax checks never need a document, so stdin is left alone
    let input = if syntax_only { input } else { read_input(input)? };

    let options = CheckOptions {
        query,
        input,
        syntax_only,
        max_depth,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Matched(matched) => println!("{}", matched),
    }
    Ok(())
}

fn run_filter(
    query: String,
    input: Option<String>,
    pretty: bool,
    max_depth: usize,
) -> Result<(), CliError> {
    let options = FilterOptions {
        query,
        input: read_input(input)?,
        pretty,
        max_depth,
    };

    let output = cli::execute_filter(&options)?;
    let json = if options.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }?;
    println!("{}", json);
    Ok(())
}
