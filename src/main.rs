use clap::{Parser as ClapParser, Subcommand};
use fieldq::MergeStrategy;
use fieldq::cli::{self, CheckOptions, CheckResult, CliError};
use fieldq::output::{to_json, to_json_pretty};
use std::io::{self, Read};
use tracing::Level;

#[derive(ClapParser)]
#[command(name = "fieldq")]
#[command(about = "fieldq - select fields from JSON documents with where conditions")]
#[command(version)]
struct Cli {
    /// Log query processing to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and execute a query
    Check {
        /// The query to execute
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,

        /// How several selected fields are merged
        #[arg(long, value_enum, default_value_t = MergeStrategy::Overwrite)]
        merge: MergeStrategy,
    },

    /// Print the parsed tree of a query
    Ast {
        /// The query to parse
        query: String,
    },

    /// List every path of a JSON document
    Paths {
        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Show the query syntax reference
    Syntax,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            query,
            input,
            pretty,
            syntax_only,
            merge,
        } => run_check(query, input, pretty, syntax_only, merge),
        Commands::Ast { query } => cli::execute_ast(&query).map(|tree| print!("{}", tree)),
        Commands::Paths { input } => run_paths(input),
        Commands::Syntax => {
            print!("{}", cli::get_syntax_reference());
            Ok(())
        }
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
    pretty: bool,
    syntax_only: bool,
    merge: MergeStrategy,
) -> Result<(), CliError> {
    // Syntax checks never need a document
    let input = if syntax_only { None } else { read_input(input)? };

    let options = CheckOptions {
        query,
        input,
        syntax_only,
        merge,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(value) => {
            let json = if pretty {
                to_json_pretty(&value)
            } else {
                to_json(&value)
            };
            println!("{}", json);
        }
        CheckResult::Filtered => {}
    }
    Ok(())
}

fn run_paths(input: Option<String>) -> Result<(), CliError> {
    let input = read_input(input)?;
    for path in cli::execute_paths(input.as_deref())? {
        println!("{}", path);
    }
    Ok(())
}
