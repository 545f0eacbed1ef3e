use std::fs::File;
use std::io::{BufReader, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use monkey::environment::Environment;
use monkey::error::MonkeyError;
use monkey::interpreter::Interpreter;
use monkey::parser::Parser;
use monkey::repl::{Repl, PROMPT};
use monkey::scanner::Scanner;

#[derive(ClapParser, Debug)]
#[command(version, about = "Monkey language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to monkey.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Starts an interactive session (the default)
    Repl,

    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the token stream as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints its canonical rendering
    Parse { filename: PathBuf },

    /// Runs input from a file as a Monkey program
    Run { filename: PathBuf },
}

/// Reads the contents of a file into a String
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let source = String::from_utf8(buf).map_err(MonkeyError::from)?;

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("monkey.log").context("Failed to create monkey.log")?;

    // Strip the crate prefix so records read `[parser:123] - ...`
    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("monkey::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env() // RUST_LOG overrides the default level
        .init();

    info!("Logger initialized, writing to monkey.log");
    Ok(())
}

/// Interactive session with line editing and history.
fn interactive() -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to initialise line editor")?;
    let mut repl = Repl::new();
    let mut stdout = std::io::stdout();

    println!("This is the Monkey programming language!");
    println!("Enter \"quit\" to exit.");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }

                let outcome = repl.eval_line(&line);

                if !Repl::report(&outcome, &mut stdout)? {
                    break;
                }
            }

            Err(ReadlineError::Interrupted) => {
                debug!("Line interrupted");
                continue;
            }

            Err(ReadlineError::Eof) => break,

            Err(e) => return Err(e).context("Failed to read line"),
        }
    }

    info!("Interactive session ended");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            info!("Running Repl subcommand");

            if std::io::stdin().is_terminal() {
                interactive()?;
            } else {
                let stdin = std::io::stdin();
                let mut stdout = std::io::stdout();
                Repl::new().run(stdin.lock(), &mut stdout)?;
            }
        }

        Commands::Tokenize { filename, json } => {
            info!("Running Tokenize subcommand");
            let source = read_file(filename)?;
            let tokens: Vec<_> = Scanner::new(&source).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in &tokens {
                    println!("{}", token);
                }
            }

            info!("Tokenization completed with {} tokens", tokens.len());
        }

        Commands::Parse { filename } => {
            info!("Running Parse subcommand");
            let source = read_file(filename)?;
            let mut parser = Parser::from_source(&source);
            let program = parser.parse_program();

            if !parser.errors().is_empty() {
                for error in parser.errors() {
                    eprintln!("{}", error);
                }

                debug!("Parse failed, exiting with code 65");
                std::process::exit(65);
            }

            println!("{}", program);
            info!("Parse subcommand completed");
        }

        Commands::Run { filename } => {
            info!("Running Run subcommand");
            let source = read_file(filename)?;
            let env = Environment::new_shared();

            match Interpreter::new().eval_source(&source, &env) {
                Ok(object) => {
                    if !object.is_null() {
                        println!("{}", object);
                    }

                    info!("Program executed successfully");
                }

                Err(MonkeyError::Parse(errors)) => {
                    for error in errors {
                        eprintln!("{}", error);
                    }

                    std::process::exit(65);
                }

                Err(e) => {
                    debug!("Runtime debug: {}", e);
                    eprintln!("ERROR: {}", e);
                    std::process::exit(70);
                }
            }
        }
    }

    Ok(())
}
