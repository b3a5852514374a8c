// minorc: single-pass front end for a small systems language

use clap::error::ErrorKind;
use clap::{Parser as ClapParser, Subcommand};
use minorc::diagnostic::Diagnostic;
use minorc::output::Printer;
use minorc::session::Session;
use std::io::{self, IsTerminal, Stderr};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate source files
    Translate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print every declared struct and its fields
    ShowStructs {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print every declared function signature
    ShowFns {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the in-memory size of each table entry type
    Sizes,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                // usage errors are fatal like any other
                _ => ExitCode::from(1),
            };
        }
    };

    let color = io::stderr().is_terminal();
    let mut printer = Printer::new(io::stderr());

    match run(args.command, &mut printer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(diagnostic) => {
            for line in diagnostic.render(color) {
                // nothing left to report to if stderr itself fails
                let _ = printer.line(line);
            }
            ExitCode::from(1)
        }
    }
}

fn run(command: Command, printer: &mut Printer<Stderr>) -> Result<(), Diagnostic> {
    match command {
        Command::Translate { files } => {
            compile_all(&files)?;
        }
        Command::ShowStructs { files } => {
            let session = compile_all(&files)?;
            session.write_structs(printer).map_err(Diagnostic::bare)?;
        }
        Command::ShowFns { files } => {
            let session = compile_all(&files)?;
            session.write_functions(printer).map_err(Diagnostic::bare)?;
        }
        Command::Sizes => {
            Session::write_sizes(printer).map_err(Diagnostic::bare)?;
        }
    }
    Ok(())
}

/// Compile files in order into one session, stopping at the first error
fn compile_all(files: &[PathBuf]) -> Result<Session, Diagnostic> {
    let mut session = Session::new();
    for path in files {
        session.compile_file(path)?;
    }
    log::debug!("compiled {} file(s)", files.len());
    Ok(session)
}
