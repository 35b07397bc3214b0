use std::fs;

use clap::{Parser, builder::RangedU64ValueParser};
use pascaline::{
    execute,
    interpreter::{
        call_stack::{DEFAULT_MAX_CALL_DEPTH, MAX_CALL_DEPTH_LIMIT},
        io::StdinReader,
    },
};

/// pascaline runs programs written in a small subset of Pascal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells pascaline to read the program from a file instead of the
    /// argument itself.
    #[arg(short, long)]
    file: bool,

    /// Prints the final bindings of the program frame after it finishes.
    #[arg(short, long)]
    memory: bool,

    /// The largest number of live activation records, between 1 and 4096.
    #[arg(long,
          default_value_t = DEFAULT_MAX_CALL_DEPTH,
          value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_CALL_DEPTH_LIMIT as u64))]
    max_depth: usize,

    source: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let program = if args.file {
        fs::read_to_string(&args.source).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.source);
            std::process::exit(1);
        })
    } else {
        args.source
    };

    match execute(&program, &mut StdinReader, args.max_depth) {
        Ok(execution) => {
            print!("{}", execution.output);
            if args.memory {
                for (name, value) in &execution.bindings {
                    println!("{name} = {value}");
                }
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.status());
        },
    }
}
