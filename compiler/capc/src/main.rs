//! Cap CLI

use capc::commands::{lex_file, parse_file, run_file};
use capc::{init_tracing, CliError};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let result = match command.as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: cap run <file.cap> [options] [args]");
                std::process::exit(1);
            };
            run_file(path, &args[3..])
        }
        "lex" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: cap lex <file.cap>");
                std::process::exit(1);
            };
            lex_file(path)
        }
        "parse" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: cap parse <file.cap>");
                std::process::exit(1);
            };
            parse_file(path)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(0)
        }
        "version" | "--version" | "-v" => {
            println!("Cap {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        _ => {
            // A bare program file runs it.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("cap"))
            {
                run_file(command, &args[2..])
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => exit_with(&err),
    }
}

fn exit_with(err: &CliError) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}

fn print_usage() {
    println!("Cap template engine");
    println!();
    println!("Usage: cap <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.cap> [args]  Run a program; args become its opts");
    println!("  lex <file.cap>         Tokenize and display tokens");
    println!("  parse <file.cap>       Parse and display the AST");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Program options (read with opts.get/opts.has/opts.args):");
    println!("  --name value, -n value  Set an option");
    println!("  --name=value            Set an option inline");
    println!("  --flag                  Set an option to \"\"");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=cap_eval=debug  Enable engine logs (stderr)");
    println!("  CAP_LOG_TREE=1           Show logs as an indented span tree");
    println!();
    println!("Examples:");
    println!("  cap run page.cap");
    println!("  cap run page.cap --title Home out.html");
    println!("  cap page.cap");
}
