//! Interactive launcher menu.
//!
//! Entered when `pgall` is invoked without a subcommand. The loop re-reads
//! the gallery on every action and keeps running after a failed lifecycle,
//! so one broken plugin never takes the launcher down.

use crate::commands::{list, run};
use crate::GlobalOpts;
use colored::Colorize;
use pgall_logger as logger;
use std::io::{self, Write};

pub fn run_loop(opts: &GlobalOpts) -> anyhow::Result<()> {
    println!("{}", "pgall - plugin gallery launcher".bold());
    print_menu();

    loop {
        print!("{} ", "pgall ›".bold().cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            // EOF: exit cleanly
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                logger::debug(&format!("Failed to read input: {}", e));
                println!();
                break;
            }
        }

        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "list" | "ls" => {
                if let Err(e) = list::list_plugins(opts) {
                    logger::error(&format!("{}", e));
                }
            }
            "run" => {
                if argument.is_empty() {
                    println!("Usage: run <plugin-name>");
                    continue;
                }
                // A failed run returns to the menu; only the lifecycle dies
                if let Err(e) = run::handle_run(argument, false, opts) {
                    run::report_failure(&e);
                }
            }
            "help" | "?" => print_menu(),
            "exit" | "quit" | "q" => break,
            other => {
                println!("Unknown command: '{}'. Type 'help' for commands.", other);
            }
        }
    }

    println!("Bye.");
    Ok(())
}

fn print_menu() {
    println!("Commands:");
    println!("  {}              list discovered plugins", "list".bold());
    println!("  {}        run a plugin's lifecycle", "run <name>".bold());
    println!("  {}              show this help", "help".bold());
    println!("  {}              leave interactive mode", "exit".bold());
}
