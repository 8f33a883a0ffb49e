use console::style;
use log::error;
use rml::repl::{Repl, Response};
use rml::Interpreter;
use std::io::{self, BufRead, Write};
use std::{env, fs, process};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let code = match args.as_slice() {
        [] => repl(),
        [path] => run_file(path),
        _ => {
            eprintln!("usage: rml [FILE]");
            2
        }
    };
    process::exit(code);
}

fn run_file(path: &str) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{} {}: {}", style("error:").red().bold(), path, err);
            return 1;
        }
    };

    let mut interpreter = Interpreter::new();
    match interpreter.run(&source) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("{} {}", style("error:").red().bold(), err);
            1
        }
    }
}

fn repl() -> i32 {
    let mut repl = Repl::new(Interpreter::new());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = if repl.is_continuing() { ".. " } else { "> " };
        print!("{}", style(prompt).dim());
        if stdout.flush().is_err() {
            return 1;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return 0,
            Ok(_) => {}
            Err(err) => {
                error!("failed to read input: {}", err);
                return 1;
            }
        }

        match repl.handle_line(&line) {
            Response::Continue => {}
            Response::Value(value) => {
                if !value.is_nil() {
                    println!("=> {:?}", value);
                }
            }
            Response::Error(err) => eprintln!("{} {}", style("error:").red().bold(), err),
            Response::Text(text) => {
                if !text.is_empty() {
                    println!("{}", text);
                }
            }
            Response::Exit => return 0,
        }
    }
}
