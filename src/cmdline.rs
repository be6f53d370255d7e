use crate::environment::Environment;
use crate::interpreter;
use ansi_term::Colour;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::path::PathBuf;
use std::rc::Rc;

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("lispy")?;
    interface.set_prompt("lispy> ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".lispy_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

/// The outer read loop. Evaluation errors are reported and the loop resumes;
/// only EOF or a terminal error ends the session.
pub fn repl<T: Terminal>(interface: &Interface<T>, env: &Rc<Environment>) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                interface.add_history_unique(line.clone());
                match interpreter::rep(&line, env) {
                    Ok(Some(text)) => {
                        writeln!(interface, "{}", text).ok();
                    }
                    Ok(None) => {}
                    Err(e) => {
                        writeln!(interface, "{}", format_error(&e)).ok();
                    }
                }
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

fn format_error(e: &interpreter::Error) -> String {
    let text = format!("{}", e);
    if atty::is(atty::Stream::Stdout) {
        Colour::Red.paint(text).to_string()
    } else {
        text
    }
}
