use lispy::{cmdline, environment};
use std::rc::Rc;

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();
    // The one process-wide standard environment. Built once here and passed
    // by reference into every top-level eval.
    let env = Rc::new(environment::Environment::default());
    let interface = cmdline::setup()?;
    cmdline::repl(&interface, &env);
    cmdline::save_history(&interface)?;
    Ok(())
}
