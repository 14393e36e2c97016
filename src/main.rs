//! Character-based chess for two players at one terminal. An optional
//! command-line argument names a playback file whose lines are consumed as
//! if typed.

use std::io;

use arbiter::interface::{read_playback, Session};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let script = match std::env::args().nth(1) {
        Some(path) => read_playback(&path)?,
        None => Vec::new(),
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    Session::with_script(&mut input, &mut output, script).run()
}
