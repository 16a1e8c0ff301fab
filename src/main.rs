//! Kaotic -- a scripted team-combat client driven over a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr; set `RUST_LOG=kaotic=debug` to trace each decision.

use std::io::{self, BufRead, Write};

use kaotic::engine::Engine;
use kaotic::protocol::parser::{parse_command, Command};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if let Err(e) = run(stdin.lock(), &mut out) {
        tracing::error!("session ended: {}", e);
    }
}

/// Runs the protocol loop until `quit` or end of input.
///
/// Lines that are not valid UTF-8 are decoded lossily, so they fall through
/// as unknown commands instead of ending the session.
fn run<R: BufRead, W: Write>(mut input: R, out: &mut W) -> io::Result<()> {
    let mut engine = Engine::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Cci => engine.handle_cci(out)?,
            Command::IsReady => engine.handle_isready(out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    tracing::warn!("setoption: {}", e);
                }
            }
            Command::NewGame => engine.new_game(),
            Command::TeamData => engine.handle_teamdata(out)?,
            Command::Position { json } => {
                if let Err(e) = engine.set_position(&json) {
                    tracing::warn!("position: {}", e);
                }
            }
            Command::Go(params) => engine.handle_go(&params, out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
