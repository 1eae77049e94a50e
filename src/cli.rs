use std::env;
use std::fs;
use std::io::{self, Read, Write};

use crate::error::{RjError, RjResult};
use crate::options::{PrettyOptions, WalkOptions};
use crate::walker::{walk, Event, ParseStatus};

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} <COMMAND> [OPTIONS]\n\
         \n\
         Commands:\n\
           prettify [FILE]           Pretty-print JSON from FILE (default stdin) to stdout\n\
           prettify-file IN OUT      Pretty-print JSON from file IN into file OUT\n\
           walk [FILE]               Print one line per walked event (path, kind, span)\n\
           get PATH [FILE]           Print the literal value at PATH (dot/bracket notation)\n\
           set PATH VALUE [FILE]     Print FILE (default stdin) with PATH replaced by VALUE\n\
         \n\
         Options:\n\
           --ensure-ascii            Escape non-ASCII bytes in prettify output as \\uXXXX\n\
           --indent N                Spaces per indent level for prettify (default 2)\n\
           -h, --help                Show this help\n",
        prog = program
    );
}

enum Command {
    Prettify { input: Option<String> },
    PrettifyFile { input: String, output: String },
    Walk { input: Option<String> },
    Get { path: String, input: Option<String> },
    Set { path: String, value: String, input: Option<String> },
}

fn parse_args() -> RjResult<(Command, PrettyOptions)> {
    let mut args: Vec<String> = env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "jsonwalk".to_string());
    args.remove(0);

    let mut pretty_opts = PrettyOptions::default();
    let mut positionals: Vec<String> = Vec::new();
    let mut subcommand: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "--ensure-ascii" => pretty_opts.ensure_ascii = true,
            "--indent" => {
                i += 1;
                let n = args
                    .get(i)
                    .ok_or_else(|| RjError::Format("missing N for --indent".into()))?;
                pretty_opts.indent_width = n
                    .parse()
                    .map_err(|_| RjError::Format(format!("invalid --indent value '{n}'")))?;
            }
            other if subcommand.is_none() => subcommand = Some(other.to_string()),
            other => positionals.push(other.to_string()),
        }
        i += 1;
    }

    let subcommand = subcommand.ok_or_else(|| RjError::Format("missing command".into()))?;
    let command = match subcommand.as_str() {
        "prettify" => Command::Prettify { input: positionals.first().cloned() },
        "prettify-file" => {
            let input = positionals
                .first()
                .cloned()
                .ok_or_else(|| RjError::Format("prettify-file requires IN OUT".into()))?;
            let output = positionals
                .get(1)
                .cloned()
                .ok_or_else(|| RjError::Format("prettify-file requires IN OUT".into()))?;
            Command::PrettifyFile { input, output }
        }
        "walk" => Command::Walk { input: positionals.first().cloned() },
        "get" => {
            let path = positionals
                .first()
                .cloned()
                .ok_or_else(|| RjError::Format("get requires PATH".into()))?;
            Command::Get { path, input: positionals.get(1).cloned() }
        }
        "set" => {
            let path = positionals
                .first()
                .cloned()
                .ok_or_else(|| RjError::Format("set requires PATH VALUE".into()))?;
            let value = positionals
                .get(1)
                .cloned()
                .ok_or_else(|| RjError::Format("set requires PATH VALUE".into()))?;
            Command::Set { path, value, input: positionals.get(2).cloned() }
        }
        other => return Err(RjError::Format(format!("unknown command '{other}'"))),
    };
    Ok((command, pretty_opts))
}

fn read_input(path: &Option<String>) -> RjResult<Vec<u8>> {
    match path {
        Some(p) => Ok(fs::read(p)?),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run() -> RjResult<()> {
    let (command, pretty_opts) = parse_args()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Prettify { input } => {
            let buf = read_input(&input)?;
            let pretty = crate::pretty::prettify(&buf, &pretty_opts)?;
            writeln!(out, "{pretty}")?;
        }
        Command::PrettifyFile { input, output } => {
            crate::fileio::prettify_file(&input, &output, &pretty_opts)?;
        }
        Command::Walk { input } => {
            let buf = read_input(&input)?;
            let mut write_err: Option<RjError> = None;
            let status = {
                let mut on_event = |ev: Event<'_>| {
                    if write_err.is_some() {
                        return;
                    }
                    let res = match ev {
                        Event::Scalar { path, token, .. } => {
                            writeln!(out, "{path}\t{:?}\t{}", token.kind, token.span_str(&buf))
                        }
                        Event::Begin { path, kind, .. } => writeln!(out, "{path}\t{kind:?}\tBEGIN"),
                        Event::End { path, token, .. } => writeln!(out, "{path}\t{:?}\tEND", token.kind),
                    };
                    if let Err(e) = res {
                        write_err = Some(RjError::Io(e));
                    }
                };
                walk(&buf, &mut on_event, &WalkOptions::default())
            };
            if let Some(e) = write_err {
                return Err(e);
            }
            if let ParseStatus::Invalid { pos } = status {
                return Err(RjError::Invalid { pos });
            }
        }
        Command::Get { path, input } => {
            let buf = read_input(&input)?;
            let mut found: Option<String> = None;
            {
                let mut on_event = |ev: Event<'_>| {
                    if ev.path() == path {
                        if let Event::Scalar { token, .. } | Event::End { token, .. } = ev {
                            found = Some(token.span_str(&buf).to_string());
                        }
                    }
                };
                let status = walk(&buf, &mut on_event, &WalkOptions::default());
                if let ParseStatus::Invalid { pos } = status {
                    return Err(RjError::Invalid { pos });
                }
            }
            match found {
                Some(text) => writeln!(out, "{text}")?,
                None => return Err(RjError::Format(format!("path '{path}' not found"))),
            }
        }
        Command::Set { path, value, input } => {
            let buf = read_input(&input)?;
            let (result, _matched) = crate::mutate::setf(&buf, &path, crate::mutate::SetOp::Replace(value.as_bytes()))?;
            out.write_all(&result)?;
        }
    }
    Ok(())
}

/// Entry point shared by the `jsonwalk` and `jw` binaries.
pub fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
