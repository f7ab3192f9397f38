//! Line-oriented console input.
//!
//! Everything here is generic over `BufRead`/`Write` so the interactive
//! paths can be driven from tests with in-memory buffers.

use std::io::{self, BufRead, Write};

use diary_core::persistence::{trim_cr, CONTENT_TERMINATOR};

/// Print `prompt` and read one line, without its line ending.
///
/// Returns `None` at end of input.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(Some(trim_cr(&line).to_string()))
}

/// Ask a yes/no question. Anything but an answer starting with `y` is a no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    let answer = ask(input, out, &format!("{question} (y/N): "))?;
    Ok(answer.as_deref().map(is_yes).unwrap_or(false))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim_start().chars().next(), Some('y' | 'Y'))
}

/// Ask for a 1-based position. Anything that isn't a number is `None`.
pub fn ask_position<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<usize>> {
    let answer = ask(input, out, prompt)?;
    Ok(answer.and_then(|a| a.trim().parse().ok()))
}

/// Collect note lines until a line consisting of `~` or end of input.
///
/// The terminator line is consumed and not part of the body.
pub fn read_note_body<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut body = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let content = trim_cr(line.strip_suffix('\n').unwrap_or(&line));
        if content == CONTENT_TERMINATOR {
            break;
        }
        body.push_str(content);
        body.push('\n');
    }
    Ok(body)
}

/// Fold a value onto one line so it can't break a single-line field.
pub fn single_line(value: &str) -> String {
    value
        .split(['\n', '\r'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
