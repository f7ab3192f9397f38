//! `diary` - command-line shell for the Mini Digital Diary.

mod cli;
mod commands;
mod logging;
mod menu;
mod prompt;
mod render;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use diary_core::persistence::CredentialStore;
use diary_core::{Diary, DiaryConfig, DiaryError, Login};
use log::error;

use cli::{Cli, Command};

const EXIT_FAILURE: u8 = 1;
const EXIT_REJECTED: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.config();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stderr = io::stderr();

    match run(&cli, &config, &mut input, &mut stderr) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run<R: BufRead, E: Write>(
    cli: &Cli,
    config: &DiaryConfig,
    input: &mut R,
    prompts: &mut E,
) -> Result<ExitCode, DiaryError> {
    let Some((username, secret)) = credentials(cli, config, input, prompts)? else {
        writeln!(prompts, "No login given.")?;
        return Ok(ExitCode::from(EXIT_FAILURE));
    };

    let mut diary = match Diary::login(config, &username, &secret)? {
        Login::Registered(diary) => {
            writeln!(prompts, "Registered successfully!")?;
            diary
        }
        Login::Welcome(diary) => {
            writeln!(prompts, "Welcome back, {username}!")?;
            diary
        }
        Login::Rejected => {
            writeln!(prompts, "Incorrect key. Access denied.")?;
            return Ok(ExitCode::from(EXIT_REJECTED));
        }
    };

    let command = cli.command.clone().unwrap_or(Command::Menu);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&mut diary, &command, cli.format(), input, prompts, &mut out)?;
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Username and secret from flags/env, prompting for whatever is missing.
///
/// `None` if input ends before both are known.
fn credentials<R: BufRead, E: Write>(
    cli: &Cli,
    config: &DiaryConfig,
    input: &mut R,
    prompts: &mut E,
) -> Result<Option<(String, String)>, DiaryError> {
    let username = match &cli.user {
        Some(user) => user.clone(),
        None => match prompt::ask(input, prompts, "Enter your name: ")? {
            Some(user) => first_word(&user),
            None => return Ok(None),
        },
    };

    let secret = match &cli.secret {
        Some(secret) => secret.clone(),
        None => {
            let users = CredentialStore::load(&config.users_file())?;
            let question = if users.contains(&username) {
                "Enter your secret key: "
            } else {
                "New user! Set secret key: "
            };
            match prompt::ask(input, prompts, question)? {
                Some(secret) => first_word(&secret),
                None => return Ok(None),
            }
        }
    };

    Ok(Some((username, secret)))
}

/// Typed credentials are single words; anything after the first is ignored.
fn first_word(line: &str) -> String {
    line.split_whitespace().next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn ask_credentials(
        cli: &Cli,
        config: &DiaryConfig,
        script: &str,
    ) -> (Option<(String, String)>, String) {
        let mut input = Cursor::new(script.to_string());
        let mut prompts = Vec::new();
        let result = credentials(cli, config, &mut input, &mut prompts).unwrap();
        (result, String::from_utf8(prompts).unwrap())
    }

    #[test]
    fn prompts_new_user_for_a_secret() {
        let dir = tempdir().unwrap();
        let config = DiaryConfig::new(dir.path());
        let cli = Cli::parse_from(["diary", "login"]);

        let (result, prompts) = ask_credentials(&cli, &config, "alice\nx\n");

        assert_eq!(result, Some(("alice".to_string(), "x".to_string())));
        assert_eq!(prompts, "Enter your name: New user! Set secret key: ");
    }

    #[test]
    fn prompts_known_user_for_their_secret() {
        let dir = tempdir().unwrap();
        let config = DiaryConfig::new(dir.path());
        Diary::register_new_user(&config, "alice", "x").unwrap();
        let cli = Cli::parse_from(["diary", "login", "-u", "alice"]);

        let (result, prompts) = ask_credentials(&cli, &config, "x\n");

        assert_eq!(result, Some(("alice".to_string(), "x".to_string())));
        assert_eq!(prompts, "Enter your secret key: ");
    }

    #[test]
    fn flags_skip_prompts() {
        let dir = tempdir().unwrap();
        let config = DiaryConfig::new(dir.path());
        let cli = Cli::parse_from(["diary", "login", "-u", "alice", "-s", "x"]);

        let (result, prompts) = ask_credentials(&cli, &config, "");

        assert_eq!(result, Some(("alice".to_string(), "x".to_string())));
        assert_eq!(prompts, "");
    }

    #[test]
    fn typed_credentials_keep_first_word() {
        let dir = tempdir().unwrap();
        let config = DiaryConfig::new(dir.path());
        let cli = Cli::parse_from(["diary", "login"]);

        let (result, _) = ask_credentials(&cli, &config, "  alice smith\nx y\n");

        assert_eq!(result, Some(("alice".to_string(), "x".to_string())));
    }

    #[test]
    fn end_of_input_gives_no_login() {
        let dir = tempdir().unwrap();
        let config = DiaryConfig::new(dir.path());
        let cli = Cli::parse_from(["diary", "login"]);

        let (result, _) = ask_credentials(&cli, &config, "alice\n");

        assert_eq!(result, None);
    }
}
