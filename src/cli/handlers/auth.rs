use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::api::requests::SignUpRequest;
use crate::cli::commands::{LoginArgs, RegisterArgs};
use crate::cli::output::SessionJson;
use crate::io::session_store::SessionStore;

use super::{CmdResult, Context, print_message};

/// Use the given password, or prompt for one. A terminal gets a masked
/// prompt; piped input is read as one line.
fn read_password(given: Option<String>) -> io::Result<String> {
    if let Some(p) = given {
        return Ok(p);
    }
    eprint!("Password: ");
    io::stderr().flush()?;

    if !io::stdin().is_terminal() {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    terminal::enable_raw_mode()?;
    let typed = read_masked();
    terminal::disable_raw_mode()?;
    eprintln!();
    typed
}

fn read_masked() -> io::Result<String> {
    let mut password = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            match feed_key(&mut password, key) {
                Entry::Typing => {}
                Entry::Done => return Ok(password),
                Entry::Cancelled => {
                    return Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        "password entry cancelled",
                    ));
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Entry {
    Typing,
    Done,
    Cancelled,
}

/// Apply one key press to the hidden buffer.
fn feed_key(password: &mut String, key: KeyEvent) -> Entry {
    if key.kind == KeyEventKind::Release {
        return Entry::Typing;
    }
    match key.code {
        KeyCode::Enter => Entry::Done,
        KeyCode::Esc => Entry::Cancelled,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Entry::Cancelled,
        KeyCode::Backspace => {
            password.pop();
            Entry::Typing
        }
        KeyCode::Char(c) => {
            password.push(c);
            Entry::Typing
        }
        _ => Entry::Typing,
    }
}

pub(super) async fn cmd_login(ctx: &Context, args: LoginArgs) -> CmdResult {
    let password = read_password(args.password)?;
    let session = ctx.client.sign_in(&args.username, &password).await?;
    ctx.store.save(&session)?;
    log::info!("signed in as {}", session.username);

    if ctx.json {
        let out = SessionJson {
            username: &session.username,
            roles: session.display_roles(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Signed in as {}", session.username);
    }
    Ok(())
}

pub(super) fn cmd_logout(store: &SessionStore, json: bool) -> CmdResult {
    store.clear()?;
    print_message(json, "Signed out".to_string())
}

pub(super) async fn cmd_register(ctx: &Context, args: RegisterArgs) -> CmdResult {
    let password = read_password(args.password)?;
    let request = SignUpRequest {
        username: args.username,
        email: args.email,
        password,
        full_name: args.full_name,
    };
    ctx.client.sign_up(&request).await?;
    ctx.emit_message(format!(
        "Registered {}. Sign in with `td login {}`",
        request.username, request.username
    ))
}
