use anyhow::Result;
use std::io::{BufRead, Write};

use crate::app::AppState;
use crate::app::commands::Command;
use crate::catalog::{AddUserOutcome, BorrowOutcome, ReturnOutcome};
use crate::error::CatalogError;
use crate::ui::Console;

/// Run the interactive loop until the user confirms exit or input ends.
///
/// Top menu -> login -> authenticated session, then back to the top menu.
/// Catalog errors never unwind past the dispatcher: they are printed as a
/// notice and the loop resumes.
pub fn run_app<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        console.say("")?;
        console.say("=== Library Catalog ===")?;
        console.say("  l - log in")?;
        console.say("  e - exit")?;
        let Some(choice) = console.prompt("Select an option: ")? else {
            return Ok(());
        };
        match choice.to_ascii_lowercase().as_str() {
            "l" => {
                if let Some(username) = login(console, app)? {
                    app.current_user = Some(username);
                    run_session(console, app)?;
                    app.current_user = None;
                }
            }
            "e" => {
                // end of input counts as a confirmed exit
                if console.confirm("Exit the catalog?")?.unwrap_or(true) {
                    return Ok(());
                }
            }
            _ => console.say("Wrong option.")?,
        }
    }
}

/// Resolve a username into an authenticated identity.
///
/// An unknown name gets a registration offer; registering creates a
/// non-admin user and ends the login attempt without authenticating.
/// Returns `None` when the attempt is cancelled or input ends.
fn login<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &mut AppState,
) -> Result<Option<String>> {
    loop {
        let Some(username) = console.prompt("Username: ")? else {
            return Ok(None);
        };
        if username.is_empty() {
            continue;
        }
        if app.catalog.username_exists(&username) {
            tracing::info!(%username, "user logged in");
            return Ok(Some(username));
        }
        match console.confirm(&format!("Unknown user '{username}'. Register as a new user?"))? {
            Some(true) => {
                match app.catalog.add_user(&username, false) {
                    AddUserOutcome::Added => console.say(&format!(
                        "Registered '{username}'. Log in to start borrowing."
                    ))?,
                    AddUserOutcome::UsernameTaken => {
                        console.say("That username is already taken.")?
                    }
                }
                return Ok(None);
            }
            Some(false) | None => return Ok(None),
        }
    }
}

fn run_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        let Some(username) = app.current_user.clone() else {
            return Ok(());
        };
        let is_admin = match app.catalog.get_user(&username) {
            Ok(user) => user.is_admin,
            Err(err) => {
                // account removed mid-session
                console.say(&err.to_string())?;
                return Ok(());
            }
        };
        render_menu(console, &username, is_admin)?;
        let Some(input) = console.prompt("Select a command: ")? else {
            return Ok(());
        };
        let Some(command) = Command::parse(&input) else {
            console.say("Wrong option.")?;
            continue;
        };
        if command.requires_admin() {
            // re-read the flag at dispatch time; the menu's copy may be stale
            let allowed = app
                .catalog
                .get_user(&username)
                .map(|u| u.is_admin)
                .unwrap_or(false);
            if !allowed {
                console.say("You do not have permission to do that.")?;
                continue;
            }
        }
        if command == Command::LogOut {
            tracing::info!(%username, "user logged out");
            console.say(&format!("Goodbye, {username}."))?;
            return Ok(());
        }
        dispatch(console, app, &username, command)?;
    }
}

fn render_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    username: &str,
    is_admin: bool,
) -> std::io::Result<()> {
    console.say("")?;
    let role = if is_admin { " (admin)" } else { "" };
    console.say(&format!("--- Logged in as {username}{role} ---"))?;
    for command in Command::ALL {
        if command.requires_admin() && !is_admin {
            continue;
        }
        console.say(&format!("  {:<3} - {}", command.word(), command.describe()))?;
    }
    Ok(())
}

/// Execute one command against the catalog.
///
/// This is the single place catalog errors surface: every arm yields a
/// `Result` whose error is printed as a notice before control returns to
/// the session loop.
fn dispatch<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &mut AppState,
    username: &str,
    command: Command,
) -> Result<()> {
    let result: std::result::Result<(), CatalogError> = match command {
        Command::ViewBooks => {
            if app.catalog.books().is_empty() {
                console.say("No books in the catalog.")?;
            } else {
                console.render_books(app.catalog.books())?;
            }
            Ok(())
        }
        Command::ViewUsers => {
            console.render_users(app.catalog.users())?;
            Ok(())
        }
        Command::AddUser => {
            let Some(target) = console.prompt("New username: ")? else {
                return Ok(());
            };
            let Some(is_admin) =
                console.confirm(&format!("Should '{target}' be an administrator?"))?
            else {
                return Ok(());
            };
            match app.catalog.add_user(&target, is_admin) {
                AddUserOutcome::Added => console.say(&format!("Added user '{target}'."))?,
                AddUserOutcome::UsernameTaken => {
                    console.say("That username is already taken.")?
                }
            }
            Ok(())
        }
        Command::AddBook => {
            let Some(title) = console.prompt("Title: ")? else {
                return Ok(());
            };
            let Some(author) = console.prompt("Author: ")? else {
                return Ok(());
            };
            let Some(year) = console.prompt_number::<i32>("Publication year: ")? else {
                return Ok(());
            };
            let id = app.catalog.add_book(title, author, year);
            console.say(&format!("Added book #{id}."))?;
            Ok(())
        }
        Command::RemoveUser => {
            let Some(target) = console.prompt("Username to remove: ")? else {
                return Ok(());
            };
            if target == username {
                console.say("You cannot remove your own account.")?;
                Ok(())
            } else {
                match app.catalog.remove_user(&target) {
                    Ok(removed) if !removed.borrowed.is_empty() => {
                        tracing::warn!(
                            username = %target,
                            count = removed.borrowed.len(),
                            "removed user still held books"
                        );
                        console.say(&format!(
                            "Removed user '{target}'. {} borrowed book(s) remain unavailable.",
                            removed.borrowed.len()
                        ))?;
                        Ok(())
                    }
                    Ok(_) => {
                        console.say(&format!("Removed user '{target}'."))?;
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            }
        }
        Command::RemoveBook => {
            let Some(id) = console.prompt_number::<u32>("Book id to remove: ")? else {
                return Ok(());
            };
            match app.catalog.remove_book(id) {
                Ok(book) => {
                    console.say(&format!("Removed book #{} '{}'.", book.id, book.title))?;
                    Ok(())
                }
                Err(err) => Err(err),
            }
        }
        Command::ChangeUserAdmin => {
            let Some(target) = console.prompt("Username to change: ")? else {
                return Ok(());
            };
            if target == username {
                console.say("You cannot change your own admin status.")?;
                Ok(())
            } else {
                match app.catalog.toggle_admin(&target) {
                    Ok(true) => {
                        console.say(&format!("'{target}' is now an administrator."))?;
                        Ok(())
                    }
                    Ok(false) => {
                        console.say(&format!("'{target}' is no longer an administrator."))?;
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            }
        }
        Command::ViewMyBooks => match app.catalog.get_user(username) {
            Ok(user) if user.borrowed.is_empty() => {
                console.say("You have no borrowed books.")?;
                Ok(())
            }
            Ok(user) => {
                for &id in &user.borrowed {
                    match app.catalog.get_book(id) {
                        Ok(book) => console.say(&format!(
                            "  #{} {} by {} ({})",
                            book.id, book.title, book.author, book.year
                        ))?,
                        Err(_) => {
                            console.say(&format!("  #{id} (no longer in the catalog)"))?
                        }
                    }
                }
                Ok(())
            }
            Err(err) => Err(err),
        },
        Command::ViewAvailableBooks => {
            let available: Vec<_> = app.catalog.list_available().collect();
            if available.is_empty() {
                console.say("No books available right now.")?;
            } else {
                console.render_books(available)?;
            }
            Ok(())
        }
        Command::BorrowBook => {
            let Some(id) = console.prompt_number::<u32>("Book id to borrow: ")? else {
                return Ok(());
            };
            match app.catalog.borrow(id, username) {
                Ok(BorrowOutcome::Borrowed) => {
                    console.say(&format!("You borrowed book #{id}."))?;
                    Ok(())
                }
                Ok(BorrowOutcome::NotAvailable) => {
                    console.say("That book is not available right now.")?;
                    Ok(())
                }
                Err(err) => Err(err),
            }
        }
        Command::ReturnBook => {
            let Some(id) = console.prompt_number::<u32>("Book id to return: ")? else {
                return Ok(());
            };
            match app.catalog.return_book(id, username) {
                Ok(ReturnOutcome::Returned) => {
                    console.say(&format!("You returned book #{id}."))?;
                    Ok(())
                }
                Ok(ReturnOutcome::NotBorrowedByUser) => {
                    console.say("You have not borrowed that book.")?;
                    Ok(())
                }
                Err(err) => Err(err),
            }
        }
        // handled by the session loop
        Command::LogOut => Ok(()),
    };

    if let Err(err) = result {
        console.say(&err.to_string())?;
    }
    Ok(())
}
