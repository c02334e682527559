//! Console rendering and line input.
//!
//! Everything the user sees goes through [`Console`], a thin wrapper over a
//! reader/writer pair. The interactive loop in `app` is written against this
//! seam so tests can run scripted sessions over in-memory buffers while the
//! binary binds it to locked stdin/stdout.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::catalog::{Book, User};

/// Line-oriented console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Print one line.
    pub fn say(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{msg}")
    }

    /// Prompt and read one trimmed line. `None` means the input ended.
    pub fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.out, "{msg}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Case-insensitive y/n confirmation. Reprompts until answered;
    /// `None` means the input ended.
    pub fn confirm(&mut self, msg: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.prompt(&format!("{msg} (y/n): "))? else {
                return Ok(None);
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" => return Ok(Some(true)),
                "n" => return Ok(Some(false)),
                _ => self.say("Please answer y or n.")?,
            }
        }
    }

    /// Prompt for a number, reprompting until the input parses.
    pub fn prompt_number<T: FromStr>(&mut self, msg: &str) -> io::Result<Option<T>> {
        loop {
            let Some(raw) = self.prompt(msg)? else {
                return Ok(None);
            };
            match raw.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("Please enter a number.")?,
            }
        }
    }

    /// Render a book table: id, title, author, year, availability.
    pub fn render_books<'a, I>(&mut self, books: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Book>,
    {
        writeln!(
            self.out,
            "  {:>4}  {:<32} {:<24} {:>5}  {}",
            "id", "title", "author", "year", "status"
        )?;
        for book in books {
            writeln!(
                self.out,
                "  {:>4}  {:<32} {:<24} {:>5}  {}",
                book.id,
                book.title,
                book.author,
                book.year,
                if book.available { "available" } else { "borrowed" }
            )?;
        }
        Ok(())
    }

    /// Render a user table: username, role, number of held books.
    pub fn render_users<'a, I>(&mut self, users: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a User>,
    {
        writeln!(self.out, "  {:<24} {:<8} {}", "username", "role", "borrowed")?;
        for user in users {
            writeln!(
                self.out,
                "  {:<24} {:<8} {}",
                user.username,
                if user.is_admin { "admin" } else { "member" },
                user.borrowed.len()
            )?;
        }
        Ok(())
    }
}
