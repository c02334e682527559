//! In-memory catalog: books, users and the borrow/return bookkeeping.
//!
//! The [`Catalog`] owns every record for the lifetime of the process.
//! Nothing is persisted; the interactive loop in `app` is the only caller.

use indexmap::IndexMap;

use crate::error::{CatalogError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub available: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub is_admin: bool,
    /// Ids of the books this user currently holds, in borrow order.
    pub borrowed: Vec<u32>,
}

/// Outcome of [`Catalog::add_user`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddUserOutcome {
    Added,
    UsernameTaken,
}

/// Outcome of [`Catalog::borrow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorrowOutcome {
    Borrowed,
    NotAvailable,
}

/// Outcome of [`Catalog::return_book`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnOutcome {
    Returned,
    NotBorrowedByUser,
}

/// The in-memory store of books and users.
///
/// Invariants upheld here:
/// - book ids are unique and never reassigned, even after removal;
/// - usernames are unique among active users;
/// - a book sits in at most one user's borrowed list, and its
///   `available` flag is false exactly while it does.
///
/// Removing a user does NOT release the books they hold; those stay
/// unavailable (see DESIGN.md for the policy decision).
#[derive(Debug, Default)]
pub struct Catalog {
    users: IndexMap<String, User>,
    books: Vec<Book>,
    next_book_id: u32,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a book with the next sequential id. Always succeeds.
    pub fn add_book(&mut self, title: impl Into<String>, author: impl Into<String>, year: i32) -> u32 {
        self.next_book_id += 1;
        let book = Book {
            id: self.next_book_id,
            title: title.into(),
            author: author.into(),
            year,
            available: true,
        };
        tracing::debug!(id = book.id, title = %book.title, "book added");
        self.books.push(book);
        self.next_book_id
    }

    /// Register a user. Rejects the username if it is already taken.
    pub fn add_user(&mut self, username: &str, is_admin: bool) -> AddUserOutcome {
        if self.users.contains_key(username) {
            return AddUserOutcome::UsernameTaken;
        }
        self.users.insert(
            username.to_owned(),
            User {
                username: username.to_owned(),
                is_admin,
                borrowed: Vec::new(),
            },
        );
        tracing::debug!(%username, is_admin, "user added");
        AddUserOutcome::Added
    }

    /// Delete a user record and hand it back. Books the user still holds
    /// are left borrowed.
    pub fn remove_user(&mut self, username: &str) -> Result<User> {
        let user = self
            .users
            .shift_remove(username)
            .ok_or_else(|| CatalogError::UserNotFound(username.to_owned()))?;
        tracing::debug!(%username, still_borrowed = user.borrowed.len(), "user removed");
        Ok(user)
    }

    /// Delete a book record and hand it back. No borrow check: a borrowed
    /// book disappears from the catalog and leaves a stale id in the
    /// borrower's list.
    pub fn remove_book(&mut self, book_id: u32) -> Result<Book> {
        let pos = self
            .books
            .iter()
            .position(|b| b.id == book_id)
            .ok_or(CatalogError::BookNotFound(book_id))?;
        let book = self.books.remove(pos);
        tracing::debug!(id = book.id, title = %book.title, "book removed");
        Ok(book)
    }

    pub fn get_user(&self, username: &str) -> Result<&User> {
        self.users
            .get(username)
            .ok_or_else(|| CatalogError::UserNotFound(username.to_owned()))
    }

    pub fn get_book(&self, book_id: u32) -> Result<&Book> {
        self.books
            .iter()
            .find(|b| b.id == book_id)
            .ok_or(CatalogError::BookNotFound(book_id))
    }

    /// Borrow a book for a user. Both lookups propagate their NotFound
    /// kind; an unavailable book leaves all state untouched.
    pub fn borrow(&mut self, book_id: u32, username: &str) -> Result<BorrowOutcome> {
        let user = self
            .users
            .get_mut(username)
            .ok_or_else(|| CatalogError::UserNotFound(username.to_owned()))?;
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == book_id)
            .ok_or(CatalogError::BookNotFound(book_id))?;
        if !book.available {
            return Ok(BorrowOutcome::NotAvailable);
        }
        book.available = false;
        user.borrowed.push(book_id);
        tracing::debug!(book_id, %username, "book borrowed");
        Ok(BorrowOutcome::Borrowed)
    }

    /// Return a borrowed book. Only the current borrower can return it;
    /// anyone else gets `NotBorrowedByUser` and no state changes.
    pub fn return_book(&mut self, book_id: u32, username: &str) -> Result<ReturnOutcome> {
        let user = self
            .users
            .get_mut(username)
            .ok_or_else(|| CatalogError::UserNotFound(username.to_owned()))?;
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == book_id)
            .ok_or(CatalogError::BookNotFound(book_id))?;
        let Some(pos) = user.borrowed.iter().position(|&id| id == book_id) else {
            return Ok(ReturnOutcome::NotBorrowedByUser);
        };
        user.borrowed.remove(pos);
        book.available = true;
        tracing::debug!(book_id, %username, "book returned");
        Ok(ReturnOutcome::Returned)
    }

    /// Toggle a user's admin flag and report the new value. The caller is
    /// responsible for refusing self-targeting and gating by role.
    pub fn toggle_admin(&mut self, username: &str) -> Result<bool> {
        let user = self
            .users
            .get_mut(username)
            .ok_or_else(|| CatalogError::UserNotFound(username.to_owned()))?;
        user.is_admin = !user.is_admin;
        tracing::debug!(%username, is_admin = user.is_admin, "admin flag toggled");
        Ok(user.is_admin)
    }

    pub fn username_exists(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Books free to borrow, in insertion order.
    pub fn list_available(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|b| b.available)
    }

    /// Every book, in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Every user, in registration order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
