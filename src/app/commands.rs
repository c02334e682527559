//! Session command vocabulary: map typed menu words to semantic commands
//! and gate them by role.
//!
//! Commands are entered as short words on the session menu (`bb`, `rmu`,
//! ...). Admin-only commands are gated at dispatch time against the acting
//! user's current admin flag, never a cached one.

/// Semantic commands available inside an authenticated session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// List every book in the catalog.
    ViewBooks,
    /// List every registered user.
    ViewUsers,
    /// Register a new user with a chosen admin flag.
    AddUser,
    /// Add a new book to the catalog.
    AddBook,
    /// Remove a user. The acting user cannot remove themselves.
    RemoveUser,
    /// Remove a book, whether or not it is currently borrowed.
    RemoveBook,
    /// Toggle another user's admin flag. Not applicable to oneself.
    ChangeUserAdmin,
    /// List the books the acting user currently holds.
    ViewMyBooks,
    /// List the books free to borrow.
    ViewAvailableBooks,
    /// Borrow an available book by id.
    BorrowBook,
    /// Return a borrowed book by id.
    ReturnBook,
    /// End the authenticated session.
    LogOut,
}

impl Command {
    /// Every command, in menu order. Admin commands come first so the
    /// admin menu reads management-then-member.
    pub const ALL: [Command; 12] = [
        Command::ViewBooks,
        Command::ViewUsers,
        Command::AddUser,
        Command::AddBook,
        Command::RemoveUser,
        Command::RemoveBook,
        Command::ChangeUserAdmin,
        Command::ViewMyBooks,
        Command::ViewAvailableBooks,
        Command::BorrowBook,
        Command::ReturnBook,
        Command::LogOut,
    ];

    /// The word typed on the session menu to invoke this command.
    pub fn word(self) -> &'static str {
        match self {
            Command::ViewBooks => "vb",
            Command::ViewUsers => "vu",
            Command::AddUser => "au",
            Command::AddBook => "ab",
            Command::RemoveUser => "rmu",
            Command::RemoveBook => "rmb",
            Command::ChangeUserAdmin => "cua",
            Command::ViewMyBooks => "vmb",
            Command::ViewAvailableBooks => "vab",
            Command::BorrowBook => "bb",
            Command::ReturnBook => "rb",
            Command::LogOut => "lgo",
        }
    }

    /// One-line description shown next to the word on the menu.
    pub fn describe(self) -> &'static str {
        match self {
            Command::ViewBooks => "view all books",
            Command::ViewUsers => "view all users",
            Command::AddUser => "add a user",
            Command::AddBook => "add a book",
            Command::RemoveUser => "remove a user",
            Command::RemoveBook => "remove a book",
            Command::ChangeUserAdmin => "change a user's admin status",
            Command::ViewMyBooks => "view my borrowed books",
            Command::ViewAvailableBooks => "view available books",
            Command::BorrowBook => "borrow a book",
            Command::ReturnBook => "return a book",
            Command::LogOut => "log out",
        }
    }

    /// Whether the command is restricted to administrators.
    pub fn requires_admin(self) -> bool {
        matches!(
            self,
            Command::ViewBooks
                | Command::ViewUsers
                | Command::AddUser
                | Command::AddBook
                | Command::RemoveUser
                | Command::RemoveBook
                | Command::ChangeUserAdmin
        )
    }

    /// Resolve a typed menu word, ignoring surrounding whitespace and case.
    pub fn parse(input: &str) -> Option<Command> {
        let word = input.trim().to_ascii_lowercase();
        Command::ALL.into_iter().find(|c| c.word() == word)
    }
}
