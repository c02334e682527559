// Unit tests for libcat-manager
// These tests work with the public API without modifying the main codebase

#[cfg(test)]
mod catalog_tests {
    use libcat_manager::catalog::{AddUserOutcome, BorrowOutcome, Catalog, ReturnOutcome};
    use libcat_manager::error::CatalogError;

    fn catalog_with_users(users: &[(&str, bool)]) -> Catalog {
        let mut catalog = Catalog::new();
        for &(name, is_admin) in users {
            assert_eq!(catalog.add_user(name, is_admin), AddUserOutcome::Added);
        }
        catalog
    }

    #[test]
    fn add_user_stores_username_and_admin_flag() {
        let mut catalog = Catalog::new();
        let outcome = catalog.add_user("Test user", false);

        assert_eq!(outcome, AddUserOutcome::Added);
        assert_eq!(catalog.user_count(), 1, "user was not added to the catalog");
        let added = catalog.get_user("Test user").expect("user should exist");
        assert_eq!(added.username, "Test user", "the username is incorrect");
        assert!(!added.is_admin, "the admin status of the user is incorrect");
        assert!(added.borrowed.is_empty());
    }

    #[test]
    fn add_user_rejects_duplicate_username() {
        let mut catalog = catalog_with_users(&[("bob", true)]);

        let outcome = catalog.add_user("bob", false);

        assert_eq!(outcome, AddUserOutcome::UsernameTaken);
        assert_eq!(catalog.user_count(), 1, "duplicate must not create a record");
        // the original record is untouched
        assert!(catalog.get_user("bob").unwrap().is_admin);
    }

    #[test]
    fn add_book_assigns_sequential_ids_and_availability() {
        let mut catalog = Catalog::new();

        let first = catalog.add_book("The Trial", "Franz Kafka", 1925);
        let second = catalog.add_book("Dune", "Frank Herbert", 1965);

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert!(catalog.get_book(1).unwrap().available);
        assert_eq!(catalog.get_book(2).unwrap().title, "Dune");
    }

    #[test]
    fn book_ids_are_never_reused_after_removal() {
        let mut catalog = Catalog::new();
        catalog.add_book("A", "a", 2000);
        catalog.add_book("B", "b", 2001);

        catalog.remove_book(2).expect("book 2 exists");
        let next = catalog.add_book("C", "c", 2002);

        assert_eq!(next, 3, "removed ids must not be reassigned");
    }

    #[test]
    fn lookups_on_absent_keys_fail_with_not_found() {
        let catalog = Catalog::new();

        assert_eq!(
            catalog.get_user("ghost").unwrap_err(),
            CatalogError::UserNotFound("ghost".to_owned())
        );
        assert_eq!(catalog.get_book(7).unwrap_err(), CatalogError::BookNotFound(7));
    }

    #[test]
    fn borrow_marks_book_unavailable_and_tracks_holder() {
        let mut catalog = catalog_with_users(&[("u1", false)]);
        catalog.add_book("T", "A", 1990);

        let outcome = catalog.borrow(1, "u1").expect("book and user exist");

        assert_eq!(outcome, BorrowOutcome::Borrowed);
        assert!(!catalog.get_book(1).unwrap().available);
        assert_eq!(catalog.get_user("u1").unwrap().borrowed, vec![1]);
    }

    #[test]
    fn borrow_of_held_book_changes_nothing() {
        // the worked example: u2 cannot take what u1 holds
        let mut catalog = catalog_with_users(&[("u1", false), ("u2", false)]);
        catalog.add_book("T", "A", 1990);
        catalog.borrow(1, "u1").unwrap();

        let outcome = catalog.borrow(1, "u2").expect("lookups still succeed");

        assert_eq!(outcome, BorrowOutcome::NotAvailable);
        assert!(!catalog.get_book(1).unwrap().available);
        assert_eq!(catalog.get_user("u1").unwrap().borrowed, vec![1]);
        assert!(catalog.get_user("u2").unwrap().borrowed.is_empty());
    }

    #[test]
    fn return_by_holder_releases_the_book() {
        let mut catalog = catalog_with_users(&[("u1", false)]);
        catalog.add_book("T", "A", 1990);
        catalog.borrow(1, "u1").unwrap();

        let outcome = catalog.return_book(1, "u1").expect("book and user exist");

        assert_eq!(outcome, ReturnOutcome::Returned);
        assert!(catalog.get_book(1).unwrap().available);
        assert!(catalog.get_user("u1").unwrap().borrowed.is_empty());
    }

    #[test]
    fn return_by_non_holder_changes_nothing() {
        let mut catalog = catalog_with_users(&[("u1", false), ("u2", false)]);
        catalog.add_book("T", "A", 1990);
        catalog.borrow(1, "u1").unwrap();

        let outcome = catalog.return_book(1, "u2").expect("lookups still succeed");

        assert_eq!(outcome, ReturnOutcome::NotBorrowedByUser);
        assert!(!catalog.get_book(1).unwrap().available);
        assert_eq!(catalog.get_user("u1").unwrap().borrowed, vec![1]);
    }

    #[test]
    fn return_of_available_book_reports_non_ownership() {
        let mut catalog = catalog_with_users(&[("u1", false)]);
        catalog.add_book("T", "A", 1990);

        let outcome = catalog.return_book(1, "u1").unwrap();

        assert_eq!(outcome, ReturnOutcome::NotBorrowedByUser);
        assert!(catalog.get_book(1).unwrap().available);
    }

    #[test]
    fn return_of_missing_book_is_book_not_found() {
        let mut catalog = catalog_with_users(&[("u1", false)]);

        let err = catalog.return_book(99, "u1").unwrap_err();

        assert_eq!(err, CatalogError::BookNotFound(99));
        assert!(catalog.get_user("u1").unwrap().borrowed.is_empty());
    }

    #[test]
    fn remove_of_missing_records_leaves_sizes_unchanged() {
        let mut catalog = catalog_with_users(&[("bob", false)]);
        catalog.add_book("T", "A", 1990);

        assert_eq!(
            catalog.remove_user("ghost").unwrap_err(),
            CatalogError::UserNotFound("ghost".to_owned())
        );
        assert_eq!(catalog.remove_book(42).unwrap_err(), CatalogError::BookNotFound(42));
        assert_eq!(catalog.user_count(), 1);
        assert_eq!(catalog.books().len(), 1);
    }

    #[test]
    fn removing_user_leaves_their_books_unavailable() {
        // documented policy: no reconciliation on user removal
        let mut catalog = catalog_with_users(&[("u1", false)]);
        catalog.add_book("T", "A", 1990);
        catalog.borrow(1, "u1").unwrap();

        let removed = catalog.remove_user("u1").unwrap();

        assert_eq!(removed.borrowed, vec![1]);
        assert!(!catalog.get_book(1).unwrap().available);
    }

    #[test]
    fn removing_borrowed_book_strands_the_holder_entry() {
        let mut catalog = catalog_with_users(&[("u1", false)]);
        catalog.add_book("T", "A", 1990);
        catalog.borrow(1, "u1").unwrap();

        catalog.remove_book(1).unwrap();

        assert_eq!(catalog.get_user("u1").unwrap().borrowed, vec![1]);
        assert_eq!(
            catalog.return_book(1, "u1").unwrap_err(),
            CatalogError::BookNotFound(1)
        );
    }

    #[test]
    fn toggle_admin_flips_and_reports_the_new_flag() {
        let mut catalog = catalog_with_users(&[("bob", false)]);

        assert_eq!(catalog.toggle_admin("bob"), Ok(true));
        assert_eq!(catalog.toggle_admin("bob"), Ok(false));
        assert_eq!(
            catalog.toggle_admin("ghost").unwrap_err(),
            CatalogError::UserNotFound("ghost".to_owned())
        );
    }

    #[test]
    fn list_available_filters_in_insertion_order() {
        let mut catalog = catalog_with_users(&[("u1", false)]);
        catalog.add_book("A", "a", 2000);
        catalog.add_book("B", "b", 2001);
        catalog.add_book("C", "c", 2002);
        catalog.borrow(2, "u1").unwrap();

        let ids: Vec<u32> = catalog.list_available().map(|b| b.id).collect();

        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn username_exists_matches_the_roster() {
        let catalog = catalog_with_users(&[("bob", false)]);

        assert!(catalog.username_exists("bob"));
        assert!(!catalog.username_exists("alice"));
    }

    #[test]
    fn users_iterate_in_registration_order() {
        let catalog = catalog_with_users(&[("carol", true), ("alice", false), ("bob", false)]);

        let names: Vec<&str> = catalog.users().map(|u| u.username.as_str()).collect();

        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }
}

#[cfg(test)]
mod record_tests {
    use libcat_manager::catalog::{Book, User};

    #[test]
    fn test_book_struct() {
        let book = Book {
            id: 1,
            title: "The Trial".to_string(),
            author: "Franz Kafka".to_string(),
            year: 1925,
            available: true,
        };

        assert_eq!(book.id, 1);
        assert_eq!(book.title, "The Trial");
        assert!(book.available);
    }

    #[test]
    fn test_user_struct() {
        let user = User {
            username: "alice".to_string(),
            is_admin: false,
            borrowed: vec![1, 2],
        };

        assert_eq!(user.username, "alice");
        assert_eq!(user.borrowed.len(), 2);
    }
}

#[cfg(test)]
mod error_tests {
    use libcat_manager::CatalogError;

    #[test]
    fn error_messages_are_human_readable() {
        assert_eq!(
            CatalogError::UserNotFound("bob".to_owned()).to_string(),
            "no such user: bob"
        );
        assert_eq!(
            CatalogError::BookNotFound(7).to_string(),
            "book 7 does not exist"
        );
    }
}
