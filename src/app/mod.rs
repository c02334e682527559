//! Application state types and entry glue.
//!
//! Defines the session state shared by the interactive loop, with the
//! command vocabulary and the loop itself in submodules.

pub mod commands;
pub mod update;

use crate::catalog::Catalog;

/// Interactive session state: the catalog plus the identity of the
/// currently authenticated user, if any.
pub struct AppState {
    pub catalog: Catalog,
    pub current_user: Option<String>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            current_user: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::new())
    }
}

/// Re-export the application loop entry function.
pub use update::run_app as run;
