//! ChatFolders database layer.
//!
//! SQLite connection management and schema migrations for the key-value
//! store that holds the folders document.
//!
//! ```no_run
//! use chatfolders::database::Database;
//!
//! let db = Database::open("chatfolders.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
