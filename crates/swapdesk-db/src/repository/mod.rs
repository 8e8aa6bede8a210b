//! # Repository Module
//!
//! Database repositories for swapdesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  UserService (apps/api)                                                │
//! │       │                                                                 │
//! │       │  db.users().find(&query)                                       │
//! │       ▼                                                                 │
//! │  UserRepository                                                        │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── find(&self, query)                                                │
//! │  ├── insert(&self, new_user)                                           │
//! │  ├── update(&self, id, changes)                                        │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories take already-validated core types (`NewUser`,
//! `UserChanges`, `UserQuery`); they never see raw request data.

pub mod user;
