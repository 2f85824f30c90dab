//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod goal;
pub mod transaction;
pub mod user;

pub use account::{
    AccountError, AccountRepository, AccountWithTransactions, CreateAccountInput,
    UpdateAccountInput,
};
pub use goal::{CreateGoalInput, GoalError, GoalRepository, UpdateGoalInput};
pub use transaction::{
    BulkDeleteOutcome, TransactionError, TransactionMutation, TransactionRepository,
};
pub use user::UserRepository;
