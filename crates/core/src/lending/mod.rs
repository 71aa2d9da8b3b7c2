pub(crate) mod lending_model;
pub(crate) mod lending_repository;
pub(crate) mod lending_traits;

pub use lending_model::{LendBorrow, LendBorrowDB, LoanDirection, LoanStatus, NewLendBorrow};
pub use lending_repository::LendBorrowRepository;
pub use lending_traits::LendBorrowRepositoryTrait;
