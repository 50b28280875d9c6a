pub mod poll_repository;
pub mod session_repository;
