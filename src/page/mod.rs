pub mod document;
pub mod handle;
pub mod shell;
