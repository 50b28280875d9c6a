pub mod poll;
pub mod view;
