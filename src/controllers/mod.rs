pub mod create_poll_controller;
pub mod home_controller;
pub mod page_controller;
pub mod page_session;
pub mod polls_list_controller;
pub mod vote_controller;
