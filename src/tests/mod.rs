mod create_poll_tests;
mod test_utils;
