pub mod request_helper;
