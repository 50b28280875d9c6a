pub mod logger;
pub mod settings;
pub mod startup;
