pub mod client;
pub mod completion;
pub mod constants;
pub mod error;
pub mod images;
pub mod pdf;
pub mod print_help;
pub mod recreate;
pub mod settings;
pub mod utils;
