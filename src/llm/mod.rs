pub mod client;
pub mod translator;
