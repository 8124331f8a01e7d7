pub mod barcode;
pub mod cmd;
pub mod command;
pub mod fileformat;
pub mod runtime;

pub use runtime::Error;
