pub mod addbarcodes;

pub use addbarcodes::AddBarcodesCMD;
