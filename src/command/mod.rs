pub mod addbarcodes;

pub use addbarcodes::AddBarcodes;
pub use addbarcodes::AddBarcodesParams;
