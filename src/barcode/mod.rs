pub mod correct;
pub mod hamming;
pub mod whitelist;

pub use correct::correct_barcodes;
pub use correct::BarcodeCorrector;
pub use hamming::hamming;
pub use whitelist::Whitelist;
