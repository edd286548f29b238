// Utils compartidos

pub mod download;
pub mod qr_ffi;

pub use download::download_bytes;
