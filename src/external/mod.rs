mod backend;
mod geocoder;

pub use backend::HttpBackend;
pub use geocoder::Geocoder;
