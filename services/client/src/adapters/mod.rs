pub mod http;
mod wire;

pub use http::HttpApiAdapter;
