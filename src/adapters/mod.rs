// Adapters layer: concrete transports for local files, HTTP endpoints and object storage.

pub mod http;
pub mod local;
pub mod object_store;
