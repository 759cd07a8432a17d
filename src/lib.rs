pub mod adapters;
pub mod codec;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{EnvCredentials, StaticCredentials};

pub use crate::core::{
    etl::{EtlEngine, RunSummary},
    reader::Reader,
    transform::CleaningTransform,
    writer::Writer,
};
pub use domain::descriptor::{
    DeclaredFormat, InputMode, OutputMode, RemoteResponse, SinkDescriptor, SourceDescriptor,
};
pub use domain::model::{Column, DataType, Table, Value};
pub use utils::error::{EtlError, Result};
