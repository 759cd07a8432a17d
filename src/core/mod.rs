pub mod etl;
pub mod reader;
pub mod transform;
pub mod writer;

pub use crate::domain::model::{Column, DataType, Table, Value};
pub use crate::domain::ports::{CredentialsProvider, HttpClient, ObjectStore, Transform};
pub use crate::utils::error::Result;
