pub mod company;
pub mod persistence;
pub mod report;
pub mod traversal;

pub use crate::domain::model::{Employee, Record, Salaried};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
