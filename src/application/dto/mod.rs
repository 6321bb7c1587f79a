//! Data transfer objects for the application layer.

mod media_dto;

pub use media_dto::{PickRequest, PickResponse};
