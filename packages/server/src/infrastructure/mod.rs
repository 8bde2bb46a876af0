//! Infrastructure layer: in-memory storage, pub/sub fan-out and wire DTOs.

pub mod dto;
pub mod pubsub;
pub mod repository;
