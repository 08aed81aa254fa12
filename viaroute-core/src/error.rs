use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum Error {
    #[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("graph built from zero traffic observations")]
    EmptyGraph,
    #[error("graph has no nodes to snap to")]
    NoNodes,
    #[error("no path connects the start and end nodes")]
    Unreachable,
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("route request not found: {0}")]
    NotFound(Uuid),
    #[error("route computation failed: {0}")]
    Unknown(String),
}
