use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Coordinate;
use crate::routing::RoutePath;

/// Lifecycle state of a route request.
///
/// Paths exist exactly when the request is calculated and a reason
/// exactly when it failed; the enum makes both invariants structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequestState {
    Pending,
    Calculated {
        shortest_path: RoutePath,
        optimized_path: RoutePath,
    },
    Error {
        reason: String,
    },
}

/// Flat status view for persistence and transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Pending,
    Calculated,
    Error,
}

/// One route computation request.
///
/// Created pending by [`crate::lifecycle::submit`]; transitioned at
/// most once to a terminal state by [`crate::lifecycle::compute`]. The
/// transition methods consume the value, so no state is ever mutated in
/// place and terminal states are never left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    id: Uuid,
    start: Coordinate,
    end: Coordinate,
    created_at: DateTime<Utc>,
    state: RequestState,
}

impl RouteRequest {
    pub(crate) fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            created_at: Utc::now(),
            state: RequestState::Pending,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn status(&self) -> RouteStatus {
        match self.state {
            RequestState::Pending => RouteStatus::Pending,
            RequestState::Calculated { .. } => RouteStatus::Calculated,
            RequestState::Error { .. } => RouteStatus::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.state, RequestState::Pending)
    }

    pub fn shortest_path(&self) -> Option<&RoutePath> {
        match &self.state {
            RequestState::Calculated { shortest_path, .. } => Some(shortest_path),
            _ => None,
        }
    }

    pub fn optimized_path(&self) -> Option<&RoutePath> {
        match &self.state {
            RequestState::Calculated { optimized_path, .. } => Some(optimized_path),
            _ => None,
        }
    }

    pub fn error_reason(&self) -> Option<&str> {
        match &self.state {
            RequestState::Error { reason } => Some(reason),
            _ => None,
        }
    }

    pub(crate) fn into_calculated(mut self, shortest_path: RoutePath, optimized_path: RoutePath) -> Self {
        self.state = RequestState::Calculated {
            shortest_path,
            optimized_path,
        };
        self
    }

    pub(crate) fn into_error(mut self, reason: String) -> Self {
        self.state = RequestState::Error { reason };
        self
    }
}
