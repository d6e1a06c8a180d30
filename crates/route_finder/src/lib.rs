use std::error::Error;
use std::fmt;

use async_trait::async_trait;
use model::{route::RouteResult, Coordinate};

pub mod geocoder;
pub mod panel;
pub mod resolver;
pub mod surface;
pub mod widget;

/// Boundary error of the two external services. Everything that crosses
/// the async boundary is converted into this, never propagated as a panic.
#[derive(Debug)]
pub enum ServiceError {
    /// The geocoder produced no candidate for the query.
    NoMatch { query: String },
    Other(Box<dyn Error + Send + Sync>),
}

impl ServiceError {
    pub fn other<T: Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceError::NoMatch { query } => {
                write!(f, "no match found for '{query}'")
            }
            ServiceError::Other(why) => write!(f, "{why}"),
        }
    }
}

impl Error for ServiceError {}

/// External directions lookup for driving mode.
#[async_trait]
pub trait DirectionsService: Send + Sync {
    /// Ordered candidate routes, best first. An empty list means the
    /// service answered but found no drivable path.
    async fn driving_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteResult>, ServiceError>;
}

/// External free-text geocoding, biased towards a proximity point.
#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Ordered candidate coordinates, best first.
    async fn forward(
        &self,
        query: &str,
        proximity: Coordinate,
    ) -> Result<Vec<Coordinate>, ServiceError>;
}
