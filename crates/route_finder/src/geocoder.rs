use std::sync::Arc;

use model::Coordinate;

use crate::{GeocodingService, ServiceError};

/// Free-text origin search. Queries are biased towards the venue so that
/// ambiguous place names resolve to the sensible nearby candidate.
#[derive(Clone)]
pub struct GeocoderInput {
    service: Arc<dyn GeocodingService>,
    proximity: Coordinate,
}

impl GeocoderInput {
    pub fn new(service: Arc<dyn GeocodingService>, proximity: Coordinate) -> Self {
        Self {
            service,
            proximity,
        }
    }

    /// Resolves the query to the top candidate's coordinate.
    pub async fn lookup(&self, query: &str) -> Result<Coordinate, ServiceError> {
        let candidates = self.service.forward(query, self.proximity).await?;
        candidates
            .first()
            .copied()
            .ok_or_else(|| ServiceError::NoMatch {
                query: query.to_owned(),
            })
    }
}
