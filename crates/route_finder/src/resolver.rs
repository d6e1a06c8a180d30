use model::route::RouteResult;

/// Shown when the directions service answers with zero candidate paths.
pub const NO_ROUTE_MESSAGE: &str =
    "no driving route found between these points";

/// Monotonically increasing per-widget request counter. Only the response
/// carrying the latest issued token is ever applied.
pub type RequestToken = u64;

/// How a route lookup ended: the best candidate, or a display-ready
/// failure message.
pub type ResolveOutcome = Result<RouteResult, String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResolverState {
    #[default]
    Idle,
    Loading,
    Resolved(RouteResult),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Settlement {
    Applied,
    /// A superseded request completed after a newer one was issued. The
    /// outcome is dropped without touching the state.
    Stale,
}

/// The widget's only state machine: `Idle → Loading → {Resolved | Failed}`,
/// back to `Loading` on every new request, with no terminal state.
///
/// Network completion may arrive out of request order. [`Self::begin`]
/// hands out a token per request and [`Self::settle`] ignores every token
/// but the latest, so the state always reflects the most recently
/// initiated request.
#[derive(Debug, Default)]
pub struct RouteResolver {
    state: ResolverState,
    latest: RequestToken,
}

impl RouteResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    /// Starts a new request: transitions to `Loading` synchronously, so
    /// the panel reflects the pending lookup before any network traffic,
    /// and supersedes all outstanding requests.
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.state = ResolverState::Loading;
        log::info!("route request {} started", self.latest);
        self.latest
    }

    pub fn settle(
        &mut self,
        token: RequestToken,
        outcome: ResolveOutcome,
    ) -> Settlement {
        if token != self.latest {
            log::debug!(
                "discarding stale response for request {token} (latest is {})",
                self.latest
            );
            return Settlement::Stale;
        }
        self.state = match outcome {
            Ok(route) => {
                log::info!(
                    "route request {token} resolved: {:.0} m, {:.0} s",
                    route.distance_meters,
                    route.duration_seconds
                );
                ResolverState::Resolved(route)
            }
            Err(why) => {
                log::error!("route request {token} failed: {why}");
                ResolverState::Failed(why)
            }
        };
        Settlement::Applied
    }
}

#[cfg(test)]
mod tests {
    use model::Coordinate;

    use super::*;

    fn route(distance_meters: f64) -> RouteResult {
        RouteResult {
            duration_seconds: 600.0,
            distance_meters,
            geometry: vec![
                Coordinate::new(78.4867, 17.3850),
                Coordinate::new(76.6731, 17.4335),
            ],
        }
    }

    #[test]
    fn begin_transitions_to_loading_synchronously() {
        let mut resolver = RouteResolver::new();
        assert_eq!(resolver.state(), &ResolverState::Idle);
        resolver.begin();
        assert_eq!(resolver.state(), &ResolverState::Loading);
    }

    #[test]
    fn latest_outcome_is_applied() {
        let mut resolver = RouteResolver::new();
        let token = resolver.begin();
        assert_eq!(resolver.settle(token, Ok(route(1000.0))), Settlement::Applied);
        assert_eq!(resolver.state(), &ResolverState::Resolved(route(1000.0)));
    }

    #[test]
    fn stale_response_is_discarded_when_arriving_late() {
        let mut resolver = RouteResolver::new();
        let first = resolver.begin();
        let second = resolver.begin();
        assert_eq!(
            resolver.settle(second, Ok(route(2000.0))),
            Settlement::Applied
        );
        // the superseded request completes afterwards and must not win
        assert_eq!(resolver.settle(first, Ok(route(1000.0))), Settlement::Stale);
        assert_eq!(resolver.state(), &ResolverState::Resolved(route(2000.0)));
    }

    #[test]
    fn stale_response_is_discarded_while_newer_request_is_pending() {
        let mut resolver = RouteResolver::new();
        let first = resolver.begin();
        resolver.begin();
        assert_eq!(
            resolver.settle(first, Err("boom".to_owned())),
            Settlement::Stale
        );
        assert_eq!(resolver.state(), &ResolverState::Loading);
    }

    #[test]
    fn failure_is_terminal_for_that_request_only() {
        let mut resolver = RouteResolver::new();
        let token = resolver.begin();
        resolver.settle(token, Err("no signal".to_owned()));
        assert_eq!(resolver.state(), &ResolverState::Failed("no signal".to_owned()));
        // a new user-issued request starts over
        resolver.begin();
        assert_eq!(resolver.state(), &ResolverState::Loading);
    }
}
