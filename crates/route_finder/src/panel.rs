use std::fmt;

use crate::resolver::ResolverState;

/// What the status panel shows. A pure projection of the resolver state;
/// the panel never owns or mutates widget state.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusLine {
    /// idle prompt
    Prompt,
    /// a lookup is in flight
    Busy,
    Summary { distance: String, time: String },
    Error(String),
    /// the map surface itself failed to initialize; persistent banner
    Unavailable(String),
}

pub fn project(state: &ResolverState) -> StatusLine {
    match state {
        ResolverState::Idle => StatusLine::Prompt,
        ResolverState::Loading => StatusLine::Busy,
        ResolverState::Resolved(route) => StatusLine::Summary {
            distance: format_distance(route.distance_meters),
            time: format_time(route.duration_seconds),
        },
        ResolverState::Failed(why) => StatusLine::Error(why.clone()),
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatusLine::Prompt => {
                write!(f, "Click a city marker or use the search bar to trace a route.")
            }
            StatusLine::Busy => write!(f, "Calculating route..."),
            StatusLine::Summary { distance, time } => {
                write!(f, "{distance} km, {time} driving time")
            }
            StatusLine::Error(why) => write!(f, "{why}"),
            StatusLine::Unavailable(why) => write!(f, "{why}"),
        }
    }
}

/// `"M min"` under an hour, `"H hr M min"` from one hour up. Minutes are
/// rounded, not truncated.
pub fn format_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round() as i64;
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let hours = minutes / 60;
    let remainder = minutes % 60;
    format!("{hours} hr {remainder} min")
}

/// Whole kilometers, no decimals. Ties round away from zero, like the
/// minute rounding above; `{:.0}` would round them to even instead.
pub fn format_distance(meters: f64) -> String {
    let kilometers = (meters / 1000.0).round() as i64;
    format!("{kilometers}")
}
