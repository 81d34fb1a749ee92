//! Route queries: validated station ids plus a time context.

use chrono::NaiveDateTime;

use crate::domain::{TimeContext, parse_weekday};
use crate::graph::{Graph, StationId};

use super::error::RouteError;

/// A validated query against one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteQuery {
    pub start: StationId,
    pub end: StationId,
    pub context: TimeContext,
}

impl RouteQuery {
    pub fn new(start: StationId, end: StationId, context: TimeContext) -> Self {
        Self {
            start,
            end,
            context,
        }
    }

    /// Look up both stations by name.
    ///
    /// Names are matched exactly first, then case-insensitively when that
    /// is unambiguous.
    pub fn resolve(
        graph: &Graph,
        start: &str,
        end: &str,
        context: TimeContext,
    ) -> Result<Self, RouteError> {
        let lookup = |name: &str| {
            graph
                .resolve(name)
                .ok_or_else(|| RouteError::UnknownStation(name.trim().to_string()))
        };
        Ok(Self::new(lookup(start)?, lookup(end)?, context))
    }

    /// Validate raw request fields.
    ///
    /// `time` and `day` follow [`TimeContext::resolve`] and
    /// [`parse_weekday`]; missing values default to `now`.
    pub fn from_request(
        graph: &Graph,
        start: &str,
        end: &str,
        time: Option<&str>,
        day: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Self, RouteError> {
        let day = day
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(parse_weekday)
            .transpose()?;
        let context = TimeContext::resolve(time, day, now)?;
        Self::resolve(graph, start, end, context)
    }
}
