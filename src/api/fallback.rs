//! Error envelopes, and error statuses for requests no real route accepted.

use rocket::{
    http::{Method, Status},
    route::{self, Handler},
    serde::json::Json,
    Catcher, Data, Request, Route,
};

use crate::model::{api::ErrorEnvelope, db::question::QuestionId};

/// Every API path and the methods it supports.
///
/// `<id>` matches a question ID and `<_>` matches any single segment, mirroring
/// what the real routes accept.
static API_PATHS: &[(&str, &[Method])] = &[
    ("/categories", &[Method::Get]),
    ("/categories/<_>/questions", &[Method::Get]),
    ("/questions", &[Method::Get, Method::Post]),
    ("/questions/search", &[Method::Post]),
    ("/questions/<id>", &[Method::Delete]),
    ("/quizzes", &[Method::Post]),
];

/// Methods answered by the fallback routes.
static VERBS: [Method; 5] = [
    Method::Get,
    Method::Post,
    Method::Put,
    Method::Patch,
    Method::Delete,
];

/// Real routes keep Rocket's default ranks, which are all negative.
const FALLBACK_RANK: isize = 100;

/// Whether a request path matches one of the `API_PATHS` patterns.
fn path_matches<'a>(pattern: &str, segments: impl IntoIterator<Item = &'a str>) -> bool {
    let mut segments = segments.into_iter();
    for expected in pattern.trim_start_matches('/').split('/') {
        let matched = match segments.next() {
            Some(segment) => match expected {
                "<_>" => !segment.is_empty(),
                "<id>" => segment.parse::<QuestionId>().is_ok(),
                _ => segment == expected,
            },
            None => false,
        };
        if !matched {
            return false;
        }
    }
    segments.next().is_none()
}

/// Why a request that reached the fallback routes was not handled.
///
/// A known path with an unsupported method is 405. A supported method only
/// falls through when its body was not JSON, which is 415.
fn fallback_status(method: Method, segments: &[&str]) -> Status {
    let known = API_PATHS
        .iter()
        .filter(|(pattern, _)| path_matches(pattern, segments.iter().copied()))
        .collect::<Vec<_>>();
    if known.is_empty() {
        Status::NotFound
    } else if known.iter().any(|(_, allowed)| allowed.contains(&method)) {
        Status::UnsupportedMediaType
    } else {
        Status::MethodNotAllowed
    }
}

#[derive(Debug, Clone, Copy)]
struct Unhandled;

#[rocket::async_trait]
impl Handler for Unhandled {
    async fn handle<'r>(&self, req: &'r Request<'_>, _data: Data<'r>) -> route::Outcome<'r> {
        let segments = req.uri().path().segments().collect::<Vec<_>>();
        route::Outcome::Failure(fallback_status(req.method(), &segments))
    }
}

/// Lowest-priority routes for every method on every known path, answering
/// with whichever error status explains why no real route took the request.
///
/// Each path gets its own rank: `/questions/search` and `/questions/<_>`
/// would otherwise collide.
pub fn routes() -> Vec<Route> {
    API_PATHS
        .iter()
        .enumerate()
        .flat_map(|(i, (path, _))| {
            let path = path.replace("<id>", "<_>");
            VERBS.iter().map(move |verb| {
                let rank = FALLBACK_RANK + i as isize;
                let mut route = Route::ranked(rank, *verb, &path, Unhandled);
                route.name = Some("fallback".into());
                route
            })
        })
        .collect()
}

pub fn catchers() -> Vec<Catcher> {
    catchers![envelope]
}

/// Render every error status as the JSON error envelope.
#[catch(default)]
fn envelope(status: Status, _req: &Request) -> (Status, Json<ErrorEnvelope>) {
    (status, Json(ErrorEnvelope::for_status(status)))
}
