use rocket::{
    fairing::{Fairing, Info, Kind},
    http::{Header, Status},
    Request, Response, Route,
};

use crate::Config;

const ALLOW_HEADERS: &str = "Content-Type, Authorization, true";
const ALLOW_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";

/// A fairing that adds CORS headers to every response, including errors.
#[derive(Debug, Copy, Clone)]
pub struct CorsFairing;

#[rocket::async_trait]
impl Fairing for CorsFairing {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let origin = req
            .rocket()
            .state::<Config>()
            .map(Config::cors_origin)
            .unwrap_or("*");
        res.set_header(Header::new("Access-Control-Allow-Origin", origin.to_string()));
        res.set_header(Header::new("Access-Control-Allow-Headers", ALLOW_HEADERS));
        res.set_header(Header::new("Access-Control-Allow-Methods", ALLOW_METHODS));
    }
}

pub fn routes() -> Vec<Route> {
    routes![preflight]
}

/// Answer browser preflight requests for any path.
#[options("/<_..>")]
fn preflight() -> Status {
    Status::NoContent
}

#[cfg(test)]
mod tests {
    use rocket::{http::Status, local::asynchronous::Client};

    #[backend_test]
    async fn preflight_is_answered_with_headers(client: Client) {
        let response = client.options("/questions/search").dispatch().await;

        assert_eq!(Status::NoContent, response.status());
        let headers = response.headers();
        assert_eq!(headers.get_one("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            headers.get_one("Access-Control-Allow-Methods"),
            Some("GET, POST, PATCH, DELETE, OPTIONS")
        );
    }

    #[backend_test]
    async fn error_responses_carry_headers(client: Client) {
        let response = client.get("/no/such/route").dispatch().await;

        assert_eq!(Status::NotFound, response.status());
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Headers"),
            Some("Content-Type, Authorization, true")
        );
    }
}
