use rocket::{Catcher, Route};

mod categories;
mod fallback;
mod questions;
mod quizzes;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(categories::routes());
    routes.extend(questions::routes());
    routes.extend(quizzes::routes());
    routes.extend(fallback::routes());
    routes.extend(crate::cors::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    fallback::catchers()
}
