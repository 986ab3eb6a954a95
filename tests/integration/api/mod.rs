//! API integration tests

mod articles_test;
mod auth_test;
mod comments_test;
mod errors_test;
mod users_test;
