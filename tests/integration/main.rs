//! Router-level integration tests.

mod helpers;

mod chat_test;
mod health_test;
mod ws_test;
