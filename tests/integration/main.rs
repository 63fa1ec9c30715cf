//! Integration tests
//!
//! Both suites need PostgreSQL and are ignored by default:
//!
//! - `service_tests` builds a fresh database per test from `DATABASE_URL`:
//!   `DATABASE_URL=postgres://... cargo test -- --ignored service_tests`
//! - `api_tests` talks to a server already listening on `localhost:8080`.

mod service_tests;
