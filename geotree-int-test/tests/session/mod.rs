//! Session layer integration tests.

mod session_test;
