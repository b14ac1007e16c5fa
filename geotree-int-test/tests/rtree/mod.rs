//! Index core integration tests.

mod bulk_load_test;
