//! Cross-instance tests: two stores sharing one container, as the host
//! application and its keyboard extension do.

mod common;
mod custard_tests;
mod theme_tests;
