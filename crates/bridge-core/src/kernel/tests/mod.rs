mod bootstrap_tests;
mod error_tests;
