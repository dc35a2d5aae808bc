#![cfg(test)]

pub mod common;
pub mod dispatch_tests;
pub mod registration_tests;
