mod fake_api;
mod validation_tests;
