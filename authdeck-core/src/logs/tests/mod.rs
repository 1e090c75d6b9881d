mod classify_tests;
mod parse_tests;
mod render_tests;
