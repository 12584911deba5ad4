mod diff_tests;
mod logic_tests;
mod visitor_tests;
