/*! Unit coverage for the export model, source queries, JS builders and validation. */

mod declaration_tests;
mod js_tests;
