pub mod document_tests;
pub mod error_tests;
