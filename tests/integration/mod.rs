pub mod ordering_tests;
