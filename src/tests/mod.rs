mod utils;

mod user_tests;
