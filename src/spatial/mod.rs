
pub use hit_test::hit_test;
