#![allow(dead_code)]

use std::error::Error;

#[allow(unused_imports)]
pub use atlas_ops_test_utils::{init_tracing, with_timeout};

pub type TestResult = Result<(), Box<dyn Error>>;
