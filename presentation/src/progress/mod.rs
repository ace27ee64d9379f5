//! Progress reporting for evaluator calls

pub mod reporter;
