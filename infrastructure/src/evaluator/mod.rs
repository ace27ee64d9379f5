//! Evaluator transport adapters

mod http;

pub use http::HttpEvaluatorTransport;
