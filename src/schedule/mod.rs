pub mod normalizer;
pub mod service;
