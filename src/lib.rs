pub mod arithmetic;
pub mod bit_iterator;
pub mod bit_vector;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
