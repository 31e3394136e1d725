pub mod analyzers;
pub mod fetch;
pub mod gtfs;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod schedule;
pub mod time;
