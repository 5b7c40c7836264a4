mod common;
mod consensus;
mod divergence;
mod matching;
mod pipeline;
