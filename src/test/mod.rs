mod fixtures;
mod pipeline;
