pub(crate) mod fixtures;
mod scenarios;
