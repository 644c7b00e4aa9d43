mod cli;
mod support;
mod tables;
