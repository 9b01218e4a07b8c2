mod common;
mod emissions;
