mod common;
mod json;
