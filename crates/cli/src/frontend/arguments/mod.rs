mod parsed_args;
mod parser;


pub(crate) use parsed_args::ParsedArgs;
pub(crate) use parser::{PROGRAM_NAME, parse_args};
