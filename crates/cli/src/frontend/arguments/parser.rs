use std::ffi::OsString;

use super::parsed_args::ParsedArgs;
use crate::frontend::command_builder::clap_command;

/// Name used in usage lines and diagnostics.
pub(crate) const PROGRAM_NAME: &str = "zpipe";

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command(PROGRAM_NAME).try_get_matches_from(args)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        compress: matches.get_flag("compress"),
        decompress: matches.get_flag("decompress"),
        output: matches.remove_one::<OsString>("output"),
        level: matches.remove_one::<String>("level"),
        threads: matches.remove_one::<String>("threads"),
        no_verify: matches.get_flag("no-verify"),
        no_checksum: matches.get_flag("no-checksum"),
        expect_sha256: matches.remove_one::<String>("expect-sha256"),
        force: matches.get_flag("force"),
        keep_partial: matches.get_flag("keep-partial"),
        buffer_size: matches.remove_one::<String>("buffer-size"),
        verbose: matches.get_count("verbose"),
        quiet: matches.get_flag("quiet"),
        json: matches.get_flag("json"),
        files: matches
            .remove_many::<OsString>("file")
            .map(Iterator::collect)
            .unwrap_or_default(),
    })
}
