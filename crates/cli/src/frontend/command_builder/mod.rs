use clap::{Arg, ArgAction, Command as ClapCommand, builder::OsStringValueParser};

/// Builds the `clap` command used for parsing.
///
/// Help and version flags are handled by the front end so their output goes
/// through the same writers as every other report.
pub(crate) fn clap_command(program_name: &'static str) -> ClapCommand {
    ClapCommand::new(program_name)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("compress")
                .long("compress")
                .short('z')
                .help("Compress regardless of the file name.")
                .action(ArgAction::SetTrue)
                .conflicts_with("decompress"),
        )
        .arg(
            Arg::new("decompress")
                .long("decompress")
                .short('d')
                .help("Decompress regardless of the file name.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Write the result to PATH.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .help("Compression level 1-22, or fast, default, best.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('T')
                .value_name("N")
                .help("Compression worker threads (0 runs on the calling thread).")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("no-verify")
                .long("no-verify")
                .help("Skip SHA-256 verification.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-checksum")
                .long("no-checksum")
                .help("Omit the content checksum from written frames.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("expect-sha256")
                .long("expect-sha256")
                .value_name("HEX")
                .help("Reference digest the decompressed output must match.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .short('f')
                .help("Overwrite an existing destination.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-partial")
                .long("keep-partial")
                .help("Keep partial output when the run fails.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("buffer-size")
                .long("buffer-size")
                .value_name("BYTES")
                .help("Size of each streaming buffer (suffixes K, M and G accepted).")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity; repeat for more detail.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Suppress the report and warnings.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the report as JSON.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
}
