use std::ffi::OsString;

/// Parsed command-line arguments.
///
/// Option values are kept as the user typed them; the options module
/// converts them into a pipeline configuration so conversion errors can be
/// reported with the offending flag.
///
/// Fields use the following conventions:
///
/// - **`bool`**: the flag was given.
/// - **`Option<T>`**: the option was given with a value.
/// - **`Vec<T>`**: positional operands in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ParsedArgs {
    /// `--help`, `-h`
    pub show_help: bool,
    /// `--version`, `-V`
    pub show_version: bool,
    /// `--compress`, `-z`
    pub compress: bool,
    /// `--decompress`, `-d`
    pub decompress: bool,
    /// `--output`, `-o`
    pub output: Option<OsString>,
    /// `--level`, `-l`
    pub level: Option<String>,
    /// `--threads`, `-T`
    pub threads: Option<String>,
    /// `--no-verify`
    pub no_verify: bool,
    /// `--no-checksum`
    pub no_checksum: bool,
    /// `--expect-sha256`
    pub expect_sha256: Option<String>,
    /// `--force`, `-f`
    pub force: bool,
    /// `--keep-partial`
    pub keep_partial: bool,
    /// `--buffer-size`
    pub buffer_size: Option<String>,
    /// Number of `-v` occurrences.
    pub verbose: u8,
    /// `--quiet`, `-q`
    pub quiet: bool,
    /// `--json`
    pub json: bool,
    /// Positional operands.
    pub files: Vec<OsString>,
}
