//! Static help and version text.

/// Deterministic help text describing the options recognised by this build.
const HELP_TEXT: &str = concat!(
    "zpipe ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Streaming Zstandard compression with SHA-256 round-trip verification.\n",
    "\n",
    "Usage: zpipe [OPTIONS] FILE\n",
    "\n",
    "FILE is decompressed when its name ends in .zst and compressed otherwise.\n",
    "Compression writes FILE.zst; decompression strips .zst (or appends .dec).\n",
    "\n",
    "Options:\n",
    "  -z, --compress           Compress regardless of the file name.\n",
    "  -d, --decompress         Decompress regardless of the file name.\n",
    "  -o, --output=PATH        Write the result to PATH.\n",
    "  -l, --level=LEVEL        Compression level 1-22, or fast, default, best (default 3).\n",
    "  -T, --threads=N          Compression worker threads (0 runs on the calling thread).\n",
    "      --no-verify          Skip SHA-256 verification.\n",
    "      --no-checksum        Omit the content checksum from written frames.\n",
    "      --expect-sha256=HEX  Reference digest the decompressed output must match.\n",
    "  -f, --force              Overwrite an existing destination.\n",
    "      --keep-partial       Keep partial output when the run fails.\n",
    "      --buffer-size=BYTES  Size of each streaming buffer (default 64K).\n",
    "  -v, --verbose            Increase log verbosity; repeat for more detail.\n",
    "  -q, --quiet              Suppress the report and warnings.\n",
    "      --json               Print the report as JSON.\n",
    "  -h, --help               Show this help message and exit.\n",
    "  -V, --version            Output version information and exit.\n",
    "\n",
    "Log filtering can be overridden with the ZPIPE_LOG or RUST_LOG environment\n",
    "variables.\n",
    "\n",
    "Exit status:\n",
    "   0  success\n",
    "   1  invalid arguments\n",
    "   3  file selection error (missing input, existing output)\n",
    "   4  unsupported option for this build\n",
    "  11  file I/O error\n",
    "  12  compression or decompression error\n",
    "  13  malformed zstd frame\n",
    "  14  truncated zstd stream\n",
    "  15  SHA-256 verification mismatch\n",
    "  16  internal error\n",
);

/// One-line usage shown when no FILE is given.
pub(crate) const USAGE_LINE: &str = "Usage: zpipe [OPTIONS] FILE\nTry 'zpipe --help' for more information.\n";

/// Renders the help text describing the supported options.
pub(crate) fn help_text() -> &'static str {
    HELP_TEXT
}

/// Renders the version banner.
pub(crate) fn version_text() -> String {
    format!(
        "zpipe {}\nmultithreaded compression: {}\n",
        env!("CARGO_PKG_VERSION"),
        if cfg!(feature = "multithread") {
            "enabled"
        } else {
            "disabled"
        }
    )
}
