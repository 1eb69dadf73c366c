use std::ffi::OsString;

pub(super) use super::super::run;
pub(super) use super::super::arguments::PROGRAM_NAME;

pub(super) fn run_with_args<I, S>(args: I) -> (i32, Vec<u8>, Vec<u8>)
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(args, &mut stdout, &mut stderr);
    (code, stdout, stderr)
}

pub(super) fn utf8(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf8 output")
}
