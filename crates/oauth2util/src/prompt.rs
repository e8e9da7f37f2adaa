//! Interactive authorization code prompt.

use std::io::{self, BufRead, Write};

use url::Url;

/// Show the authorization URL and read one line holding the code.
///
/// The line is returned as read; the token client trims it.
///
/// # Errors
///
/// Returns error on I/O failure, or `UnexpectedEof` if input closes before
/// a line arrives.
pub fn prompt_for_code<R, W>(authorization_url: &Url, input: &mut R, output: &mut W) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Visit the URL for the auth dialog: {authorization_url}")?;
    write!(output, "Enter the authorization code: ")?;
    output.flush()?;

    let mut code = String::new();
    if input.read_line(&mut code)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no authorization code entered"));
    }

    Ok(code)
}
