use std::io::{self, BufRead};

/// Reads one line and trims it. `None` means end of input.
///
/// Invalid UTF-8 is replaced rather than rejected so a stray byte never ends
/// the session.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = Vec::new();

    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&line).trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_trimmed_lines_until_eof() {
        let mut input = &b"  ls -la \nsecond\r\nlast"[..];
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("ls -la"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("second"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn blank_line_is_not_eof() {
        let mut input = &b"\n"[..];
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some(""));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn tolerates_invalid_utf8() {
        let mut input = &b"echo \xff\n"[..];
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("echo \u{fffd}"));
    }
}
