use std::io::{self, BufRead, Write};

/// Yes/no confirmation asked before copying a large directory.
pub trait Prompt {
    /// Block until the user answers. Unrecognized replies are asked again,
    /// never reported as errors.
    fn ask(&mut self, message: &str) -> io::Result<bool>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn ask(&mut self, message: &str) -> io::Result<bool> {
        (**self).ask(message)
    }
}

/// Interactive prompt reading answers line by line.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn ask(&mut self, message: &str) -> io::Result<bool> {
        let mut question = message.to_string();

        loop {
            write!(self.output, "{} (y/n): ", question)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before the confirmation was answered",
                ));
            }

            match parse_reply(&line) {
                Some(answer) => return Ok(answer),
                None => question = String::from("Please enter y/n"),
            }
        }
    }
}

/// Only the first character counts: "yes", "Y" and "yep" all confirm.
pub fn parse_reply(reply: &str) -> Option<bool> {
    match reply.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('y') => Some(true),
        Some('n') => Some(false),
        _ => None,
    }
}
