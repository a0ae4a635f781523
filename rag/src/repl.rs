use std::any::Any;
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

const PROMPT: &str = "Ask a question about The Peach Blossom Spring: ";
const SEPARATOR: &str = "==========";

/// Read questions line by line and print an answer for each.
///
/// `exit` or `quit` (any case) and end of input stop the loop; blank lines re-prompt. A
/// panic while answering one question is reported and the loop moves on.
pub fn run_repl<R, W, F>(mut input: R, output: &mut W, mut answer: F) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> String,
{
    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let question = line.trim();
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            writeln!(output, "Bye.")?;
            break;
        }
        if question.is_empty() {
            continue;
        }

        match panic::catch_unwind(AssertUnwindSafe(|| answer(question))) {
            Ok(text) => {
                writeln!(output, "\n{} Answer {}", SEPARATOR, SEPARATOR)?;
                writeln!(output, "{}", text)?;
                writeln!(output, "{}\n", "=".repeat(SEPARATOR.len() * 2 + 8))?;
            }
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                tracing::error!(error = %msg, "unexpected failure while answering");
                writeln!(output, "\nUnexpected error: {}\n", msg)?;
            }
        }
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
