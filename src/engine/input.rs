use anyhow::Context;
use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

/// whitespace tokenizer over the engine's line-oriented protocol. reads are
/// blocking; an exhausted stream surfaces as an error, which the caller
/// treats as end of match.
pub struct Input<R> {
    reader: R,
    tokens: VecDeque<String>,
}

impl Input<std::io::BufReader<std::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(std::io::BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead> Input<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            tokens: VecDeque::new(),
        }
    }

    /// one raw line. used for the JSON constants handshake, before any
    /// tokenized reads have buffered anything.
    pub fn line(&mut self) -> anyhow::Result<String> {
        let mut buffer = String::new();
        let read = self.reader.read_line(&mut buffer).context("read from engine")?;
        anyhow::ensure!(read > 0, "engine closed the stream");
        Ok(buffer.trim_end().to_string())
    }

    pub fn next<T>(&mut self) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        while self.tokens.is_empty() {
            let line = self.line()?;
            self.tokens.extend(line.split_whitespace().map(String::from));
        }
        let token = self.tokens.pop_front().expect("tokens refilled above");
        token
            .parse::<T>()
            .with_context(|| format!("parse token {:?}", token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_across_lines() {
        let mut input = Input::new("3 5\n7\n-2 9\n".as_bytes());
        assert!(input.next::<i32>().unwrap() == 3);
        assert!(input.next::<i32>().unwrap() == 5);
        assert!(input.next::<i32>().unwrap() == 7);
        assert!(input.next::<i32>().unwrap() == -2);
        assert!(input.next::<u32>().unwrap() == 9);
        assert!(input.next::<i32>().is_err());
    }

    #[test]
    fn raw_line_then_tokens() {
        let mut input = Input::new("{\"MAX_TURNS\":50}\n2 0\n".as_bytes());
        assert!(input.line().unwrap() == "{\"MAX_TURNS\":50}");
        assert!(input.next::<usize>().unwrap() == 2);
        assert!(input.next::<usize>().unwrap() == 0);
    }

    #[test]
    fn unparsable_token_is_an_error() {
        let mut input = Input::new("banana\n".as_bytes());
        assert!(input.next::<i32>().is_err());
    }
}
