//! Notation scanner - splits a notation line into per-studio tokens
//!
//! A single pass over the input driven by a small state machine. Tokens are
//! whitespace separated, except that consecutive bare words may form one
//! multi-word studio name (`Control Room`).

/// Scanner state for the word currently being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Reading a studio name, no digits or colon seen yet
    Idle,
    /// Digits seen after the name: area suffix runs to the end of the word
    InAreaRun,
    /// Colon seen: sub-spaced token runs to the end of the word
    InSubSpaceRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RawToken {
    Bare(String),
    Areas(String),
    SubSpaced(String),
}

impl RawToken {
    fn into_string(self) -> String {
        match self {
            RawToken::Bare(s) | RawToken::Areas(s) | RawToken::SubSpaced(s) => s,
        }
    }
}

struct Scanner<'a> {
    known: &'a [String],
    state: ScanState,
    /// Byte offset where the current word began
    word_start: Option<usize>,
    tokens: Vec<RawToken>,
}

impl<'a> Scanner<'a> {
    fn new(known: &'a [String]) -> Self {
        Self {
            known,
            state: ScanState::Idle,
            word_start: None,
            tokens: Vec::new(),
        }
    }

    fn step(&mut self, input: &str, index: usize, c: char) {
        if c.is_whitespace() {
            self.end_word(input, index);
            return;
        }

        if self.word_start.is_none() {
            self.word_start = Some(index);
            self.state = ScanState::Idle;
        }

        self.state = match (self.state, c) {
            (ScanState::Idle, ':') => ScanState::InSubSpaceRun,
            (ScanState::Idle, c) if c.is_ascii_digit() => ScanState::InAreaRun,
            (state, _) => state,
        };
    }

    fn end_word(&mut self, input: &str, end: usize) {
        let Some(start) = self.word_start.take() else {
            return;
        };

        let word = input[start..end].to_string();
        let token = match self.state {
            ScanState::Idle => RawToken::Bare(word),
            ScanState::InAreaRun => RawToken::Areas(word),
            ScanState::InSubSpaceRun => RawToken::SubSpaced(word),
        };
        self.state = ScanState::Idle;
        self.push(token);
    }

    fn push(&mut self, token: RawToken) {
        if let RawToken::Bare(word) = &token {
            if let Some(RawToken::Bare(prev)) = self.tokens.last_mut() {
                let joined = format!("{} {}", prev, word);
                let prev_known = self.known.iter().any(|k| k == prev);
                let joined_known = self.known.iter().any(|k| *k == joined);
                if !prev_known || joined_known {
                    tracing::debug!(token = %joined, "Coalesced multi-word studio name");
                    *prev = joined;
                    return;
                }
            }
        }
        self.tokens.push(token);
    }

    fn finish(mut self, input: &str) -> Vec<String> {
        self.end_word(input, input.len());
        self.tokens.into_iter().map(RawToken::into_string).collect()
    }
}

/// Split a notation line into raw per-studio tokens.
///
/// `known` holds studio names and abbreviations; a bare word matching one of
/// them is never merged with the word that follows it. Never fails: input
/// that cannot be split sensibly surfaces later during resolution.
pub fn split_tokens(raw: &str, known: &[String]) -> Vec<String> {
    let mut scanner = Scanner::new(known);
    for (index, c) in raw.char_indices() {
        scanner.step(raw, index, c);
    }
    scanner.finish(raw)
}
