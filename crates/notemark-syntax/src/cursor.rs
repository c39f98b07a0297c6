/// A byte cursor over note source with position save/restore.
///
/// Every structural character of the block grammar is ASCII, so byte
/// positions produced by the cursor always land on char boundaries.
#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    src: &'s str,
    i: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, i: 0 }
    }

    pub fn src(&self) -> &'s str {
        self.src
    }

    /// Current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Moves back (or forward) to a position obtained from [`Cursor::pos`].
    pub fn set_pos(&mut self, pos: usize) {
        self.i = pos.min(self.src.len());
    }

    pub fn eof(&self) -> bool {
        self.i >= self.src.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.nth(0)
    }

    /// Peeks `n` bytes ahead without advancing.
    pub fn nth(&self, n: usize) -> Option<u8> {
        self.src.as_bytes().get(self.i + n).copied()
    }

    pub fn starts_with(&self, pat: &str) -> bool {
        self.src.as_bytes()[self.i..].starts_with(pat.as_bytes())
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.set_pos(self.i + n);
    }

    /// Consumes bytes while `pred` holds and returns how many were consumed.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        self.i - start
    }

    /// Consumes the rest of the current line, terminator included.
    pub fn bump_line(&mut self) -> &'s str {
        let start = self.i;
        match self.src[start..].find('\n') {
            Some(offset) => self.i = start + offset + 1,
            None => self.i = self.src.len(),
        }
        &self.src[start..self.i]
    }

    pub fn slice(&self, start: usize) -> &'s str {
        &self.src[start..self.i]
    }
}
