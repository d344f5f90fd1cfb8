//! The Lexer implementation for the GraphViz file format.

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    EOF,
    Identifier(String),
    Numeral(String),
    QuotedString(String),
    HtmlString(String),
    GraphKW,
    NodeKW,
    EdgeKW,
    DigraphKW,
    StrictKW,
    SubgraphKW,
    Equal,
    Colon,
    Comma,
    Semicolon,
    ArrowRight,
    ArrowLine,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    /// The index of the current character.
    pub pos: usize,
    pub ch: char,
    /// The index of the first character of the last token.
    pub tok_start: usize,
}

fn is_id_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || (ch as u32) >= 0x80
}

fn is_id_char(ch: char) -> bool {
    is_id_start(ch) || ch.is_ascii_digit()
}

impl Lexer {
    pub fn from_string(input: &str) -> Self {
        let chars = input.chars().collect();
        Lexer::new(chars)
    }

    pub fn new(input: Vec<char>) -> Self {
        let ch = input.first().copied().unwrap_or('\0');
        Self {
            input,
            pos: 0,
            ch,
            tok_start: 0,
        }
    }

    /// \returns the 1-based (line, column) of the character at \p idx.
    pub fn location(&self, idx: usize) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for ch in self.input.iter().take(idx) {
            if *ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    /// Renders the source line that contains \p idx, and a second line with
    /// a '^' marker under the character.
    pub fn excerpt(&self, idx: usize) -> String {
        let idx = idx.min(self.input.len());
        let line_start = self.input[..idx]
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |p| p + 1);
        let line_end = self.input[idx..]
            .iter()
            .position(|c| *c == '\n')
            .map_or(self.input.len(), |p| idx + p);
        let line: String = self.input[line_start..line_end].iter().collect();
        let marker = " ".repeat(idx - line_start);
        format!("{}\n{}^", line.trim_end_matches('\r'), marker)
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.input.len()
    }

    fn peek(&self) -> char {
        self.input.get(self.pos + 1).copied().unwrap_or('\0')
    }

    pub fn read_char(&mut self) {
        if self.has_next() {
            self.pos += 1;
        }
        self.ch = self.input.get(self.pos).copied().unwrap_or('\0');
    }

    fn at_line_start(&self) -> bool {
        self.input[..self.pos]
            .iter()
            .rev()
            .take_while(|c| **c != '\n')
            .all(|c| c.is_whitespace())
    }

    pub fn skip_whitespace(&mut self) -> bool {
        let mut changed = false;
        while self.ch.is_whitespace() {
            self.read_char();
            changed = true;
        }
        changed
    }

    /// Skips '//' and '/* */' comments, and '#' lines (C preprocessor
    /// output).
    pub fn skip_comment(&mut self) -> bool {
        let line_comment = (self.ch == '/' && self.peek() == '/')
            || (self.ch == '#' && self.at_line_start());
        if line_comment {
            while self.has_next() && self.ch != '\n' {
                self.read_char();
            }
            return true;
        }

        if self.ch == '/' && self.peek() == '*' {
            self.read_char();
            self.read_char();
            while self.has_next() {
                if self.ch == '*' && self.peek() == '/' {
                    self.read_char();
                    self.read_char();
                    return true;
                }
                self.read_char();
            }
            return true;
        }
        false
    }

    pub fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while is_id_char(self.ch) {
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    /// Reads a numeral of the form: [-]?(.[0-9]+ | [0-9]+(.[0-9]*)?)
    pub fn read_number(&mut self) -> String {
        let mut result = String::new();
        let mut period = false;
        while self.ch.is_ascii_digit() || self.ch == '.' {
            // Only allow one period in each number.
            if self.ch == '.' {
                if period {
                    break;
                }
                period = true;
            }
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    fn read_quoted(&mut self) -> Result<String, String> {
        let mut result = String::new();
        // Consume the opening quote.
        self.read_char();
        while self.ch != '"' {
            if !self.has_next() {
                return Err("Unterminated string".to_string());
            }
            if self.ch == '\\' {
                match self.peek() {
                    '"' => {
                        self.read_char();
                        result.push('"');
                    }
                    '\\' => {
                        self.read_char();
                        result.push_str("\\\\");
                    }
                    '\n' => {
                        // Line continuation.
                        self.read_char();
                    }
                    '\r' if self.input.get(self.pos + 2) == Some(&'\n') => {
                        self.read_char();
                        self.read_char();
                    }
                    _ => result.push('\\'),
                }
            } else {
                result.push(self.ch);
            }
            self.read_char();
        }
        // Consume the closing quote.
        self.read_char();
        Ok(result)
    }

    /// Reads a quoted string, including "a" + "b" concatenations.
    pub fn read_string(&mut self) -> Token {
        let mut result = match self.read_quoted() {
            Ok(s) => s,
            Err(msg) => return Token::Error(msg),
        };

        loop {
            let saved = (self.pos, self.ch);
            while self.skip_comment() || self.skip_whitespace() {}
            if self.ch != '+' {
                self.pos = saved.0;
                self.ch = saved.1;
                return Token::QuotedString(result);
            }
            self.read_char();
            while self.skip_comment() || self.skip_whitespace() {}
            if self.ch != '"' {
                return Token::Error(
                    "Expected a quoted string after '+'".to_string(),
                );
            }
            match self.read_quoted() {
                Ok(s) => result.push_str(&s),
                Err(msg) => return Token::Error(msg),
            }
        }
    }

    /// Reads a '<' ... '>' HTML string. Nested angle brackets are kept in
    /// the content; the outer pair is dropped.
    pub fn read_html(&mut self) -> Token {
        let mut result = String::new();
        let mut bracket_balance = 1;
        // Consume the opening '<'.
        self.read_char();
        loop {
            if !self.has_next() {
                // Reached EOF without completing the string
                return Token::Error("Unterminated HTML string".to_string());
            }
            if self.ch == '<' {
                bracket_balance += 1;
            } else if self.ch == '>' {
                bracket_balance -= 1;
                if bracket_balance == 0 {
                    self.read_char();
                    break;
                }
            }
            result.push(self.ch);
            self.read_char();
        }
        Token::HtmlString(result)
    }

    pub fn next_token(&mut self) -> Token {
        while self.skip_comment() || self.skip_whitespace() {}
        self.tok_start = self.pos;
        let tok = match self.ch {
            '=' => Token::Equal,
            ';' => Token::Semicolon,
            ':' => Token::Colon,
            '[' => Token::OpenBracket,
            ']' => Token::CloseBracket,
            '{' => Token::OpenBrace,
            '}' => Token::CloseBrace,
            ',' => Token::Comma,
            '"' => return self.read_string(),
            '<' => return self.read_html(),
            '-' => match self.peek() {
                '>' => {
                    self.read_char();
                    Token::ArrowRight
                }
                '-' => {
                    self.read_char();
                    Token::ArrowLine
                }
                c if c.is_ascii_digit() || c == '.' => {
                    self.read_char();
                    let res = self.read_number();
                    return Token::Numeral(format!("-{}", res));
                }
                _ => Token::Error("Unexpected '-'".to_string()),
            },
            '\0' if !self.has_next() => return Token::EOF,
            _ => {
                if is_id_start(self.ch) {
                    let name = self.read_identifier();
                    return match name.to_ascii_lowercase().as_str() {
                        "graph" => Token::GraphKW,
                        "node" => Token::NodeKW,
                        "edge" => Token::EdgeKW,
                        "digraph" => Token::DigraphKW,
                        "strict" => Token::StrictKW,
                        "subgraph" => Token::SubgraphKW,
                        _ => Token::Identifier(name),
                    };
                }
                if self.ch.is_ascii_digit()
                    || (self.ch == '.' && self.peek().is_ascii_digit())
                {
                    let num = self.read_number();
                    if is_id_start(self.ch) {
                        return Token::Error(format!(
                            "Unexpected character '{}' after numeral",
                            self.ch
                        ));
                    }
                    return Token::Numeral(num);
                }

                Token::Error(format!("Unexpected character '{}'", self.ch))
            }
        };
        self.read_char();
        tok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::from_string(input);
        let mut res = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = matches!(tok, Token::EOF | Token::Error(_));
            res.push(tok);
            if done {
                return res;
            }
        }
    }

    #[test]
    fn simple_edge() {
        let toks = lex_all("a -> b");
        assert_eq!(
            toks,
            vec![
                Token::Identifier("a".to_string()),
                Token::ArrowRight,
                Token::Identifier("b".to_string()),
                Token::EOF
            ]
        );
    }

    #[test]
    fn numerals() {
        let toks = lex_all("-12345 1.12 .5 -.25");
        assert_eq!(
            toks,
            vec![
                Token::Numeral("-12345".to_string()),
                Token::Numeral("1.12".to_string()),
                Token::Numeral(".5".to_string()),
                Token::Numeral("-.25".to_string()),
                Token::EOF
            ]
        );
    }

    #[test]
    fn keywords_ignore_case() {
        let toks = lex_all("DiGraph STRICT Subgraph NODE edge");
        assert_eq!(
            toks,
            vec![
                Token::DigraphKW,
                Token::StrictKW,
                Token::SubgraphKW,
                Token::NodeKW,
                Token::EdgeKW,
                Token::EOF
            ]
        );
    }

    #[test]
    fn strings_and_concatenation() {
        let toks = lex_all("\"node \\\"1\\\"\" \"a\" + /* x */ \"b\" \"x\\ny\"");
        assert_eq!(
            toks,
            vec![
                Token::QuotedString("node \"1\"".to_string()),
                Token::QuotedString("ab".to_string()),
                Token::QuotedString("x\\ny".to_string()),
                Token::EOF
            ]
        );
    }

    #[test]
    fn line_continuation() {
        let toks = lex_all("\"node \\\n1\"");
        assert_eq!(toks[0], Token::QuotedString("node 1".to_string()));
    }

    #[test]
    fn html_string() {
        let toks = lex_all("<<b>bold</b>> ;");
        assert_eq!(
            toks,
            vec![
                Token::HtmlString("<b>bold</b>".to_string()),
                Token::Semicolon,
                Token::EOF
            ]
        );
    }

    #[test]
    fn comments() {
        let toks = lex_all("# 1 \"file.dot\"\n// line\na /* block */ -- b // tail");
        assert_eq!(
            toks,
            vec![
                Token::Identifier("a".to_string()),
                Token::ArrowLine,
                Token::Identifier("b".to_string()),
                Token::EOF
            ]
        );
    }

    #[test]
    fn unterminated_string() {
        let toks = lex_all("a [label=\"abc");
        assert!(matches!(toks.last(), Some(Token::Error(_))));
    }

    #[test]
    fn error_location() {
        let mut lexer = Lexer::from_string("graph {\n  a ? b\n}");
        let mut tok = lexer.next_token();
        while !matches!(tok, Token::Error(_) | Token::EOF) {
            tok = lexer.next_token();
        }
        assert!(matches!(tok, Token::Error(_)));
        assert_eq!(lexer.location(lexer.tok_start), (2, 5));
        assert_eq!(lexer.excerpt(lexer.tok_start), "  a ? b\n    ^");
    }
}
