use serde::Serialize;

pub const COMMENT: &str = "//";
pub const LABEL_TERMINATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub text: &'a str,
    /// 1-based.
    pub number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedLine {
    pub tokens: Vec<String>,
    /// Comment stripped and trimmed, commas kept.
    pub code: String,
    /// Raw line with surrounding whitespace trimmed, comment included.
    pub source: String,
    pub line: usize,
    /// `None` for label declarations.
    pub pc: Option<u32>,
}

impl NormalizedLine {
    /// Label name if this line is a declaration (`name:`).
    pub fn label_decl(&self) -> Option<String> {
        // "name:" or "name :", but not "name:," which is an instruction line
        let name = self.code.strip_suffix(LABEL_TERMINATOR)?;
        Some(name.replace(',', " ").trim_end().to_string())
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn operands(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or(&[])
    }
}

pub fn source_lines(text: &str) -> impl Iterator<Item = SourceLine<'_>> {
    text.lines()
        .enumerate()
        .map(|(i, text)| SourceLine { text, number: i + 1 })
}

/// Strip the comment, trim, split on whitespace and commas.
/// Returns `None` for blank and comment-only lines.
pub fn normalize(line: &SourceLine<'_>) -> Option<NormalizedLine> {
    let code = match line.text.find(COMMENT) {
        Some(p) => &line.text[..p],
        None => line.text,
    }
    .trim();
    let tokens: Vec<String> = code
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if tokens.is_empty() {
        return None;
    }
    Some(NormalizedLine {
        tokens,
        code: code.to_string(),
        source: line.text.trim().to_string(),
        line: line.number,
        pc: None,
    })
}
