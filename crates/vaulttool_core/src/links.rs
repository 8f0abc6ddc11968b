/// One parsed wiki-link occurrence. `raw_target` is the text left of the
/// first pipe; `normalized_target` has a trailing `.md` stripped so that
/// `[[note.md]]` and `[[note]]` resolve identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub raw_target: String,
    pub normalized_target: String,
}

const NOTE_SUFFIX: &str = ".md";

/// Iterate the inner text of every `[[...]]` occurrence in a document,
/// ignoring occurrences inside fenced code blocks or inline code spans and
/// occurrences whose opening marker is escaped with a backslash.
///
/// Each call builds a fresh pass over the document; the iterator is finite
/// and does no I/O.
pub fn link_tokens(content: &str) -> LinkTokens {
    LinkTokens {
        masked: mask_code_regions(content),
        cursor: 0,
    }
}

/// Split one token into target and optional display alias, dropping tokens
/// that are empty after trimming.
pub fn parse_link_reference(token: &str) -> Option<LinkReference> {
    let raw_target = token.split('|').next().unwrap_or("").trim();
    if raw_target.is_empty() {
        return None;
    }
    let normalized_target = raw_target.strip_suffix(NOTE_SUFFIX).unwrap_or(raw_target);
    Some(LinkReference {
        raw_target: raw_target.to_string(),
        normalized_target: normalized_target.to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct LinkTokens {
    masked: String,
    cursor: usize,
}

impl Iterator for LinkTokens {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let bytes = self.masked.as_bytes();
        while self.cursor + 1 < bytes.len() {
            if bytes[self.cursor] != b'[' || bytes[self.cursor + 1] != b'[' {
                self.cursor += 1;
                continue;
            }
            if self.cursor > 0 && bytes[self.cursor - 1] == b'\\' {
                self.cursor += 2;
                continue;
            }

            // Non-greedy: the first ]] closes the token.
            let start = self.cursor + 2;
            let mut end = start;
            while end + 1 < bytes.len() && !(bytes[end] == b']' && bytes[end + 1] == b']') {
                end += 1;
            }
            if end + 1 >= bytes.len() {
                self.cursor = bytes.len();
                return None;
            }

            let inner = &self.masked[start..end];
            self.cursor = end + 2;
            if !inner.trim().is_empty() {
                return Some(inner.to_string());
            }
        }
        None
    }
}

/// Rewrite the document with code regions blanked out, preserving newlines.
/// Fenced blocks are masked first, then inline spans over whatever text
/// survived, so the fence pass always takes precedence.
fn mask_code_regions(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut fence: Option<(char, usize)> = None;

    for line in content.split_inclusive('\n') {
        match fence {
            Some((marker, len)) => {
                if closes_fence(line, marker, len) {
                    fence = None;
                }
                push_blanked(&mut out, line);
            }
            None => {
                if let Some(opened) = opens_fence(line) {
                    fence = Some(opened);
                    push_blanked(&mut out, line);
                } else {
                    out.push_str(line);
                }
            }
        }
    }

    mask_inline_code(&out)
}

fn opens_fence(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim();
    let marker = trimmed.chars().next().filter(|ch| *ch == '`' || *ch == '~')?;
    let len = trimmed.chars().take_while(|ch| *ch == marker).count();
    if len < 3 {
        return None;
    }
    // The remainder is an optional info tag; it may not repeat the marker.
    if trimmed[len..].contains(marker) {
        return None;
    }
    Some((marker, len))
}

fn closes_fence(line: &str, marker: char, len: usize) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch == marker) && trimmed.len() >= len
}

fn push_blanked(out: &mut String, line: &str) {
    for ch in line.chars() {
        out.push(if ch == '\n' { '\n' } else { ' ' });
    }
}

fn mask_inline_code(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        if chars[index] == '`' {
            if let Some(found) = chars[index + 1..].iter().position(|ch| *ch == '`') {
                let close = index + 1 + found;
                for ch in &mut chars[index..=close] {
                    if *ch != '\n' {
                        *ch = ' ';
                    }
                }
                index = close + 1;
                continue;
            }
        }
        index += 1;
    }
    chars.into_iter().collect()
}
