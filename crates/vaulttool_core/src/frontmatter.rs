/// Attributes extracted from a note's front-matter block. Only `aliases` is
/// of interest to backlink discovery; everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub aliases: Vec<String>,
}

/// Parse the front-matter block at the very start of a document, if any.
///
/// The block is delimited by a `---` line as the first line and the next
/// `---` line. Absent, unterminated, or malformed front matter yields the
/// empty attribute set; this parse never fails.
pub fn parse_front_matter(content: &str) -> FrontMatter {
    let Some(block) = front_matter_block(content) else {
        return FrontMatter::default();
    };
    let Ok(value) = serde_yaml::from_str::<serde_yaml::Value>(block) else {
        return FrontMatter::default();
    };

    let mut aliases = Vec::new();
    match value.get("aliases") {
        Some(serde_yaml::Value::Sequence(items)) => {
            for item in items {
                if let serde_yaml::Value::String(alias) = item {
                    aliases.push(alias.clone());
                }
            }
        }
        Some(serde_yaml::Value::String(alias)) => aliases.push(alias.clone()),
        _ => {}
    }
    FrontMatter { aliases }
}

fn front_matter_block(content: &str) -> Option<&str> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some(&content[start..offset]);
        }
        offset += line.len();
    }
    None
}
