// Vue SFC (Single File Component) section parsing
//
// Splits a .vue file into its template, script and style sections, line by
// line. Nested <template> tags inside the template section are tracked so the
// section only ends at its own closing tag.

use super::helpers::{LANG_ATTR_RE, SECTION_START_RE};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionKind {
    Template,
    Script,
    Style,
}

impl SectionKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "template" => Some(SectionKind::Template),
            "script" => Some(SectionKind::Script),
            "style" => Some(SectionKind::Style),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            SectionKind::Template => "template",
            SectionKind::Script => "script",
            SectionKind::Style => "style",
        }
    }
}

/// A section within a Vue SFC file
#[derive(Debug, Clone)]
pub(crate) struct VueSection {
    pub(crate) kind: SectionKind,
    pub(crate) content: String,
    /// Line of the opening tag, 1-based
    pub(crate) start_line: usize,
    /// Line holding the first content character, 1-based
    pub(crate) content_start_line: usize,
    pub(crate) lang: Option<String>,
}

impl VueSection {
    pub(crate) fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Rows to add to positions parsed from `content`.
    pub(crate) fn line_offset(&self) -> usize {
        self.content_start_line.saturating_sub(1)
    }
}

impl fmt::Display for VueSection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}@{}{}",
            self.kind.tag(),
            self.start_line,
            self.lang
                .as_deref()
                .map(|l| format!("({})", l))
                .unwrap_or_default()
        )
    }
}

/// Section being filled while lines are consumed
struct OpenSection<'a> {
    kind: SectionKind,
    start_line: usize,
    content_start_line: usize,
    lang: Option<String>,
    lines: Vec<&'a str>,
    /// Open <template> tags, including the section's own
    depth: usize,
}

impl<'a> OpenSection<'a> {
    fn build(self) -> VueSection {
        VueSection {
            kind: self.kind,
            content: self.lines.join("\n"),
            start_line: self.start_line,
            content_start_line: self.content_start_line,
            lang: self.lang,
        }
    }

    /// Byte offset in `line` of the tag closing this section, if any.
    fn close_position(&mut self, line: &str) -> Option<usize> {
        match self.kind {
            SectionKind::Script => line.find("</script>"),
            SectionKind::Style => line.find("</style>"),
            SectionKind::Template => {
                let mut i = 0;
                while i < line.len() {
                    let rest = &line[i..];
                    if rest.starts_with("</template>") {
                        self.depth -= 1;
                        if self.depth == 0 {
                            return Some(i);
                        }
                        i += "</template>".len();
                    } else if rest.starts_with("<template")
                        && rest[9..].starts_with(|c: char| c.is_whitespace() || c == '>')
                    {
                        self.depth += 1;
                        i += "<template".len();
                    } else {
                        i += rest.chars().next().map_or(1, char::len_utf8);
                    }
                }
                None
            }
        }
    }
}

/// Parse Vue SFC structure into its sections, in file order.
///
/// A section left unclosed at end of file keeps everything after its tag.
pub(crate) fn parse_vue_sfc(content: &str) -> Vec<VueSection> {
    let mut sections = Vec::new();
    let mut open: Option<OpenSection> = None;

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let mut rest = line;

        if open.is_none() {
            let trimmed = line.trim_start();
            let Some(caps) = SECTION_START_RE.captures(trimmed) else {
                continue;
            };
            let Some(kind) = caps.get(1).and_then(|m| SectionKind::from_tag(m.as_str())) else {
                continue;
            };
            let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let lang = LANG_ATTR_RE
                .captures(attrs)
                .and_then(|m| m.get(1))
                .map(|m| m.as_str().to_string());
            let after = &trimmed[caps.get(0).map_or(0, |m| m.end())..];

            open = Some(OpenSection {
                kind,
                start_line: line_no,
                content_start_line: if after.trim().is_empty() { line_no + 1 } else { line_no },
                lang,
                lines: Vec::new(),
                depth: 1,
            });
            if after.trim().is_empty() {
                continue;
            }
            rest = after;
        }

        let Some(section) = open.as_mut() else {
            continue;
        };
        match section.close_position(rest) {
            Some(end) => {
                if !rest[..end].trim().is_empty() {
                    section.lines.push(&rest[..end]);
                }
                if let Some(done) = open.take() {
                    sections.push(done.build());
                }
            }
            None => section.lines.push(rest),
        }
    }

    if let Some(section) = open {
        sections.push(section.build());
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_with_nested_templates() {
        let source = r#"<template>
  <div id="app">
    <template v-if="ok"><span>hi</span></template>
  </div>
</template>

<script lang="ts">
export default {}
</script>

<style scoped>
.a { color: red; }
</style>
"#;
        let sections = parse_vue_sfc(source);
        assert_eq!(sections.len(), 3);

        let template = &sections[0];
        assert_eq!(template.kind, SectionKind::Template);
        assert!(template.content.contains("v-if"));
        assert!(template.content.trim_end().ends_with("</div>"));
        assert_eq!(template.content_start_line, 2);

        let script = &sections[1];
        assert_eq!(script.kind, SectionKind::Script);
        assert_eq!(script.lang.as_deref(), Some("ts"));
        assert_eq!(script.content, "export default {}");
        assert_eq!(script.start_line, 7);
        assert_eq!(script.line_offset(), 7);
        assert_eq!(script.to_string(), "script@7(ts)");

        assert_eq!(sections[2].kind, SectionKind::Style);
    }

    #[test]
    fn test_single_line_section() {
        let sections = parse_vue_sfc("<template><p>one</p></template>\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "<p>one</p>");
        assert_eq!(sections[0].content_start_line, 1);
    }

    #[test]
    fn test_unclosed_section_runs_to_end() {
        let sections = parse_vue_sfc("<script>\nconst a = 1;\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "const a = 1;");
        assert!(!sections[0].is_blank());
    }
}
