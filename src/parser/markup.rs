//! Markup handling: stripping HTML/Markdown down to prose and detecting
//! structural markers (headings, media, links, lists, schema, layout).
//!
//! Detection is regex based and accepts both HTML and Markdown in the same
//! body, since CMS content frequently mixes the two.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>").unwrap());
static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z!][^>]*>").unwrap());
static FENCED_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ms)^[ \t]*```[^\n]*\n.*?(?:^[ \t]*```[ \t]*$|\z)|^[ \t]*~~~[^\n]*\n.*?(?:^[ \t]*~~~[ \t]*$|\z)",
    )
    .unwrap()
});
static HTML_PRE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<pre\b.*?</pre\s*>").unwrap());
static MD_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());
static MD_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());
static MD_HEADING_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").unwrap());
static MD_LIST_MARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+\.)[ \t]+").unwrap());
static MD_QUOTE_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*>[ \t]?").unwrap());
static MD_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*`~]+").unwrap());

static BLOCK_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)</(?:p|h[1-6]|li|ul|ol|div|section|article|blockquote|table|pre|figure)\s*>",
    )
    .unwrap()
});
static HTML_HEADING_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h[1-6][\s>]").unwrap());
static MD_HEADING_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+\S.*$").unwrap());
static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());
static HEADING_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:#{1,6}[ \t]|<h[1-6][\s>])").unwrap());

static HTML_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h1[\s>]").unwrap());
static HTML_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h2[\s>]").unwrap());
static HTML_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h3[\s>]").unwrap());
static MD_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*#[ \t]+\S").unwrap());
static MD_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*##[ \t]+\S").unwrap());
static MD_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*###[ \t]+\S").unwrap());
static HTML_HEADING_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]\s*>").unwrap());
static MD_HEADING_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+(.+)$").unwrap());

static HTML_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img[\s/>]").unwrap());
static HTML_VIDEO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(?:video|iframe)[\s>]").unwrap());
static HTML_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<table[\s>]").unwrap());
static HTML_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)<a\s[^>]*href\s*="#).unwrap());
static MD_LINK_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[^!])\[[^\]]+\]\([^)]+\)").unwrap());
static HTML_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(?:ul|ol|li)[\s>]").unwrap());
static MD_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+\.)[ \t]+\S").unwrap());
static FIXED_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bwidth\s*[:=]\s*["']?\d{4,}"#).unwrap());

static CALL_TO_ACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:sign up|subscribe|learn more|get started|contact us|download|click here|buy now|register|join (?:us|now|today)|try (?:it|now|for free)|book a (?:call|demo)|start your)\b",
    )
    .unwrap()
});

const SCHEMA_MARKERS: [&str; 4] = ["application/ld+json", "itemscope", "itemtype", "schema.org"];

const ENTITIES: [(&str, &str); 7] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
];

/// Remove fenced code blocks and `<pre>` sections. An unclosed fence runs to
/// the end of the body.
pub fn strip_code(text: &str) -> String {
    let text = FENCED_CODE.replace_all(text, "\n\n");
    HTML_PRE.replace_all(&text, "\n\n").into_owned()
}

/// Reduce HTML/Markdown to plain prose. Line structure is preserved so the
/// result can still be split into blocks.
pub fn strip_markup(text: &str) -> String {
    let text = strip_code(text);
    let text = SCRIPT_STYLE.replace_all(&text, " ");
    let text = HTML_COMMENT.replace_all(&text, " ");
    let text = HTML_TAG.replace_all(&text, " ");
    let text = MD_IMAGE.replace_all(&text, "${1}");
    let text = MD_LINK.replace_all(&text, "${1}");
    let text = MD_HEADING_MARK.replace_all(&text, "");
    let text = MD_LIST_MARK.replace_all(&text, "");
    let text = MD_QUOTE_MARK.replace_all(&text, "");
    let text = MD_EMPHASIS.replace_all(&text, "");

    let mut out = text.into_owned();
    for (entity, replacement) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, replacement);
        }
    }
    out
}

/// A block of content separated from its neighbours by a blank line or an
/// HTML block boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Plain text of the block
    pub text: String,
    /// Block is a heading rather than a paragraph
    pub is_heading: bool,
}

/// Split a body into non-empty blocks. Every heading is a block of its own,
/// even when a paragraph follows it on the next line.
pub fn split_blocks(body: &str) -> Vec<Block> {
    let normalized = strip_code(&body.replace("\r\n", "\n"));
    let normalized = BLOCK_CLOSE.replace_all(&normalized, "$0\n\n");
    let normalized = HTML_HEADING_OPEN.replace_all(&normalized, "\n\n$0");
    let normalized = MD_HEADING_LINE.replace_all(&normalized, "\n\n$0\n\n");

    BLANK_LINE
        .split(&normalized)
        .filter_map(|raw| {
            let raw = raw.trim();
            let text = strip_markup(raw);
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            Some(Block {
                text,
                is_heading: HEADING_BLOCK.is_match(raw),
            })
        })
        .collect()
}

/// Heading counts by level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
}

impl HeadingCounts {
    pub fn total(&self) -> usize {
        self.h1 + self.h2 + self.h3
    }
}

pub fn count_headings(body: &str) -> HeadingCounts {
    let body = strip_code(body);
    let body = body.as_str();
    HeadingCounts {
        h1: HTML_H1.find_iter(body).count() + MD_H1.find_iter(body).count(),
        h2: HTML_H2.find_iter(body).count() + MD_H2.find_iter(body).count(),
        h3: HTML_H3.find_iter(body).count() + MD_H3.find_iter(body).count(),
    }
}

/// Plain text of every heading (any level), in document order per syntax
pub fn heading_texts(body: &str) -> Vec<String> {
    let body = strip_code(body);
    let html = HTML_HEADING_TEXT
        .captures_iter(&body)
        .filter_map(|c| c.get(1).map(|m| strip_markup(m.as_str())));
    let md = MD_HEADING_TEXT
        .captures_iter(&body)
        .filter_map(|c| c.get(1).map(|m| strip_markup(m.as_str())));
    html.chain(md)
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn count_images(body: &str) -> usize {
    HTML_IMAGE.find_iter(body).count() + MD_IMAGE.find_iter(body).count()
}

/// `<video>` elements and `<iframe>` embeds
pub fn count_videos(body: &str) -> usize {
    HTML_VIDEO.find_iter(body).count()
}

pub fn count_tables(body: &str) -> usize {
    HTML_TABLE.find_iter(body).count()
}

pub fn has_links(body: &str) -> bool {
    HTML_LINK.is_match(body) || MD_LINK_ONLY.is_match(body)
}

pub fn has_lists(body: &str) -> bool {
    HTML_LIST.is_match(body) || MD_LIST.is_match(body)
}

pub fn has_call_to_action(text: &str) -> bool {
    CALL_TO_ACTION.is_match(text)
}

pub fn has_schema_markup(body: &str) -> bool {
    let lower = body.to_lowercase();
    SCHEMA_MARKERS.iter().any(|m| lower.contains(m))
}

/// Inline widths of 1000 units or more break small screens
pub fn has_fixed_width(body: &str) -> bool {
    FIXED_WIDTH.is_match(body)
}

/// URL-friendly lowercase slug: alphanumeric runs joined by single hyphens
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_tags() {
        let text = strip_markup("<p>Hello <strong>world</strong></p>");
        assert_eq!(text.split_whitespace().collect::<Vec<_>>(), vec!["Hello", "world"]);
    }

    #[test]
    fn test_strip_script_and_comments() {
        let text = strip_markup(
            "<script type=\"application/ld+json\">{\"a\": 1}</script><!-- hidden -->visible",
        );
        assert_eq!(text.trim(), "visible");
    }

    #[test]
    fn test_strip_markdown() {
        let text = strip_markup("# Title\n\n- item one\n> quoted **bold** [link](http://x.y)\n![alt](a.png)");
        let words: Vec<_> = text.split_whitespace().collect();
        assert_eq!(words, vec!["Title", "item", "one", "quoted", "bold", "link", "alt"]);
    }

    #[test]
    fn test_strip_entities() {
        assert_eq!(strip_markup("Tom&nbsp;&amp;&nbsp;Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_split_blocks_markdown() {
        let blocks = split_blocks("# Heading\n\nFirst para.\n\n\n\nSecond para.\n   \nThird.");
        assert_eq!(blocks.len(), 4);
        assert!(blocks[0].is_heading);
        assert_eq!(blocks[1].text, "First para.");
        assert!(!blocks[3].is_heading);
    }

    #[test]
    fn test_split_blocks_html_without_blank_lines() {
        let blocks = split_blocks("<h1>Title</h1><p>One.</p><p>Two.</p>");
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].is_heading);
        assert_eq!(blocks[2].text, "Two.");
    }

    #[test]
    fn test_split_blocks_heading_glued_to_paragraph() {
        let blocks = split_blocks("# Guitar Basics\nTo learn guitar you need patience.\n## Chords\nStart with G.");
        let kinds: Vec<bool> = blocks.iter().map(|b| b.is_heading).collect();
        assert_eq!(kinds, vec![true, false, true, false]);
        assert_eq!(blocks[1].text, "To learn guitar you need patience.");

        let blocks = split_blocks("Intro line.\n<h2>Next</h2>\nMore.");
        let kinds: Vec<bool> = blocks.iter().map(|b| b.is_heading).collect();
        assert_eq!(kinds, vec![false, true, false]);
    }

    #[test]
    fn test_line_breaks_stay_inside_paragraph() {
        let blocks = split_blocks("<p>Line one<br>Line two<br/>Line three<br>Line four<br>Line five</p>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Line one Line two Line three Line four Line five");
    }

    #[test]
    fn test_angle_brackets_in_prose_are_kept() {
        let text = strip_markup("If x < 5 and y > 3 then the loop ends early and everything is fine.");
        assert_eq!(text.split_whitespace().count(), 17);
        assert_eq!(strip_markup("I <3 this & <b>that</b>").split_whitespace().count(), 5);
    }

    #[test]
    fn test_code_blocks_are_not_prose() {
        let body = "Intro text here.\n\n```bash\n# install deps\n# run it\n```\n\nMore text.";
        assert_eq!(count_headings(body).total(), 0);
        assert!(heading_texts(body).is_empty());
        assert_eq!(strip_markup(body).split_whitespace().count(), 5);
        let blocks = split_blocks(body);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].text, "More text.");

        let html = "<p>Run this:</p><pre><code># not a heading\nmake all</code></pre>";
        assert_eq!(strip_markup(html).split_whitespace().count(), 2);
        assert_eq!(count_headings(html).total(), 0);
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let body = "Before.\n\n~~~\n# comment\nstill code";
        assert_eq!(strip_markup(body).trim(), "Before.");
        assert_eq!(count_headings(body).total(), 0);
    }

    #[test]
    fn test_split_blocks_empty() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("\n\n  \n").is_empty());
    }

    #[test]
    fn test_count_headings_mixed() {
        let body = "<h1>A</h1>\n## B\n## C\n<h3 class=\"x\">D</h3>\n#hashtag";
        let counts = count_headings(body);
        assert_eq!(counts, HeadingCounts { h1: 1, h2: 2, h3: 1 });
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_heading_texts() {
        let texts = heading_texts("<h2>Why <em>Rust</em></h2>\n# Intro");
        assert_eq!(texts, vec!["Why Rust".to_string(), "Intro".to_string()]);
    }

    #[test]
    fn test_media_detection() {
        let body = "<img src=a.png><IMG/>![x](y.png)<video src=v.mp4></video><iframe src=yt></iframe>";
        assert_eq!(count_images(body), 3);
        assert_eq!(count_videos(body), 2);
    }

    #[test]
    fn test_links_and_lists() {
        assert!(has_links("see <a href=\"/x\">this</a>"));
        assert!(has_links("see [docs](https://example.com)"));
        assert!(!has_links("![only an image](a.png)"));
        assert!(has_lists("<ul><li>a</li></ul>"));
        assert!(has_lists("intro\n- a\n- b"));
        assert!(has_lists("1. first"));
        assert!(!has_lists("plain text - with dash"));
    }

    #[test]
    fn test_call_to_action() {
        assert!(has_call_to_action("Please Subscribe to our newsletter"));
        assert!(has_call_to_action("click here to learn more"));
        assert!(!has_call_to_action("the joint was registered"));
    }

    #[test]
    fn test_schema_and_layout() {
        assert!(has_schema_markup("<div itemscope itemtype=\"https://schema.org/Article\">"));
        assert!(!has_schema_markup("<div>plain</div>"));
        assert!(has_fixed_width("<table width=\"1200\">"));
        assert!(has_fixed_width("style=\"width: 1400px\""));
        assert!(!has_fixed_width("style=\"width: 100%\""));
        assert_eq!(count_tables("<table><tr></tr></table>"), 1);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("How to Learn Guitar Fast"), "how-to-learn-guitar-fast");
        assert_eq!(slugify("  Rust: 2024 -- Edition!  "), "rust-2024-edition");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
