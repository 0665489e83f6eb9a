//! DOM helpers over `scraper`.
//!
//! [`inner_text`] approximates the browser's `innerText`: table cells are
//! separated by tabs, block elements and `<br>` start new lines, whitespace
//! inside text runs collapses, and blank lines are dropped.

use scraper::{ElementRef, Html, Selector};

use crate::PortalError;

const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "tbody", "thead", "tfoot", "tr", "ul",
];

const SKIPPED: &[&str] = &["script", "style", "noscript", "template", "head"];

pub fn selector(css: &str) -> Result<Selector, PortalError> {
    Selector::parse(css).map_err(|e| PortalError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// First element matching `css`, if any.
pub fn first<'a>(doc: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>, PortalError> {
    Ok(doc.select(&selector(css)?).next())
}

/// Inner text of the first element matching `css`, trimmed.
pub fn text_of(doc: &Html, css: &str) -> Result<Option<String>, PortalError> {
    Ok(first(doc, css)?.map(|el| inner_text(el).trim().to_string()))
}

pub fn inner_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    walk(el, &mut raw);
    normalize(&raw)
}

fn walk(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            push_collapsed(out, text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        match child.value().name() {
            "br" => out.push('\n'),
            name if SKIPPED.contains(&name) => {}
            "td" | "th" => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\t');
                }
                walk(child, out);
            }
            name if BLOCK.contains(&name) => {
                out.push('\n');
                walk(child, out);
                out.push('\n');
            }
            _ => walk(child, out),
        }
    }
}

fn push_collapsed(out: &mut String, text: &str) {
    let mut last_space = out.ends_with(' ');
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            line.split('\t')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\t")
        })
        .map(|line| line.trim_matches(' ').to_string())
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(html: &str, css: &str) -> String {
        let doc = Html::parse_document(html);
        text_of(&doc, css).unwrap().unwrap_or_default()
    }

    #[test]
    fn collapses_whitespace_and_breaks_lines() {
        let html = r#"<div id="x">  Recuperação
            Judicial <br/> Falência&nbsp;&nbsp;e afins </div>"#;
        assert_eq!(text(html, "#x"), "Recuperação Judicial\nFalência e afins");
    }

    #[test]
    fn cells_are_tab_separated() {
        let html = r#"<table><tr id="r"><td> 24/03/2025 </td><td></td>
            <td><a>Decisão</a><br><span>Processamento deferido</span></td></tr></table>"#;
        assert_eq!(
            text(html, "#r"),
            "24/03/2025\t\tDecisão\nProcessamento deferido"
        );
    }

    #[test]
    fn blocks_start_new_lines_and_scripts_are_skipped() {
        let html = r#"<div id="x"><p>um</p><script>var a = 1;</script><p>dois</p></div>"#;
        assert_eq!(text(html, "#x"), "um\ndois");
    }

    #[test]
    fn missing_element_is_none() {
        let doc = Html::parse_document("<p>x</p>");
        assert!(text_of(&doc, "#nada").unwrap().is_none());
    }

    #[test]
    fn bad_selector_is_an_error() {
        assert!(matches!(
            selector("##"),
            Err(PortalError::Selector { .. })
        ));
    }
}
