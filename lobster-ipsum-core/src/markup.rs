use std::sync::OnceLock;

use rand::Rng;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::IpsumError;
use crate::model::generator::Generator;

fn marker_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"(?i)^\s*lobsteripsum\s+(\d+)(?:\s*-\s*(\d+))?\s*$")
			.expect("marker pattern is a valid regex")
	})
}

fn html_comment_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"(?s)<!--(.*?)-->").expect("comment pattern is a valid regex")
	})
}

/// A placeholder asking for `min` chars of text, or a random length in
/// `[min, max]`.
///
/// Written as `lobsteripsum 50` or `lobsteripsum 20-40` (case-insensitive,
/// surrounding whitespace allowed).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker {
	pub min: u64,
	pub max: Option<u64>,
}

impl Marker {
	/// Parses comment text into a marker.
	///
	/// Returns `None` if the text is not a marker, or if a bound does not fit
	/// in a `u64`.
	pub fn parse(text: &str) -> Option<Self> {
		let captures = marker_pattern().captures(text)?;
		let min = captures.get(1)?.as_str().parse().ok()?;
		let max = match captures.get(2) {
			Some(m) => Some(m.as_str().parse().ok()?),
			None => None,
		};
		Some(Self { min, max })
	}

	/// Generates the text for this marker. A missing `max` means `max = min`.
	pub fn render<R: Rng + ?Sized>(
		&self,
		generator: &Generator,
		rng: &mut R,
	) -> Result<String, IpsumError> {
		let max = self.max.unwrap_or(self.min);
		generator.generate_with_rng(self.min as f64, Some(max as f64), rng)
	}
}

/// What to do with a marker whose generation fails.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
	/// Replace the marker with the error message.
	#[default]
	RenderMessage,
	/// Leave the marker untouched.
	KeepMarker,
}

/// Minimal document tree scanned for markers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Node {
	Element { name: String, children: Vec<Node> },
	Text(String),
	Comment(String),
}

impl Node {
	pub fn element(name: impl Into<String>, children: Vec<Node>) -> Self {
		Node::Element { name: name.into(), children }
	}

	pub fn text(text: impl Into<String>) -> Self {
		Node::Text(text.into())
	}

	pub fn comment(text: impl Into<String>) -> Self {
		Node::Comment(text.into())
	}

	/// Concatenated text of this node and its descendants; comments excluded.
	pub fn text_content(&self) -> String {
		match self {
			Node::Element { children, .. } => children.iter().map(Node::text_content).collect(),
			Node::Text(text) => text.clone(),
			Node::Comment(_) => String::new(),
		}
	}
}

/// Returns a copy of `node` where every marker comment became a text node.
///
/// Non-marker comments and all other nodes are copied as-is.
pub fn replace_markers(node: &Node, generator: &Generator, policy: FailurePolicy) -> Node {
	replace_markers_with_rng(node, generator, policy, &mut rand::rng())
}

/// Same as [`replace_markers`] with an explicit random source.
pub fn replace_markers_with_rng<R: Rng + ?Sized>(
	node: &Node,
	generator: &Generator,
	policy: FailurePolicy,
	rng: &mut R,
) -> Node {
	match node {
		Node::Element { name, children } => Node::Element {
			name: name.clone(),
			children: children
				.iter()
				.map(|child| replace_markers_with_rng(child, generator, policy, rng))
				.collect(),
		},
		Node::Comment(text) => match substitute(text, generator, policy, rng) {
			Some(replacement) => Node::Text(replacement),
			None => node.clone(),
		},
		Node::Text(_) => node.clone(),
	}
}

/// Replaces `<!-- lobsteripsum ... -->` comments in an HTML string.
///
/// Generated text and error messages are escaped for HTML text content.
pub fn replace_html_comments(html: &str, generator: &Generator, policy: FailurePolicy) -> String {
	replace_html_comments_with_rng(html, generator, policy, &mut rand::rng())
}

/// Same as [`replace_html_comments`] with an explicit random source.
pub fn replace_html_comments_with_rng<R: Rng + ?Sized>(
	html: &str,
	generator: &Generator,
	policy: FailurePolicy,
	rng: &mut R,
) -> String {
	html_comment_pattern()
		.replace_all(html, |captures: &Captures| {
			match substitute(&captures[1], generator, policy, rng) {
				Some(replacement) => escape_html(&replacement),
				None => captures[0].to_owned(),
			}
		})
		.into_owned()
}

/// Text replacing a comment, or `None` to keep the comment.
fn substitute<R: Rng + ?Sized>(
	comment: &str,
	generator: &Generator,
	policy: FailurePolicy,
	rng: &mut R,
) -> Option<String> {
	let marker = Marker::parse(comment)?;
	match marker.render(generator, rng) {
		Ok(text) => Some(text),
		Err(e) => {
			log::warn!("marker '{}' failed: {e}", comment.trim());
			match policy {
				FailurePolicy::RenderMessage => Some(e.to_string()),
				FailurePolicy::KeepMarker => None,
			}
		}
	}
}

fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn parses_markers() {
		assert_eq!(Marker::parse("lobsteripsum 20-40"), Some(Marker { min: 20, max: Some(40) }));
		assert_eq!(Marker::parse("lobsteripsum 50"), Some(Marker { min: 50, max: None }));
		assert_eq!(Marker::parse("  LobsterIpsum   7 -  9 "), Some(Marker { min: 7, max: Some(9) }));
		assert_eq!(Marker::parse("\n lobsteripsum 12\n"), Some(Marker { min: 12, max: None }));
	}

	#[test]
	fn rejects_non_markers() {
		for text in [
			"lobsteripsum",
			"lobsteripsum abc",
			"lobsteripsum -5",
			"lobsteripsum 5-",
			"lorem ipsum 20",
			"lobsteripsum20",
			"lobsteripsum 20 words",
			"lobsteripsum 99999999999999999999999",
		] {
			assert_eq!(Marker::parse(text), None, "{text:?}");
		}
	}

	#[test]
	fn replaces_markers_recursively() {
		let generator = Generator::new().unwrap();
		let mut rng = StdRng::seed_from_u64(4);
		let document = Node::element(
			"body",
			vec![
				Node::text("intro"),
				Node::comment("lobsteripsum 30"),
				Node::element("p", vec![Node::comment(" lobsteripsum 50-60 ")]),
				Node::comment("just a comment"),
			],
		);

		let replaced = replace_markers_with_rng(&document, &generator, FailurePolicy::default(), &mut rng);
		let Node::Element { name, children } = &replaced else {
			panic!("root must stay an element");
		};
		assert_eq!(name, "body");
		assert_eq!(children[0], Node::text("intro"));
		assert!(matches!(&children[1], Node::Text(t) if t.chars().count() == 30));

		let nested = children[2].text_content().chars().count();
		assert!((50..=60).contains(&nested), "{nested}");
		assert_eq!(children[3], Node::comment("just a comment"));

		// The input tree is untouched.
		assert_eq!(document.text_content(), "intro");
	}

	#[test]
	fn failure_policies() {
		let generator = Generator::new().unwrap();
		let document = Node::element("div", vec![Node::comment("lobsteripsum 40-10")]);

		let rendered = replace_markers(&document, &generator, FailurePolicy::RenderMessage);
		assert!(rendered.text_content().starts_with("lobsteripsum - "));

		let kept = replace_markers(&document, &generator, FailurePolicy::KeepMarker);
		assert_eq!(kept, document);

		let too_short = Node::element("div", vec![Node::comment("lobsteripsum 1")]);
		let rendered = replace_markers(&too_short, &generator, FailurePolicy::RenderMessage);
		assert!(rendered.text_content().contains(">= 2"));
	}

	#[test]
	fn oversized_marker_is_rejected() {
		let generator = Generator::new().unwrap();
		let document = Node::element("p", vec![Node::comment("lobsteripsum 99999999999999")]);

		let rendered = replace_markers(&document, &generator, FailurePolicy::RenderMessage);
		assert!(rendered.text_content().contains("at most 1000000"));

		let kept = replace_markers(&document, &generator, FailurePolicy::KeepMarker);
		assert_eq!(kept, document);
	}

	#[test]
	fn replaces_html_comments() {
		let generator = Generator::new().unwrap();
		let mut rng = StdRng::seed_from_u64(12);
		let html = "<p><!-- lobsteripsum 25 --></p><!-- keep me --><div><!--LOBSTERIPSUM 1--></div>";

		let out = replace_html_comments_with_rng(html, &generator, FailurePolicy::RenderMessage, &mut rng);
		let first = out.strip_prefix("<p>").unwrap();
		let end = first.find("</p>").unwrap();
		assert_eq!(first[..end].chars().count(), 25);
		assert!(out.contains("<!-- keep me -->"));
		assert!(out.contains("(&gt;= 2)"));

		let kept = replace_html_comments_with_rng(html, &generator, FailurePolicy::KeepMarker, &mut rng);
		assert!(kept.contains("<!--LOBSTERIPSUM 1-->"));
	}
}
