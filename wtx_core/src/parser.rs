use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;

use crate::lexer::tokenize;
use crate::tokens::Token;

/// The most braces a single nesting level may consume on each side.
const MAX_BRACES_PER_LEVEL: usize = 3;

/// A node of the parsed template tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
	/// A run of literal text.
	Text(String),
	/// An argument separator inside a block, kept as its own node so pipes
	/// never fuse with neighbouring text.
	Pipe,
	/// A brace-delimited block.
	Block(Block),
}

/// A span of text delimited by matching runs of 2–3 brace characters. The
/// left and right runs always have the same length, so a single count is
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
	/// How many braces delimit the block on each side (2 or 3).
	pub braces: usize,
	/// The parsed content between the delimiters.
	pub body: Ast,
}

/// An ordered sequence of nodes with eager "smart concatenation": two
/// adjacent text leaves are always merged on insertion, while pipe nodes
/// never merge with their neighbours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref)]
pub struct Ast(Vec<Node>);

impl From<Vec<Node>> for Ast {
	fn from(nodes: Vec<Node>) -> Self {
		Self(nodes)
	}
}

impl Ast {
	pub fn new() -> Self {
		Self(vec![])
	}

	/// Append a node, merging adjacent text leaves.
	pub fn push(&mut self, node: Node) {
		match (self.0.last_mut(), node) {
			(Some(Node::Text(last)), Node::Text(text)) => last.push_str(&text),
			(_, node) => self.0.push(node),
		}
	}

	/// Prepend a node, merging adjacent text leaves.
	pub fn prepend(&mut self, node: Node) {
		match (self.0.first_mut(), node) {
			(Some(Node::Text(first)), Node::Text(text)) => first.insert_str(0, &text),
			(_, node) => self.0.insert(0, node),
		}
	}

	/// Append every node of `other`, applying the same merge rule at the
	/// boundary.
	pub fn extend(&mut self, other: Ast) {
		for node in other.0 {
			self.push(node);
		}
	}

	fn pop(&mut self) -> Option<Node> {
		self.0.pop()
	}

	/// The length of a trailing leftover close-brace run, if the last node
	/// is one.
	fn trailing_close_braces(&self) -> Option<usize> {
		match self.0.last() {
			Some(Node::Text(text)) if text.len() >= 2 && text.bytes().all(|byte| byte == b'}') => {
				Some(text.len())
			}
			_ => None,
		}
	}
}

/// Parse wikitext into a template tree.
///
/// Total: any input, however unbalanced, yields a tree in which unmatched
/// brace characters degrade to literal text.
pub fn parse(wikitext: &str) -> Ast {
	let mut tokens = tokenize(wikitext).into_iter();
	let mut ast = Ast::new();

	while let Some(token) = tokens.next() {
		match token {
			Token::OpenBraces(count) => ast.extend(parse_block(count, &mut tokens)),
			Token::Pipe => ast.push(Node::Pipe),
			// Plain text and stray close braces are both literal text here.
			token => ast.push(Node::Text(token.to_string())),
		}
	}

	ast
}

/// Parse the inside of a block opened by a run of `open` left braces.
/// Returns the nodes the block resolves to, which may include leftover
/// braces demoted to literal text.
fn parse_block(mut open: usize, tokens: &mut std::vec::IntoIter<Token>) -> Ast {
	let mut result = Ast::new();

	while open >= 2 {
		let Some(token) = tokens.next() else { break };

		match token {
			Token::Pipe => result.push(Node::Pipe),
			Token::Text(text) => result.push(Node::Text(text)),
			Token::OpenBraces(count) => {
				result.extend(parse_block(count, tokens));

				// The nested block may have left an unconsumed close-brace
				// run behind; take it and nest against our own pending open
				// braces.
				if let Some(count) = result.trailing_close_braces() {
					result.pop();
					let leftover = nest(&mut open, &mut result, count);
					if leftover > 0 {
						result.push(Node::Text("}".repeat(leftover)));
					}
				}
			}
			Token::CloseBraces(count) => {
				let leftover = nest(&mut open, &mut result, count);
				if leftover > 0 {
					result.push(Node::Text("}".repeat(leftover)));
				}
			}
		}
	}

	if open > 0 {
		// End of input with pending left braces, or a lone brace remaining
		// after nesting: either way they degrade to literal text.
		result.prepend(Node::Text("{".repeat(open)));
	}

	result
}

/// Fold matching left and right brace runs around `content` into nested
/// blocks, taking at most [`MAX_BRACES_PER_LEVEL`] braces per level while at
/// least two remain on both sides. Returns the number of unmatched right
/// braces.
fn nest(open: &mut usize, content: &mut Ast, mut close: usize) -> usize {
	loop {
		let take = (*open).min(close).min(MAX_BRACES_PER_LEVEL);
		if take < 2 {
			return close;
		}

		let body = std::mem::take(content);
		content.push(Node::Block(Block { braces: take, body }));
		*open -= take;
		close -= take;
	}
}
