use logos::Logos;

use crate::tokens::Token;

/// Raw tokens produced by logos for the flat tokenization pass.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token("|")]
	Pipe,
	#[regex(r"\{+")]
	OpenBraces,
	#[regex(r"\}+")]
	CloseBraces,
	#[regex(r"[^|{}]+")]
	Text,
}

/// Split wikitext into a lossless stream of tokens: maximal plain-text runs,
/// lone pipes, and brace runs of length two or more. A single brace is
/// ordinary text. Total: any byte sequence lexes.
pub fn tokenize(wikitext: &str) -> Vec<Token> {
	let mut tokens: Vec<Token> = vec![];

	for (result, span) in RawToken::lexer(wikitext).spanned() {
		let slice = &wikitext[span];

		match result {
			Ok(RawToken::Pipe) => tokens.push(Token::Pipe),
			Ok(RawToken::OpenBraces) if slice.len() >= 2 => {
				tokens.push(Token::OpenBraces(slice.len()));
			}
			Ok(RawToken::CloseBraces) if slice.len() >= 2 => {
				tokens.push(Token::CloseBraces(slice.len()));
			}
			// Lone braces and unrecognized bytes are plain text, fused into
			// the preceding text run when there is one.
			Ok(RawToken::OpenBraces | RawToken::CloseBraces | RawToken::Text) | Err(()) => {
				push_text(&mut tokens, slice);
			}
		}
	}

	tokens
}

fn push_text(tokens: &mut Vec<Token>, slice: &str) {
	if let Some(Token::Text(text)) = tokens.last_mut() {
		text.push_str(slice);
	} else {
		tokens.push(Token::Text(slice.to_string()));
	}
}
