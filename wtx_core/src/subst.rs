use std::collections::HashMap;

/// The placeholder resolved before all others. It is substituted with
/// per-item boilerplate so that placeholders inside the boilerplate are
/// still expanded by the second pass.
pub(crate) const TEXT_PLACEHOLDER: &str = "%%TEXT%%";

/// The substitution value of one `%%UPPERCASE%%` placeholder: either a
/// plain string, or a deferred lookup that only runs when the placeholder
/// actually occurs.
pub(crate) enum Substitution<'a> {
	Literal(String),
	Lazy(Box<dyn Fn() -> String + 'a>),
}

impl Substitution<'_> {
	fn resolve(&self) -> String {
		match self {
			Substitution::Literal(value) => value.clone(),
			Substitution::Lazy(lookup) => lookup(),
		}
	}
}

/// Two-pass snippet expansion: `boilerplate` (when given) replaces every
/// `%%TEXT%%` occurrence first, then the remaining placeholders are
/// resolved through the substitution table.
pub(crate) fn expand_snippet(
	snippet: &str,
	boilerplate: Option<&str>,
	keywords: &HashMap<&str, Substitution<'_>>,
) -> String {
	let replaced = match boilerplate {
		Some(text) => snippet.replace(TEXT_PLACEHOLDER, text),
		None => snippet.to_string(),
	};

	expand_placeholders(&replaced, keywords)
}

/// Replace every `%%UPPERCASE%%` placeholder in `text` through the
/// substitution table, scanning left to right exactly once. Placeholders
/// with no table entry pass through unchanged.
pub(crate) fn expand_placeholders(
	text: &str,
	keywords: &HashMap<&str, Substitution<'_>>,
) -> String {
	let mut result = String::with_capacity(text.len());
	let mut rest = text;

	while let Some(start) = rest.find("%%") {
		let after = &rest[start + 2..];
		let name_len = after
			.bytes()
			.take_while(|byte| byte.is_ascii_uppercase())
			.count();

		if name_len > 0 && after[name_len..].starts_with("%%") {
			let name = &after[..name_len];
			result.push_str(&rest[..start]);

			match keywords.get(name) {
				Some(substitution) => result.push_str(&substitution.resolve()),
				None => {
					result.push_str("%%");
					result.push_str(name);
					result.push_str("%%");
				}
			}

			rest = &after[name_len + 2..];
		} else {
			// Not a placeholder: keep one percent sign and retry right after
			// it, so overlapping candidates are still found.
			result.push_str(&rest[..=start]);
			rest = &rest[start + 1..];
		}
	}

	result.push_str(rest);
	result
}
