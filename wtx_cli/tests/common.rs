use std::path::Path;

use assert_cmd::Command;

/// A minimal review set: one action, one reason, one pending review whose
/// article lives next to the review-set file.
pub const REVIEW_SET: &str = r#"
template = "Reviewed by {{REVIEWAUTHOR}}: {{#unanimousaction: %%TEXT%%}}"

[[actions]]
name = "delete"
description = "Remove the revision entirely"
unanimous = "Every revision should be deleted."

[[reasons]]
name = "copyright"
description = "Possible copyright violation"
text = "This file may violate copyright."

[[reviews]]
id = 1
timestamp = "2024-05-01T12:00:00Z"
comments = "blurry"
author = "Moderator"
article = "File_Example.wiki"

[[reviews.revisions]]
timestamp = "2024-04-30T09:00:00Z"
action = "delete"
reason = "copyright"
"#;

/// The wikitext the review set above renders to.
pub const RENDERED: &str = "Reviewed by Moderator: Every revision should be deleted.";

pub fn wtx_cmd() -> Command {
	let mut cmd = Command::cargo_bin("wtx").expect("wtx binary should be built");
	cmd.env("NO_COLOR", "1");
	cmd
}

pub fn write_review_set(dir: &Path) -> std::io::Result<()> {
	std::fs::write(dir.join("reviews.toml"), REVIEW_SET)?;
	std::fs::write(dir.join("File_Example.wiki"), "Intro text.\n")?;
	Ok(())
}
