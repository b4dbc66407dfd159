mod common;

use similar_asserts::assert_eq;
use wtx_core::AnyEmptyResult;
use wtx_core::END_MARKER;
use wtx_core::START_MARKER;

#[test]
fn sync_appends_region_to_article() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_review_set(tmp.path())?;

	let mut cmd = common::wtx_cmd();
	let _ = cmd
		.arg("sync")
		.arg("--data")
		.arg(tmp.path().join("reviews.toml"))
		.assert()
		.success()
		.stdout(predicates::str::contains("updated 1 of 1 article(s)"));

	let article = std::fs::read_to_string(tmp.path().join("File_Example.wiki"))?;
	assert_eq!(
		article,
		format!(
			"Intro text.\n\n{START_MARKER}\n{rendered}\n{END_MARKER}",
			rendered = common::RENDERED
		)
	);

	Ok(())
}

#[test]
fn sync_is_idempotent() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_review_set(tmp.path())?;

	let mut cmd = common::wtx_cmd();
	let _ = cmd
		.arg("sync")
		.arg("--data")
		.arg(tmp.path().join("reviews.toml"))
		.assert()
		.success();

	let first = std::fs::read_to_string(tmp.path().join("File_Example.wiki"))?;

	let mut cmd = common::wtx_cmd();
	let _ = cmd
		.arg("sync")
		.arg("--data")
		.arg(tmp.path().join("reviews.toml"))
		.assert()
		.success()
		.stdout(predicates::str::contains("updated 0 of 1 article(s)"));

	let second = std::fs::read_to_string(tmp.path().join("File_Example.wiki"))?;
	assert_eq!(second, first);

	Ok(())
}

#[test]
fn sync_heals_corrupted_markers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_review_set(tmp.path())?;

	// An article with a stale region plus a dangling start marker.
	std::fs::write(
		tmp.path().join("File_Example.wiki"),
		format!("Intro text.\n\n{START_MARKER}\nstale\n{END_MARKER}\n\n{START_MARKER}\nTail.\n"),
	)?;

	let mut cmd = common::wtx_cmd();
	let _ = cmd
		.arg("sync")
		.arg("--data")
		.arg(tmp.path().join("reviews.toml"))
		.assert()
		.success();

	let article = std::fs::read_to_string(tmp.path().join("File_Example.wiki"))?;
	assert_eq!(article.matches(START_MARKER).count(), 1);
	assert_eq!(article.matches(END_MARKER).count(), 1);
	assert!(article.contains(common::RENDERED));
	assert!(!article.contains("stale"));
	assert!(article.contains("Tail."));

	Ok(())
}

#[test]
fn sync_dry_run_leaves_the_article_untouched() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_review_set(tmp.path())?;

	let mut cmd = common::wtx_cmd();
	let _ = cmd
		.arg("sync")
		.arg("--data")
		.arg(tmp.path().join("reviews.toml"))
		.arg("--dry-run")
		.assert()
		.success()
		.stdout(predicates::str::contains("would update 1 of 1 article(s)"));

	let article = std::fs::read_to_string(tmp.path().join("File_Example.wiki"))?;
	assert_eq!(article, "Intro text.\n");

	Ok(())
}

#[test]
fn sync_reports_json_summary() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_review_set(tmp.path())?;

	let mut cmd = common::wtx_cmd();
	let assert = cmd
		.arg("sync")
		.arg("--data")
		.arg(tmp.path().join("reviews.toml"))
		.arg("--dry-run")
		.arg("--format")
		.arg("json")
		.assert()
		.success();

	let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
	let summary: serde_json::Value = serde_json::from_str(&stdout)?;

	assert_eq!(summary["dry_run"], serde_json::Value::Bool(true));
	assert_eq!(summary["articles"][0]["review"], serde_json::json!(1));
	assert_eq!(summary["articles"][0]["changed"], serde_json::Value::Bool(true));

	Ok(())
}

#[test]
fn sync_diff_shows_inserted_region() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_review_set(tmp.path())?;

	let mut cmd = common::wtx_cmd();
	let _ = cmd
		.arg("sync")
		.arg("--data")
		.arg(tmp.path().join("reviews.toml"))
		.arg("--dry-run")
		.arg("--diff")
		.assert()
		.success()
		.stdout(predicates::str::contains(format!("+{START_MARKER}")));

	Ok(())
}

#[test]
fn sync_fails_when_an_article_is_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("reviews.toml"), common::REVIEW_SET)?;

	let mut cmd = common::wtx_cmd();
	let _ = cmd
		.arg("sync")
		.arg("--data")
		.arg(tmp.path().join("reviews.toml"))
		.assert()
		.failure()
		.stderr(predicates::str::contains("error:"));

	Ok(())
}
