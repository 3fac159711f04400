use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const KEY: &str = "town-crier";

/// A working directory whose wikitown.toml points the store at `<dir>/data`
fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("wikitown.toml"),
        format!("[store]\nroot = \"data\"\neditor_key = \"{KEY}\"\n"),
    )
    .unwrap();
    dir
}

fn save(dir: &Path, slug: &str, input: &str, extra: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("wikitown");
    cmd.current_dir(dir)
        .args(["page", "save", slug, input])
        .args(extra);
    cmd.assert()
}

#[test]
fn save_and_show_markup() {
    let dir = workspace();
    fs::write(dir.path().join("mill.wiki"), "The **mill** by [[Old Bridge]]").unwrap();

    save(
        dir.path(),
        "old-mill",
        "mill.wiki",
        &["--title", "Old Mill", "--category", "Places", "--key", KEY],
    )
    .success()
    .stdout(predicate::str::contains("Saved old-mill"));
    assert!(dir.path().join("data/pages/old-mill.json").is_file());

    let mut show = cargo_bin_cmd!("wikitown");
    show.current_dir(dir.path()).args(["page", "show", "old-mill"]);
    show.assert()
        .success()
        .stdout("The **mill** by [[Old Bridge]]");

    let mut html = cargo_bin_cmd!("wikitown");
    html.current_dir(dir.path())
        .args(["page", "show", "old-mill", "--to", "html"]);
    html.assert().success().stdout(
        "The <strong>mill</strong> by <a href=\"/wiki/old-bridge\" class=\"wiki-link\">Old Bridge</a>",
    );
}

#[test]
fn save_editor_html_stores_markup() {
    let dir = workspace();
    fs::write(
        dir.path().join("edited.html"),
        "<div>Bells <em>ring</em></div><br><div class=\"wiki-audio\" data-file=\"bells.ogg\" data-title=\"\"></div>",
    )
    .unwrap();

    save(
        dir.path(),
        "bells",
        "edited.html",
        &["--title", "Bells", "--key", KEY],
    )
    .success();

    let mut show = cargo_bin_cmd!("wikitown");
    show.current_dir(dir.path()).args(["page", "show", "bells"]);
    show.assert()
        .success()
        .stdout("Bells ring\n{{audio:bells.ogg}}");
}

#[test]
fn save_without_key_is_rejected() {
    let dir = workspace();
    fs::write(dir.path().join("mill.wiki"), "x").unwrap();

    save(dir.path(), "old-mill", "mill.wiki", &["--title", "Old Mill"])
        .failure()
        .stderr(predicate::str::contains("Error: Unauthorized"));
    assert!(!dir.path().join("data/pages/old-mill.json").exists());
}

#[test]
fn save_with_non_canonical_slug_is_rejected() {
    let dir = workspace();
    fs::write(dir.path().join("mill.wiki"), "x").unwrap();

    save(
        dir.path(),
        "Old-Mill",
        "mill.wiki",
        &["--title", "Old Mill", "--key", KEY],
    )
    .failure()
    .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn show_missing_page() {
    let dir = workspace();

    let mut cmd = cargo_bin_cmd!("wikitown");
    cmd.current_dir(dir.path()).args(["page", "show", "nowhere"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: Not found: page 'nowhere'"));
}

#[test]
fn list_and_categories() {
    let dir = workspace();
    fs::write(dir.path().join("a.wiki"), "{{img:tavern.png}}\nAle").unwrap();
    fs::write(dir.path().join("b.wiki"), "Grain").unwrap();

    save(
        dir.path(),
        "tavern",
        "a.wiki",
        &["--title", "Tavern", "--category", "Places", "--key", KEY],
    )
    .success();
    save(
        dir.path(),
        "mill",
        "b.wiki",
        &["--title", "Mill", "--category", "Places", "--key", KEY],
    )
    .success();

    let mut list = cargo_bin_cmd!("wikitown");
    list.current_dir(dir.path()).args(["page", "list"]);
    list.assert()
        .success()
        .stdout("mill\tMill\tPlaces\ntavern\tTavern\tPlaces\n");

    let mut search = cargo_bin_cmd!("wikitown");
    search
        .current_dir(dir.path())
        .args(["page", "list", "--query", "ALE"]);
    search.assert().success().stdout("tavern\tTavern\tPlaces\n");

    let mut categories = cargo_bin_cmd!("wikitown");
    categories
        .current_dir(dir.path())
        .args(["page", "categories"]);
    categories.assert().success().stdout("Places\ttavern.png\n");
}

#[test]
fn media_lookup() {
    let dir = workspace();
    fs::create_dir_all(dir.path().join("data/media")).unwrap();
    fs::write(dir.path().join("data/media/bells.ogg"), b"OggS0000").unwrap();

    let mut cmd = cargo_bin_cmd!("wikitown");
    cmd.current_dir(dir.path()).args(["media", "bells.ogg"]);
    cmd.assert().success().stdout("audio/ogg\t8 bytes\n");

    let mut missing = cargo_bin_cmd!("wikitown");
    missing.current_dir(dir.path()).args(["media", "nope.png"]);
    missing.assert().failure();
}

#[test]
fn store_flag_points_elsewhere() {
    let dir = workspace();
    let other = tempdir().unwrap();
    fs::create_dir_all(other.path().join("media")).unwrap();
    fs::write(other.path().join("media/map.PNG"), b"png").unwrap();

    let mut cmd = cargo_bin_cmd!("wikitown");
    cmd.current_dir(dir.path())
        .args(["media", "map.PNG", "--store"])
        .arg(other.path().as_os_str());
    cmd.assert().success().stdout("image/png\t3 bytes\n");
}
